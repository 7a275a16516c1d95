use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CalendarEvent, Metric};

#[derive(Serialize, Deserialize)]
struct EventRow {
    id: Option<Uuid>,
    title: String,
    start_time: DateTime<Utc>,
    location: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct ProfileRow {
    metric: Metric,
    value: f64,
}

/// Decode the calendar from a CSV export. Missing ids get a fresh uuid and
/// a missing location becomes the empty string (no location on file).
pub fn load_events(path: &Path) -> anyhow::Result<Vec<CalendarEvent>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open events file {}", path.display()))?;

    let mut events = Vec::new();
    for result in reader.deserialize::<EventRow>() {
        let row = result.context("malformed event row")?;
        events.push(CalendarEvent {
            id: row.id.unwrap_or_else(Uuid::new_v4),
            title: row.title,
            start_time: row.start_time,
            location: row.location.unwrap_or_default(),
        });
    }
    Ok(events)
}

/// Decode a metric profile (metric, raw value) from CSV. Raw zeros are kept
/// as-is here; the sentinel interpretation happens at the reading boundary.
pub fn load_profile(path: &Path) -> anyhow::Result<Vec<(Metric, f64)>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open profile file {}", path.display()))?;

    let mut profile = Vec::new();
    for result in reader.deserialize::<ProfileRow>() {
        let row = result.context("malformed profile row")?;
        profile.push((row.metric, row.value));
    }
    Ok(profile)
}

/// A realistic demo day: one overlapping pair, one tight cross-town
/// transfer, and a quiet evening.
pub fn seed_events() -> Vec<CalendarEvent> {
    let day = |hour, minute| Utc.with_ymd_and_hms(2026, 3, 9, hour, minute, 0).unwrap();
    vec![
        CalendarEvent {
            id: Uuid::new_v4(),
            title: "Morning run".to_string(),
            start_time: day(7, 0),
            location: "Riverside Park".to_string(),
        },
        CalendarEvent {
            id: Uuid::new_v4(),
            title: "Team standup".to_string(),
            start_time: day(9, 0),
            location: "Office".to_string(),
        },
        CalendarEvent {
            id: Uuid::new_v4(),
            title: "Design review".to_string(),
            start_time: day(9, 30),
            location: "Office".to_string(),
        },
        CalendarEvent {
            id: Uuid::new_v4(),
            title: "Dentist".to_string(),
            start_time: day(12, 15),
            location: "Uptown Clinic".to_string(),
        },
        CalendarEvent {
            id: Uuid::new_v4(),
            title: "Client lunch".to_string(),
            start_time: day(12, 40),
            location: "Harbor Bistro".to_string(),
        },
        CalendarEvent {
            id: Uuid::new_v4(),
            title: "Swim session".to_string(),
            start_time: day(18, 30),
            location: "City Pool".to_string(),
        },
    ]
}

/// Demo metric profile; pull-ups deliberately unset (raw zero).
pub fn seed_profile() -> Vec<(Metric, f64)> {
    vec![
        (Metric::Bmi, 23.4),
        (Metric::FiveKTime, 26.5),
        (Metric::SwimEndurance, 35.0),
        (Metric::Income, 64.0),
        (Metric::PullUps, 0.0),
        (Metric::Academics, 81.0),
    ]
}

pub fn write_seed_events(path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for event in seed_events() {
        writer.serialize(EventRow {
            id: Some(event.id),
            title: event.title,
            start_time: event.start_time,
            location: if event.location.is_empty() {
                None
            } else {
                Some(event.location)
            },
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_seed_profile(path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for (metric, value) in seed_profile() {
        writer.serialize(ProfileRow { metric, value })?;
    }
    writer.flush()?;
    Ok(())
}
