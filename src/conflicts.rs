use chrono::Duration;
use uuid::Uuid;

use crate::models::{
    CalendarEvent, ConflictKind, ConflictSeverity, ScheduleConflict, ScheduleSeverity,
};

/// Events are assumed to occupy exactly one hour regardless of any declared
/// length. Known approximation carried over from the source data model.
pub const DEFAULT_EVENT_DURATION_SECS: i64 = 3600;

/// Minimum start-to-start gap between adjacent events at different
/// locations before a travel conflict is raised.
pub const MIN_TRAVEL_GAP_SECS: i64 = 1800;

fn overlap_conflict(a: &CalendarEvent, b: &CalendarEvent) -> ScheduleConflict {
    ScheduleConflict {
        id: Uuid::new_v4(),
        kind: ConflictKind::TimeOverlap,
        severity: ConflictSeverity::High,
        involved_events: (a.id, b.id),
        description: format!("'{}' overlaps with '{}'", a.title, b.title),
        suggested_actions: vec![
            "Move one event to a different time slot".to_string(),
            "Shorten the duration of one event".to_string(),
        ],
    }
}

fn travel_conflict(current: &CalendarEvent, next: &CalendarEvent) -> ScheduleConflict {
    ScheduleConflict {
        id: Uuid::new_v4(),
        kind: ConflictKind::TravelTime,
        severity: ConflictSeverity::Medium,
        involved_events: (current.id, next.id),
        description: format!(
            "Not enough travel time between '{}' and '{}'",
            current.title, next.title
        ),
        suggested_actions: vec![
            "Add buffer time between events".to_string(),
            "Reschedule one of the events".to_string(),
            "Consider virtual alternative".to_string(),
        ],
    }
}

/// Find every time-overlap and travel-time conflict in `events`. The input
/// slice is never mutated; detection works on a sorted view.
///
/// Overlaps use a sweep over events sorted by start time: with a fixed
/// occupancy window, an event can only overlap later events that start
/// before its window closes, so each event is compared against a bounded
/// look-ahead instead of every other event. The emitted set is identical to
/// the full pairwise `a.start < b.end && b.start < a.end` check, including
/// identical start times (flagged) and back-to-back events (not flagged;
/// the boundary comparison is strict).
pub fn detect_conflicts(events: &[CalendarEvent]) -> Vec<ScheduleConflict> {
    let mut conflicts = Vec::new();
    if events.len() < 2 {
        return conflicts;
    }

    let mut ordered: Vec<&CalendarEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.start_time);

    let duration = Duration::seconds(DEFAULT_EVENT_DURATION_SECS);
    for i in 0..ordered.len() {
        let end = ordered[i].start_time + duration;
        for &next in &ordered[i + 1..] {
            if next.start_time >= end {
                break;
            }
            conflicts.push(overlap_conflict(ordered[i], next));
        }
    }

    for pair in ordered.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if current.location.is_empty() || next.location.is_empty() {
            continue;
        }
        if current.location == next.location {
            continue;
        }
        let gap = next.start_time - current.start_time;
        if gap < Duration::seconds(MIN_TRAVEL_GAP_SECS) {
            conflicts.push(travel_conflict(current, next));
        }
    }

    conflicts
}

/// Aggregate severity for the summary banner: any high-severity conflict
/// makes the schedule critical, any medium-severity one makes it a warning.
pub fn overall_severity(conflicts: &[ScheduleConflict]) -> ScheduleSeverity {
    if conflicts
        .iter()
        .any(|c| c.severity == ConflictSeverity::High)
    {
        ScheduleSeverity::Critical
    } else if conflicts
        .iter()
        .any(|c| c.severity == ConflictSeverity::Medium)
    {
        ScheduleSeverity::Warning
    } else {
        ScheduleSeverity::Minor
    }
}
