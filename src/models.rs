use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary statistics for one population slice (metric + age + gender).
/// Constructed by the cohort lookup, never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// A metric value with the "zero means not yet measured" sentinel made
/// explicit. Upstream storage writes `0.0` for unset metrics; that must
/// never reach the percentile math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Measured(f64),
    Unset,
}

impl MetricValue {
    /// Interpret a raw stored value, treating `0.0` as the unset sentinel.
    pub fn from_raw(raw: f64) -> Self {
        if raw == 0.0 {
            MetricValue::Unset
        } else {
            MetricValue::Measured(raw)
        }
    }
}

/// A user's reading for one metric plus its directionality.
#[derive(Debug, Clone, Copy)]
pub struct MetricReading {
    pub value: MetricValue,
    pub higher_is_better: bool,
}

/// One point of a plottable distribution curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionSample {
    pub x: f64,
    pub density: f64,
}

/// Outcome of ranking a reading against a cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RankResult {
    Ranked {
        z_score: f64,
        percentile: f64,
        label: String,
    },
    Unset,
}

/// The metrics the app ranks against a synthetic population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    Bmi,
    FiveKTime,
    SwimEndurance,
    Income,
    PullUps,
    Academics,
}

impl Metric {
    /// Whether a larger raw value means a better outcome. For BMI and 5K
    /// time lower is better, and the percentile is inverted downstream.
    pub fn higher_is_better(self) -> bool {
        !matches!(self, Metric::Bmi | Metric::FiveKTime)
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Bmi => "BMI",
            Metric::FiveKTime => "5K time",
            Metric::SwimEndurance => "swim endurance",
            Metric::Income => "income",
            Metric::PullUps => "pull-ups",
            Metric::Academics => "academics",
        }
    }

    pub const ALL: [Metric; 6] = [
        Metric::Bmi,
        Metric::FiveKTime,
        Metric::SwimEndurance,
        Metric::Income,
        Metric::PullUps,
        Metric::Academics,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Female,
    Male,
}

/// A calendar event as consumed by the conflict detector. Events carry no
/// duration here; the detector assumes a fixed occupancy window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    TimeOverlap,
    TravelTime,
    // Reserved filter categories; the detector never emits these.
    LocationConflict,
    ResourceConflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Medium,
    High,
}

/// Aggregate severity of a whole schedule, for the summary banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSeverity {
    Minor,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleConflict {
    /// Fresh per detection pass; `(kind, involved_events)` is the stable
    /// identity across runs.
    pub id: Uuid,
    pub kind: ConflictKind,
    pub severity: ConflictSeverity,
    pub involved_events: (Uuid, Uuid),
    pub description: String,
    pub suggested_actions: Vec<String>,
}
