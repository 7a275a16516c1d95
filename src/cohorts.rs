use crate::models::{CohortStats, Gender, Metric};

/// Ages outside this band reuse the nearest edge cohort; the synthetic
/// tables are only calibrated for adults.
const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 80;

/// Reference age the base parameters are calibrated at.
const BASE_AGE: f64 = 30.0;

/// Synthetic population parameters for one (metric, age, gender) slice.
///
/// Base values describe a 30-year-old and drift linearly with age. The
/// numbers are plausible, not survey-derived; any source of equivalent
/// (mean, stddev, min, max) tuples can replace this table.
pub fn lookup(metric: Metric, age: u32, gender: Gender) -> CohortStats {
    let years = f64::from(age.clamp(MIN_AGE, MAX_AGE)) - BASE_AGE;

    match metric {
        // kg/m^2; creeps upward with age.
        Metric::Bmi => {
            let base = match gender {
                Gender::Female => 24.0,
                Gender::Male => 25.5,
            };
            CohortStats {
                mean: base + 0.08 * years,
                std_dev: 4.1,
                min: 15.0,
                max: 45.0,
            }
        }
        // Minutes for 5 km; slows with age.
        Metric::FiveKTime => {
            let (base, std_dev) = match gender {
                Gender::Female => (32.0, 6.0),
                Gender::Male => (28.0, 5.5),
            };
            CohortStats {
                mean: base + 0.12 * years,
                std_dev,
                min: 14.0,
                max: 60.0,
            }
        }
        // Minutes of continuous swimming.
        Metric::SwimEndurance => {
            let base = match gender {
                Gender::Female => 25.0,
                Gender::Male => 27.0,
            };
            CohortStats {
                mean: base - 0.10 * years,
                std_dev: 10.0,
                min: 1.0,
                max: 90.0,
            }
        }
        // Thousands per year; grows through mid-career, then flattens.
        Metric::Income => {
            let base = match gender {
                Gender::Female => 52.0,
                Gender::Male => 58.0,
            };
            CohortStats {
                mean: base + 0.6 * years.min(25.0),
                std_dev: 25.0,
                min: 0.0,
                max: 250.0,
            }
        }
        // Strict-form reps; declines with age.
        Metric::PullUps => {
            let (base, std_dev) = match gender {
                Gender::Female => (4.0, 3.0),
                Gender::Male => (9.0, 5.0),
            };
            CohortStats {
                mean: (base - 0.06 * years).max(0.5),
                std_dev,
                min: 0.0,
                max: 40.0,
            }
        }
        // Composite 0-100 score; no age drift.
        Metric::Academics => CohortStats {
            mean: 72.0,
            std_dev: 11.0,
            min: 0.0,
            max: 100.0,
        },
    }
}
