use thiserror::Error;

use crate::models::{CohortStats, DistributionSample, MetricReading, MetricValue, RankResult};

/// Statistical parameters from the upstream lookup were malformed. Always a
/// data error, never user input; the caller shows a "stats unavailable"
/// state instead of a percentile.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidCohort {
    #[error("standard deviation must be positive, got {0}")]
    NonPositiveStdDev(f64),
    #[error("cohort bounds are inverted: min {min} exceeds max {max}")]
    InvertedBounds { min: f64, max: f64 },
}

/// Standard normal CDF via the Hastings approximation (A&S 26.2.17),
/// absolute error below 7.5e-8.
fn normal_cdf(z: f64) -> f64 {
    if z >= 8.0 {
        return 1.0;
    }
    if z <= -8.0 {
        return 0.0;
    }

    // Negative z by symmetry: Φ(-z) = 1 - Φ(z).
    let (z_abs, negate) = if z < 0.0 { (-z, true) } else { (z, false) };

    const B0: f64 = 0.2316419;
    const B1: f64 = 0.319381530;
    const B2: f64 = -0.356563782;
    const B3: f64 = 1.781477937;
    const B4: f64 = -1.821255978;
    const B5: f64 = 1.330274429;

    let t = 1.0 / (1.0 + B0 * z_abs);
    let poly = t * (B1 + t * (B2 + t * (B3 + t * (B4 + t * B5))));
    let pdf = (-0.5 * z_abs * z_abs).exp() / (2.0 * std::f64::consts::PI).sqrt();
    let cdf = 1.0 - pdf * poly;

    if negate {
        1.0 - cdf
    } else {
        cdf
    }
}

fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
}

/// z-score of `value` within `cohort`.
pub fn standardize(value: f64, cohort: &CohortStats) -> Result<f64, InvalidCohort> {
    if cohort.std_dev <= 0.0 {
        return Err(InvalidCohort::NonPositiveStdDev(cohort.std_dev));
    }
    Ok((value - cohort.mean) / cohort.std_dev)
}

/// Fraction of the cohort the value outperforms, in [0, 1]. When higher raw
/// values are worse (5K time, BMI), the CDF result is inverted here, on the
/// final percentile only, so the curve math stays direction-agnostic.
pub fn percentile(
    value: f64,
    cohort: &CohortStats,
    higher_is_better: bool,
) -> Result<f64, InvalidCohort> {
    let z = standardize(value, cohort)?;
    let p = normal_cdf(z);
    let p = if higher_is_better { p } else { 1.0 - p };
    Ok(p.clamp(0.0, 1.0))
}

/// Bucket a percentile into the display label, top bucket first.
/// Boundaries are inclusive on the lower edge.
pub fn rank_label(percentile: f64) -> &'static str {
    if percentile >= 0.95 {
        "Top 5%"
    } else if percentile >= 0.90 {
        "Top 10%"
    } else if percentile >= 0.75 {
        "Top 25%"
    } else if percentile >= 0.50 {
        "Above Average"
    } else if percentile >= 0.25 {
        "Below Average"
    } else {
        "Bottom 25%"
    }
}

/// The one place the unset sentinel is handled. Every display surface goes
/// through this instead of re-checking for missing data before calling
/// [`percentile`].
pub fn rank_or_unset(
    reading: &MetricReading,
    cohort: &CohortStats,
) -> Result<RankResult, InvalidCohort> {
    let value = match reading.value {
        MetricValue::Measured(value) => value,
        MetricValue::Unset => return Ok(RankResult::Unset),
    };

    let z_score = standardize(value, cohort)?;
    let percentile = percentile(value, cohort, reading.higher_is_better)?;
    Ok(RankResult::Ranked {
        z_score,
        percentile,
        label: rank_label(percentile).to_string(),
    })
}

/// Evenly spaced density samples spanning `[min, max]` inclusive, for chart
/// rendering. A zero-width domain (`min == max`) collapses to one sample so
/// consumers that normalize x never divide by zero.
pub fn sample_curve(
    cohort: &CohortStats,
    point_count: usize,
) -> Result<Vec<DistributionSample>, InvalidCohort> {
    if cohort.std_dev <= 0.0 {
        return Err(InvalidCohort::NonPositiveStdDev(cohort.std_dev));
    }
    if cohort.min > cohort.max {
        return Err(InvalidCohort::InvertedBounds {
            min: cohort.min,
            max: cohort.max,
        });
    }

    if cohort.min == cohort.max {
        return Ok(vec![DistributionSample {
            x: cohort.min,
            density: normal_pdf(cohort.min, cohort.mean, cohort.std_dev),
        }]);
    }

    let mut samples = Vec::with_capacity(point_count);
    if point_count == 0 {
        return Ok(samples);
    }
    if point_count == 1 {
        samples.push(DistributionSample {
            x: cohort.min,
            density: normal_pdf(cohort.min, cohort.mean, cohort.std_dev),
        });
        return Ok(samples);
    }

    let step = (cohort.max - cohort.min) / (point_count - 1) as f64;
    for i in 0..point_count {
        let x = cohort.min + step * i as f64;
        samples.push(DistributionSample {
            x,
            density: normal_pdf(x, cohort.mean, cohort.std_dev),
        });
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cohort(mean: f64, std_dev: f64, min: f64, max: f64) -> CohortStats {
        CohortStats {
            mean,
            std_dev,
            min,
            max,
        }
    }

    #[test]
    fn cdf_matches_reference_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.0) - 0.841_344_746).abs() < 1e-7);
        assert!((normal_cdf(-1.0) - 0.158_655_254).abs() < 1e-7);
        assert!((normal_cdf(2.0) - 0.977_249_868).abs() < 1e-7);
        assert!((normal_cdf(-1.3) - 0.096_800_485).abs() < 1e-7);
    }

    #[test]
    fn cdf_clamps_extreme_tails() {
        assert_eq!(normal_cdf(10.0), 1.0);
        assert_eq!(normal_cdf(-10.0), 0.0);
    }

    #[test]
    fn value_at_mean_is_median() {
        let cohort = cohort(25.0, 5.0, 15.0, 45.0);
        let p = percentile(25.0, &cohort, true).unwrap();
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn percentile_stays_in_unit_interval() {
        let cohort = cohort(25.0, 5.0, 15.0, 45.0);
        for value in [-1_000.0, -50.0, 0.0, 25.0, 80.0, 1_000.0] {
            for higher in [true, false] {
                let p = percentile(value, &cohort, higher).unwrap();
                assert!(p.is_finite());
                assert!((0.0..=1.0).contains(&p), "p = {p} for value {value}");
            }
        }
    }

    #[test]
    fn percentile_is_monotone_in_both_directions() {
        let cohort = cohort(25.0, 5.0, 15.0, 45.0);
        let lo_up = percentile(20.0, &cohort, true).unwrap();
        let hi_up = percentile(30.0, &cohort, true).unwrap();
        assert!(lo_up < hi_up);

        let lo_down = percentile(20.0, &cohort, false).unwrap();
        let hi_down = percentile(30.0, &cohort, false).unwrap();
        assert!(lo_down > hi_down);
    }

    #[test]
    fn non_positive_std_dev_is_rejected() {
        let cohort = cohort(25.0, 0.0, 15.0, 45.0);
        assert_eq!(
            standardize(20.0, &cohort),
            Err(InvalidCohort::NonPositiveStdDev(0.0))
        );
        assert!(percentile(20.0, &cohort, true).is_err());
        assert!(sample_curve(&cohort, 10).is_err());
    }

    #[test]
    fn rank_label_buckets_are_inclusive_on_lower_edge() {
        assert_eq!(rank_label(0.97), "Top 5%");
        assert_eq!(rank_label(0.95), "Top 5%");
        assert_eq!(rank_label(0.9499), "Top 10%");
        assert_eq!(rank_label(0.90), "Top 10%");
        assert_eq!(rank_label(0.80), "Top 25%");
        assert_eq!(rank_label(0.75), "Top 25%");
        assert_eq!(rank_label(0.50), "Above Average");
        assert_eq!(rank_label(0.30), "Below Average");
        assert_eq!(rank_label(0.25), "Below Average");
        assert_eq!(rank_label(0.10), "Bottom 25%");
    }

    #[test]
    fn lower_better_five_k_time_ranks_top_ten_percent() {
        // 5K time cohort: mean 25 min, stddev 5; 18.5 min is z = -1.3,
        // raw CDF ~0.097, inverted to ~0.903.
        let cohort = cohort(25.0, 5.0, 15.0, 45.0);
        let z = standardize(18.5, &cohort).unwrap();
        assert!((z - (-1.3)).abs() < 1e-9);
        let p = percentile(18.5, &cohort, false).unwrap();
        assert!((p - 0.9032).abs() < 1e-3);
        assert_eq!(rank_label(p), "Top 10%");
    }

    #[test]
    fn rank_or_unset_short_circuits_the_sentinel() {
        let cohort = cohort(25.0, 5.0, 15.0, 45.0);
        let reading = MetricReading {
            value: MetricValue::from_raw(0.0),
            higher_is_better: false,
        };
        assert_eq!(rank_or_unset(&reading, &cohort).unwrap(), RankResult::Unset);
    }

    #[test]
    fn rank_or_unset_ranks_measured_values() {
        let cohort = cohort(25.0, 5.0, 15.0, 45.0);
        let reading = MetricReading {
            value: MetricValue::Measured(18.5),
            higher_is_better: false,
        };
        match rank_or_unset(&reading, &cohort).unwrap() {
            RankResult::Ranked {
                z_score,
                percentile,
                label,
            } => {
                assert!((z_score - (-1.3)).abs() < 1e-9);
                assert!(percentile > 0.90);
                assert_eq!(label, "Top 10%");
            }
            RankResult::Unset => panic!("expected a ranked result"),
        }
    }

    #[test]
    fn curve_has_exact_point_count_within_bounds() {
        let cohort = cohort(25.0, 5.0, 15.0, 45.0);
        let samples = sample_curve(&cohort, 60).unwrap();
        assert_eq!(samples.len(), 60);
        assert_eq!(samples[0].x, 15.0);
        assert_eq!(samples[59].x, 45.0);
        for sample in &samples {
            assert!((15.0..=45.0).contains(&sample.x));
            assert!(sample.density >= 0.0);
        }
    }

    #[test]
    fn curve_peak_sits_at_the_mean() {
        let cohort = cohort(25.0, 5.0, 15.0, 45.0);
        let samples = sample_curve(&cohort, 61).unwrap();
        let peak = samples
            .iter()
            .max_by(|a, b| a.density.partial_cmp(&b.density).unwrap())
            .unwrap();
        assert!((peak.x - 25.0).abs() < 1e-9);
    }

    #[test]
    fn zero_width_domain_yields_single_sample() {
        let cohort = cohort(25.0, 5.0, 30.0, 30.0);
        let samples = sample_curve(&cohort, 60).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].x, 30.0);
        assert!(samples[0].density > 0.0);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let cohort = cohort(25.0, 5.0, 45.0, 15.0);
        assert_eq!(
            sample_curve(&cohort, 10),
            Err(InvalidCohort::InvertedBounds {
                min: 45.0,
                max: 15.0
            })
        );
    }
}
