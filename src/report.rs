use std::fmt::Write;

use crate::cohorts;
use crate::conflicts;
use crate::models::{
    CalendarEvent, ConflictSeverity, Gender, Metric, MetricReading, MetricValue, RankResult,
    ScheduleConflict, ScheduleSeverity,
};
use crate::stats::{self, InvalidCohort};

pub fn severity_banner(severity: ScheduleSeverity) -> &'static str {
    match severity {
        ScheduleSeverity::Critical => "critical",
        ScheduleSeverity::Warning => "warning",
        ScheduleSeverity::Minor => "minor",
    }
}

fn severity_tag(severity: ConflictSeverity) -> &'static str {
    match severity {
        ConflictSeverity::High => "high",
        ConflictSeverity::Medium => "medium",
    }
}

/// Rank every profile entry against its cohort, preserving profile order.
pub fn rank_profile(
    profile: &[(Metric, f64)],
    age: u32,
    gender: Gender,
) -> Result<Vec<(Metric, RankResult)>, InvalidCohort> {
    let mut results = Vec::with_capacity(profile.len());
    for &(metric, raw) in profile {
        let cohort = cohorts::lookup(metric, age, gender);
        let reading = MetricReading {
            value: MetricValue::from_raw(raw),
            higher_is_better: metric.higher_is_better(),
        };
        results.push((metric, stats::rank_or_unset(&reading, &cohort)?));
    }
    Ok(results)
}

pub fn build_report(
    age: u32,
    gender: Gender,
    profile: &[(Metric, f64)],
    events: &[CalendarEvent],
    conflicts: &[ScheduleConflict],
) -> Result<String, InvalidCohort> {
    let rankings = rank_profile(profile, age, gender)?;
    let overall = conflicts::overall_severity(conflicts);

    let mut output = String::new();
    let gender_label = match gender {
        Gender::Female => "female",
        Gender::Male => "male",
    };

    let _ = writeln!(output, "# Daymark Analytics Report");
    let _ = writeln!(output, "Cohort: age {}, {}", age, gender_label);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Metric Rankings");

    if rankings.is_empty() {
        let _ = writeln!(output, "No metrics recorded yet.");
    } else {
        for (metric, result) in &rankings {
            match result {
                RankResult::Ranked {
                    percentile, label, ..
                } => {
                    let _ = writeln!(
                        output,
                        "- {}: {:.1}th percentile ({})",
                        metric.label(),
                        percentile * 100.0,
                        label
                    );
                }
                RankResult::Unset => {
                    let _ = writeln!(output, "- {}: not set", metric.label());
                }
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "## Schedule Conflicts ({} events, overall severity: {})",
        events.len(),
        severity_banner(overall)
    );

    if conflicts.is_empty() {
        let _ = writeln!(output, "No conflicts detected.");
    } else {
        for conflict in conflicts {
            let _ = writeln!(
                output,
                "- [{}] {}",
                severity_tag(conflict.severity),
                conflict.description
            );
            for action in &conflict.suggested_actions {
                let _ = writeln!(output, "  - {}", action);
            }
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflicts::detect_conflicts;
    use crate::events::{seed_events, seed_profile};

    #[test]
    fn report_lists_rankings_and_conflicts() {
        let events = seed_events();
        let conflicts = detect_conflicts(&events);
        let report = build_report(
            32,
            Gender::Female,
            &seed_profile(),
            &events,
            &conflicts,
        )
        .unwrap();

        assert!(report.contains("# Daymark Analytics Report"));
        assert!(report.contains("## Metric Rankings"));
        assert!(report.contains("- pull-ups: not set"));
        assert!(report.contains("overall severity: critical"));
        assert!(report.contains("'Team standup' overlaps with 'Design review'"));
        assert!(report.contains("Add buffer time between events"));
    }

    #[test]
    fn empty_inputs_fall_back_to_placeholders() {
        let report = build_report(40, Gender::Male, &[], &[], &[]).unwrap();
        assert!(report.contains("No metrics recorded yet."));
        assert!(report.contains("No conflicts detected."));
        assert!(report.contains("overall severity: minor"));
    }

    #[test]
    fn ranked_profile_preserves_input_order() {
        let profile = vec![(Metric::Academics, 81.0), (Metric::Bmi, 23.4)];
        let rankings = rank_profile(&profile, 32, Gender::Female).unwrap();
        assert_eq!(rankings[0].0, Metric::Academics);
        assert_eq!(rankings[1].0, Metric::Bmi);
        assert!(matches!(rankings[0].1, RankResult::Ranked { .. }));
    }
}
