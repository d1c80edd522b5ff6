use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::dashboard;
use crate::models::{AnalysisRecord, Owner};

/// Renders the owner's dashboard as markdown. `records` must be newest first.
pub fn build_report(
    owner: &Owner,
    generated_at: DateTime<Utc>,
    records: &[AnalysisRecord],
) -> String {
    let stats = dashboard::stats(records);
    let breakdown = dashboard::style_breakdown(records);

    let mut output = String::new();

    let _ = writeln!(output, "# Learning Style Dashboard");
    let _ = writeln!(
        output,
        "Generated for {} on {}",
        owner.email,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Total analyses: {}", stats.total);
    let _ = writeln!(output, "- Fast learners: {}", stats.fast_learners);
    let _ = writeln!(output, "- Consistent students: {}", stats.consistent);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Style Mix");
    if breakdown.is_empty() {
        let _ = writeln!(output, "No analyses recorded yet.");
    } else {
        for entry in breakdown.iter() {
            let _ = writeln!(
                output,
                "- {}: {} students (avg quiz score {:.1})",
                entry.style, entry.count, entry.avg_quiz_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Progress");
    let points = dashboard::trend(records);
    if points.is_empty() {
        let _ = writeln!(output, "No analyses recorded yet.");
    } else {
        let _ = writeln!(output, "| Day | Quiz score | Consistency |");
        let _ = writeln!(output, "| --- | --- | --- |");
        for point in points.iter() {
            let _ = writeln!(
                output,
                "| {} | {:.0} | {:.0} |",
                point.label, point.score, point.consistency
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Achievements");
    let badges = dashboard::badges(&stats);
    if badges.is_empty() {
        let _ = writeln!(output, "Start analyzing to earn badges!");
    } else {
        for badge in badges.iter() {
            let _ = writeln!(output, "- **{}**: {}", badge.name, badge.description);
        }
    }

    let groups = dashboard::smart_groups(records);
    if let Some(group) = groups.first() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Smart Grouping");
        let _ = writeln!(
            output,
            "{} can mentor {}.",
            group.mentor,
            group.students.join(", ")
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Analyses");
    if records.is_empty() {
        let _ = writeln!(output, "No analyses recorded yet.");
    } else {
        for record in records.iter() {
            let _ = writeln!(
                output,
                "- {} ({}) on {} by {}: score {:.0}, {:.1} hrs, consistency {:.0}/10 [{}]",
                record.metrics.name,
                record.learning_style,
                record.created_at.format("%Y-%m-%d"),
                record.owner.email,
                record.metrics.quiz_score,
                record.metrics.time_spent,
                record.metrics.consistency,
                record.id
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tests::record;
    use crate::models::LearningStyle;

    fn owner() -> Owner {
        Owner {
            user_id: "user-1".to_string(),
            email: "avery@example.com".to_string(),
        }
    }

    #[test]
    fn empty_report_has_placeholders() {
        let report = build_report(&owner(), Utc::now(), &[]);
        assert!(report.starts_with("# Learning Style Dashboard\n"));
        assert!(report.contains("- Total analyses: 0"));
        assert!(report.contains("Start analyzing to earn badges!"));
        assert!(!report.contains("## Smart Grouping"));
    }

    #[test]
    fn report_lists_groups_and_badges() {
        let records = vec![
            record("Avery", LearningStyle::FastLearner, 91.0, 8.0, 1),
            record("Sam", LearningStyle::SlowLearner, 45.0, 4.0, 2),
        ];
        let report = build_report(&owner(), Utc::now(), &records);
        assert!(report.contains("- Fast Learner: 1 students (avg quiz score 91.0)"));
        assert!(report.contains("| Day 2 | 91 | 80 |"));
        assert!(report.contains("**Talent Scout**"));
        assert!(report.contains("Avery can mentor Sam."));
    }

    #[test]
    fn analyses_name_who_submitted_them() {
        let records = vec![record("Avery", LearningStyle::FastLearner, 91.0, 8.0, 1)];
        let report = build_report(&owner(), Utc::now(), &records);
        let line = report
            .lines()
            .find(|line| line.starts_with("- Avery (Fast Learner)"))
            .unwrap();
        assert!(line.contains(" by avery@example.com: score 91, 5.0 hrs, consistency 8/10"));
    }
}
