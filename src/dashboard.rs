use std::collections::HashMap;

use crate::models::{AnalysisRecord, Badge, LearningStyle, StudyGroup, TrendPoint};

pub const TREND_WINDOW: usize = 7;
pub const CONSISTENT_THRESHOLD: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub fast_learners: usize,
    pub consistent: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleCount {
    pub style: LearningStyle,
    pub count: usize,
    pub avg_quiz_score: f64,
}

pub fn stats(records: &[AnalysisRecord]) -> DashboardStats {
    DashboardStats {
        total: records.len(),
        fast_learners: records
            .iter()
            .filter(|record| record.learning_style == LearningStyle::FastLearner)
            .count(),
        consistent: records
            .iter()
            .filter(|record| record.metrics.consistency > CONSISTENT_THRESHOLD)
            .count(),
    }
}

/// Latest analyses in chronological order. `records` must be newest first.
pub fn trend(records: &[AnalysisRecord]) -> Vec<TrendPoint> {
    records
        .iter()
        .take(TREND_WINDOW)
        .rev()
        .enumerate()
        .map(|(index, record)| TrendPoint {
            label: format!("Day {}", index + 1),
            score: record.metrics.quiz_score,
            consistency: record.metrics.consistency * 10.0,
        })
        .collect()
}

pub fn badges(stats: &DashboardStats) -> Vec<Badge> {
    let mut earned = Vec::new();
    if stats.total >= 1 {
        earned.push(Badge {
            name: "First Analysis",
            description: "Completed your first student analysis.",
        });
    }
    if stats.consistent >= 1 {
        earned.push(Badge {
            name: "Consistency King",
            description: "Found a student with 7+ consistency.",
        });
    }
    if stats.fast_learners >= 1 {
        earned.push(Badge {
            name: "Talent Scout",
            description: "Identified a Fast Learner.",
        });
    }
    earned
}

/// Pairs the first fast learner with up to three slow learners as a mentoring
/// group. Empty unless both styles are present.
pub fn smart_groups(records: &[AnalysisRecord]) -> Vec<StudyGroup> {
    let mentor = records
        .iter()
        .find(|record| record.learning_style == LearningStyle::FastLearner);
    let students: Vec<String> = records
        .iter()
        .filter(|record| record.learning_style == LearningStyle::SlowLearner)
        .take(3)
        .map(|record| record.metrics.name.clone())
        .collect();

    match mentor {
        Some(mentor) if !students.is_empty() => vec![StudyGroup {
            mentor: mentor.metrics.name.clone(),
            students,
        }],
        _ => Vec::new(),
    }
}

pub fn style_breakdown(records: &[AnalysisRecord]) -> Vec<StyleCount> {
    let mut map: HashMap<LearningStyle, (usize, f64)> = HashMap::new();

    for record in records {
        let entry = map.entry(record.learning_style).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.metrics.quiz_score;
    }

    let mut counts: Vec<StyleCount> = map
        .into_iter()
        .map(|(style, (count, total_score))| StyleCount {
            style,
            count,
            avg_quiz_score: total_score / count as f64,
        })
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.style.label().cmp(b.style.label())));
    counts
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Engagement, Owner, StudentMetrics};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    pub(crate) fn record(
        name: &str,
        style: LearningStyle,
        quiz_score: f64,
        consistency: f64,
        hours_ago: i64,
    ) -> AnalysisRecord {
        AnalysisRecord {
            id: Uuid::new_v4(),
            owner: Owner {
                user_id: "user-1".to_string(),
                email: "avery@example.com".to_string(),
            },
            metrics: StudentMetrics {
                name: name.to_string(),
                time_spent: 5.0,
                quiz_score,
                attempts: 1,
                engagement: Engagement::Medium,
                consistency,
            },
            learning_style: style,
            created_at: Utc::now() - Duration::hours(hours_ago),
        }
    }

    #[test]
    fn counts_fast_and_consistent_students() {
        let records = vec![
            record("Avery", LearningStyle::FastLearner, 92.0, 8.0, 1),
            record("Jules", LearningStyle::AverageLearner, 70.0, 7.0, 2),
            record("Kiara", LearningStyle::HighlyEngaged, 84.0, 9.0, 3),
        ];
        let stats = stats(&records);
        assert_eq!(
            stats,
            DashboardStats {
                total: 3,
                fast_learners: 1,
                consistent: 2
            }
        );
        let names: Vec<_> = badges(&stats).iter().map(|badge| badge.name).collect();
        assert_eq!(names, vec!["First Analysis", "Consistency King", "Talent Scout"]);
    }

    #[test]
    fn no_badges_without_analyses() {
        assert!(badges(&stats(&[])).is_empty());
    }

    #[test]
    fn trend_covers_latest_seven_oldest_first() {
        let records: Vec<_> = (0..10)
            .map(|n| {
                record(
                    &format!("Student {n}"),
                    LearningStyle::AverageLearner,
                    50.0 + n as f64,
                    5.0,
                    n,
                )
            })
            .collect();

        let points = trend(&records);
        assert_eq!(points.len(), TREND_WINDOW);
        assert_eq!(points[0].label, "Day 1");
        assert_eq!(points[0].score, 56.0);
        assert_eq!(points[6].score, 50.0);
        assert_eq!(points[6].consistency, 50.0);
    }

    #[test]
    fn groups_need_both_fast_and_slow_learners() {
        let only_fast = vec![record("Avery", LearningStyle::FastLearner, 90.0, 5.0, 1)];
        assert!(smart_groups(&only_fast).is_empty());

        let records = vec![
            record("Avery", LearningStyle::FastLearner, 90.0, 5.0, 1),
            record("Sam", LearningStyle::SlowLearner, 45.0, 5.0, 2),
            record("Noor", LearningStyle::SlowLearner, 40.0, 5.0, 3),
            record("Lee", LearningStyle::SlowLearner, 55.0, 5.0, 4),
            record("Ola", LearningStyle::SlowLearner, 52.0, 5.0, 5),
        ];
        let groups = smart_groups(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].mentor, "Avery");
        assert_eq!(groups[0].students, vec!["Sam", "Noor", "Lee"]);
    }

    #[test]
    fn breakdown_sorted_by_count() {
        let records = vec![
            record("A", LearningStyle::SlowLearner, 40.0, 5.0, 1),
            record("B", LearningStyle::SlowLearner, 50.0, 5.0, 2),
            record("C", LearningStyle::FastLearner, 90.0, 5.0, 3),
        ];
        let breakdown = style_breakdown(&records);
        assert_eq!(breakdown[0].style, LearningStyle::SlowLearner);
        assert_eq!(breakdown[0].count, 2);
        assert!((breakdown[0].avg_quiz_score - 45.0).abs() < 1e-9);
        assert_eq!(breakdown[1].count, 1);
    }
}
