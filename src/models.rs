use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AdvisorError;

/// Identity of the user who owns stored analyses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engagement {
    Low,
    Medium,
    High,
}

impl Engagement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Engagement {
    type Err = AdvisorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(AdvisorError::invalid(
                "engagement",
                format!("must be low, medium or high, got {other:?}"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LearningStyle {
    #[serde(rename = "Fast Learner")]
    FastLearner,
    #[serde(rename = "Highly Engaged")]
    HighlyEngaged,
    #[serde(rename = "Slow Learner")]
    SlowLearner,
    #[serde(rename = "Disengaged Learner")]
    DisengagedLearner,
    #[serde(rename = "Average Learner")]
    #[default]
    AverageLearner,
}

impl LearningStyle {
    #[cfg(test)]
    pub const ALL: [LearningStyle; 5] = [
        Self::FastLearner,
        Self::HighlyEngaged,
        Self::SlowLearner,
        Self::DisengagedLearner,
        Self::AverageLearner,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FastLearner => "Fast Learner",
            Self::HighlyEngaged => "Highly Engaged",
            Self::SlowLearner => "Slow Learner",
            Self::DisengagedLearner => "Disengaged Learner",
            Self::AverageLearner => "Average Learner",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LearningStyle {
    type Err = AdvisorError;

    // Accepts "Fast Learner", "FastLearner", "fast-learner" and similar spellings.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "fastlearner" => Ok(Self::FastLearner),
            "highlyengaged" => Ok(Self::HighlyEngaged),
            "slowlearner" => Ok(Self::SlowLearner),
            "disengagedlearner" => Ok(Self::DisengagedLearner),
            "averagelearner" => Ok(Self::AverageLearner),
            _ => Err(AdvisorError::UnknownStyle(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentMetrics {
    pub name: String,
    pub time_spent: f64,
    pub quiz_score: f64,
    pub attempts: i32,
    pub engagement: Engagement,
    pub consistency: f64,
}

/// Metrics as they arrive from a form field or CSV cell, before coercion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetrics {
    pub name: Option<String>,
    pub time_spent: Option<String>,
    pub quiz_score: Option<String>,
    pub attempts: Option<String>,
    pub engagement: Option<String>,
    pub consistency: Option<String>,
}

impl RawMetrics {
    pub fn parse(&self) -> Result<StudentMetrics, AdvisorError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AdvisorError::invalid("name", "is required"))?
            .to_string();

        let time_spent = parse_number("time_spent", self.time_spent.as_deref())?;
        if time_spent < 0.0 {
            return Err(AdvisorError::invalid("time_spent", "must not be negative"));
        }

        let quiz_score = parse_number("quiz_score", self.quiz_score.as_deref())?;
        if !(0.0..=100.0).contains(&quiz_score) {
            return Err(AdvisorError::invalid(
                "quiz_score",
                "must be between 0 and 100",
            ));
        }

        let attempts_text = required("attempts", self.attempts.as_deref())?;
        let attempts: i32 = attempts_text.parse().map_err(|_| {
            AdvisorError::invalid("attempts", format!("is not a whole number: {attempts_text:?}"))
        })?;
        if attempts < 1 {
            return Err(AdvisorError::invalid("attempts", "must be at least 1"));
        }

        let engagement = match self.engagement.as_deref().map(str::trim) {
            None | Some("") => Engagement::Medium,
            Some(value) => value.parse()?,
        };

        let consistency = parse_number("consistency", self.consistency.as_deref())?;
        if !(1.0..=10.0).contains(&consistency) {
            return Err(AdvisorError::invalid(
                "consistency",
                "must be between 1 and 10",
            ));
        }

        Ok(StudentMetrics {
            name,
            time_spent,
            quiz_score,
            attempts,
            engagement,
            consistency,
        })
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, AdvisorError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AdvisorError::invalid(field, "is required"))
}

fn parse_number(field: &'static str, value: Option<&str>) -> Result<f64, AdvisorError> {
    let text = required(field, value)?;
    let number: f64 = text
        .parse()
        .map_err(|_| AdvisorError::invalid(field, format!("is not a number: {text:?}")))?;
    if !number.is_finite() {
        return Err(AdvisorError::invalid(field, "must be finite"));
    }
    Ok(number)
}

#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub owner: Owner,
    pub metrics: StudentMetrics,
    pub learning_style: LearningStyle,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Neutral,
    Mastered,
    Reviewing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    pub status: CardStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScheduleRow {
    pub time: &'static str,
    pub activity: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<ScheduleRow>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub score: f64,
    pub consistency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyGroup {
    pub mentor: String,
    pub students: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(time: &str, score: &str, attempts: &str, consistency: &str) -> RawMetrics {
        RawMetrics {
            name: Some("Avery Lee".to_string()),
            time_spent: Some(time.to_string()),
            quiz_score: Some(score.to_string()),
            attempts: Some(attempts.to_string()),
            engagement: Some("high".to_string()),
            consistency: Some(consistency.to_string()),
        }
    }

    #[test]
    fn parses_numeric_text() {
        let metrics = raw(" 4.5 ", "88", "2", "7").parse().unwrap();
        assert_eq!(metrics.time_spent, 4.5);
        assert_eq!(metrics.quiz_score, 88.0);
        assert_eq!(metrics.attempts, 2);
        assert_eq!(metrics.engagement, Engagement::High);
        assert_eq!(metrics.consistency, 7.0);
    }

    #[test]
    fn rejects_garbage_and_missing_numbers() {
        let err = raw("abc", "88", "2", "7").parse().unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::InvalidMetrics { field: "time_spent", .. }
        ));

        let err = raw("4", "", "2", "7").parse().unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::InvalidMetrics { field: "quiz_score", .. }
        ));

        let mut missing = raw("4", "88", "2", "7");
        missing.consistency = None;
        assert!(matches!(
            missing.parse().unwrap_err(),
            AdvisorError::InvalidMetrics { field: "consistency", .. }
        ));

        assert!(raw("NaN", "88", "2", "7").parse().is_err());
        assert!(raw("4", "88", "1.5", "7").parse().is_err());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(raw("-1", "88", "2", "7").parse().is_err());
        assert!(raw("4", "101", "2", "7").parse().is_err());
        assert!(raw("4", "88", "0", "7").parse().is_err());
        assert!(raw("4", "88", "2", "11").parse().is_err());
    }

    #[test]
    fn engagement_defaults_to_medium_when_absent() {
        let mut metrics = raw("4", "88", "2", "7");
        metrics.engagement = None;
        assert_eq!(metrics.parse().unwrap().engagement, Engagement::Medium);

        metrics.engagement = Some("extreme".to_string());
        assert!(metrics.parse().is_err());
    }

    #[test]
    fn styles_serialize_as_display_labels() {
        assert_eq!(
            serde_json::to_string(&LearningStyle::DisengagedLearner).unwrap(),
            "\"Disengaged Learner\""
        );
        assert_eq!(serde_json::to_string(&CardStatus::Mastered).unwrap(), "\"mastered\"");
    }

    #[test]
    fn style_labels_parse_in_several_spellings() {
        assert_eq!(
            "Fast Learner".parse::<LearningStyle>().unwrap(),
            LearningStyle::FastLearner
        );
        assert_eq!(
            "highly-engaged".parse::<LearningStyle>().unwrap(),
            LearningStyle::HighlyEngaged
        );
        assert_eq!(
            "SlowLearner".parse::<LearningStyle>().unwrap(),
            LearningStyle::SlowLearner
        );
        assert!("General".parse::<LearningStyle>().is_err());
        assert_eq!(LearningStyle::default(), LearningStyle::AverageLearner);
        for style in LearningStyle::ALL {
            assert_eq!(style.label().parse::<LearningStyle>().unwrap(), style);
        }
    }
}
