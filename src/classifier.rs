use tracing::debug;

use crate::error::AdvisorError;
use crate::models::{LearningStyle, RawMetrics, StudentMetrics};

/// Maps study metrics to a learning style. Rules are checked in order and the
/// first match wins; every comparison is strict.
///
/// `attempts` and `engagement` are carried for storage only and never consulted.
pub fn classify(metrics: &StudentMetrics) -> LearningStyle {
    let score = metrics.quiz_score;
    let time = metrics.time_spent;
    let consistency = metrics.consistency;

    if score > 85.0 && time < 5.0 {
        LearningStyle::FastLearner
    } else if score > 80.0 && (time > 8.0 || consistency > 8.0) {
        LearningStyle::HighlyEngaged
    } else if score < 60.0 && time > 8.0 {
        LearningStyle::SlowLearner
    } else if score < 50.0 || (time < 3.0 && score < 60.0) {
        LearningStyle::DisengagedLearner
    } else {
        LearningStyle::AverageLearner
    }
}

/// Coerces raw form input and classifies it. Nothing is classified when any
/// field fails to coerce.
pub fn classify_raw(raw: &RawMetrics) -> Result<(StudentMetrics, LearningStyle), AdvisorError> {
    let metrics = raw.parse()?;
    let style = classify(&metrics);
    debug!(
        name = %metrics.name,
        quiz_score = metrics.quiz_score,
        time_spent = metrics.time_spent,
        consistency = metrics.consistency,
        style = %style,
        "classified metrics"
    );
    Ok((metrics, style))
}
