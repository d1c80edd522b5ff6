use std::fmt::Write;

use crate::models::LearningStyle;

/// Renders a short markdown summary of `raw` shaped for the given style.
pub fn summarize(raw: &str, style: LearningStyle) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let sentences: Vec<&str> = raw
        .split('.')
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > 5)
        .collect();

    let mut output = String::new();

    match style {
        LearningStyle::FastLearner => {
            let _ = writeln!(output, "### Execution Summary (Conceptual)");
            let bullets: Vec<String> = sentences
                .iter()
                .take(3)
                .map(|sentence| format!("* **Key Principle**: {sentence}"))
                .collect();
            output.push_str(&bullets.join("\n"));
            output.push_str(
                "\n\n**Deep Dive Recommendation**: Connect these concepts to interdisciplinary applications.",
            );
        }
        LearningStyle::SlowLearner => {
            let _ = writeln!(output, "### Study Breakdown (Step-by-Step)");
            let steps: Vec<String> = sentences
                .iter()
                .take(4)
                .enumerate()
                .map(|(index, sentence)| {
                    format!("{n}. **Phase {n}**: {sentence}", n = index + 1)
                })
                .collect();
            output.push_str(&steps.join("\n"));
            output.push_str("\n\n**Visual Aid**: Try drawing a concept map for these 4 points.");
        }
        _ => {
            let _ = writeln!(output, "### Core Insights");
            let bullets: Vec<String> = sentences
                .iter()
                .take(4)
                .map(|sentence| format!("• {sentence}"))
                .collect();
            output.push_str(&bullets.join("\n"));
            output.push_str(
                "\n\n**Efficiency Tip**: Use the Pomodoro technique to review these points.",
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTES: &str = "Cells are the basic unit of life. DNA stores genetic information. \
                         Proteins perform most cellular work. Enzymes speed up reactions. \
                         Membranes control what enters the cell. Ok.";

    #[test]
    fn fast_learner_gets_three_key_principles() {
        let summary = summarize(NOTES, LearningStyle::FastLearner);
        assert!(summary.starts_with("### Execution Summary (Conceptual)\n"));
        assert_eq!(summary.matches("* **Key Principle**:").count(), 3);
        assert!(summary.contains("* **Key Principle**: Cells are the basic unit of life\n"));
        assert!(summary.ends_with("interdisciplinary applications."));
    }

    #[test]
    fn slow_learner_gets_numbered_phases() {
        let summary = summarize(NOTES, LearningStyle::SlowLearner);
        assert!(summary.contains("1. **Phase 1**: Cells are the basic unit of life"));
        assert!(summary.contains("4. **Phase 4**: Enzymes speed up reactions"));
        assert!(!summary.contains("Phase 5"));
        assert!(summary.contains("**Visual Aid**"));
    }

    #[test]
    fn other_styles_get_core_insights() {
        for style in [
            LearningStyle::AverageLearner,
            LearningStyle::HighlyEngaged,
            LearningStyle::DisengagedLearner,
        ] {
            let summary = summarize(NOTES, style);
            assert!(summary.starts_with("### Core Insights\n"));
            assert_eq!(summary.matches("• ").count(), 4);
            assert!(summary.contains("**Efficiency Tip**"));
        }
    }

    #[test]
    fn uses_only_available_sentences() {
        let summary = summarize(
            "Gravity pulls objects together. Light travels fast.",
            LearningStyle::SlowLearner,
        );
        assert!(summary.contains("2. **Phase 2**: Light travels fast"));
        assert!(!summary.contains("Phase 3"));
    }

    #[test]
    fn short_fragments_are_ignored() {
        let summary = summarize("Hi. Yes. Photons carry energy.", LearningStyle::AverageLearner);
        assert_eq!(summary.matches("• ").count(), 1);
        assert!(summary.contains("• Photons carry energy"));
    }

    #[test]
    fn blank_input_yields_empty_summary() {
        assert!(summarize("  \n ", LearningStyle::FastLearner).is_empty());
    }
}
