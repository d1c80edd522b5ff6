use crate::models::LearningStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub title: &'static str,
    pub platform: &'static str,
    pub url: &'static str,
}

/// Study method and follow-up material suggested for a learning style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleInsight {
    pub method: &'static str,
    pub method_description: &'static str,
    pub focus: &'static str,
    pub efficiency: &'static str,
    pub path: [&'static str; 3],
    pub resources: [Resource; 2],
}

const fn resource(title: &'static str, platform: &'static str, url: &'static str) -> Resource {
    Resource {
        title,
        platform,
        url,
    }
}

pub fn insights(style: LearningStyle) -> &'static StyleInsight {
    static FAST: StyleInsight = StyleInsight {
        method: "Feynman Technique",
        method_description: "Explain concepts in simple terms as if teaching a child to identify gaps in your understanding.",
        focus: "Conceptual Depth & Interdisciplinary Links",
        efficiency: "92%",
        path: [
            "Quick review of basics",
            "Deep dive into advanced applications",
            "Peer teaching sessions",
        ],
        resources: [
            resource(
                "The Feynman Technique",
                "YouTube",
                "https://www.youtube.com/watch?v=tky4f9x_Vqw",
            ),
            resource(
                "Learning How to Learn",
                "Coursera",
                "https://www.coursera.org/learn/learning-how-to-learn",
            ),
        ],
    };
    static ENGAGED: StyleInsight = StyleInsight {
        method: "Active Production",
        method_description: "Create content, summaries, or flashcards as you learn to solidify knowledge through creation.",
        focus: "Consistency & Research Application",
        efficiency: "88%",
        path: [
            "Daily goal setting",
            "Participate in group discussions",
            "Build a project based on learnings",
        ],
        resources: [
            resource(
                "Deep Work Strategies",
                "YouTube",
                "https://www.youtube.com/watch?v=gT_5qz7H000",
            ),
            resource(
                "Creative Problem Solving",
                "Coursera",
                "https://www.coursera.org/learn/creative-problem-solving",
            ),
        ],
    };
    static SLOW: StyleInsight = StyleInsight {
        method: "Concept Mapping",
        method_description: "Use visual diagrams to connect new information with what you already know for better retention.",
        focus: "Foundational Mastery & Visual Aids",
        efficiency: "75%",
        path: [
            "Break topics into micro-tasks",
            "Use visual learning aids",
            "Frequent low-stakes testing",
        ],
        resources: [
            resource(
                "Mind Mapping Tutorial",
                "YouTube",
                "https://www.youtube.com/watch?v=5nTuScU70As",
            ),
            resource(
                "Mindshift: Learning Obstacles",
                "Coursera",
                "https://www.coursera.org/learn/mindshift",
            ),
        ],
    };
    static DISENGAGED: StyleInsight = StyleInsight {
        method: "Gamified Learning",
        method_description: "Turn your study sessions into a game with rewards and clear milestones to stay motivated.",
        focus: "Interest Discovery & Micro-Learning",
        efficiency: "45%",
        path: [
            "Set 10-minute timers",
            "Reward your progress",
            "Find real-world connections",
        ],
        resources: [
            resource(
                "Gamification in Education",
                "YouTube",
                "https://www.youtube.com/watch?v=mOssYTimQwM",
            ),
            resource(
                "Introduction to Psychology",
                "Coursera",
                "https://www.coursera.org/learn/introduction-psych",
            ),
        ],
    };
    static AVERAGE: StyleInsight = StyleInsight {
        method: "Spaced Repetition",
        method_description: "Review material at increasing intervals to move information from short-term to long-term memory.",
        focus: "Optimization & Habit Formation",
        efficiency: "65%",
        path: [
            "Establish a solid routine",
            "Focus on active recall",
            "Analyze your mistakes weekly",
        ],
        resources: [
            resource(
                "Spaced Repetition System",
                "YouTube",
                "https://www.youtube.com/watch?v=Z-zNHHpXoMM",
            ),
            resource(
                "Active Recall Guide",
                "YouTube",
                "https://www.youtube.com/watch?v=msn_8as4KOs",
            ),
        ],
    };

    match style {
        LearningStyle::FastLearner => &FAST,
        LearningStyle::HighlyEngaged => &ENGAGED,
        LearningStyle::SlowLearner => &SLOW,
        LearningStyle::DisengagedLearner => &DISENGAGED,
        LearningStyle::AverageLearner => &AVERAGE,
    }
}

/// Styles that get the general study-habit tips alongside their insight.
pub fn needs_improvement_tips(style: LearningStyle) -> bool {
    matches!(
        style,
        LearningStyle::AverageLearner
            | LearningStyle::DisengagedLearner
            | LearningStyle::SlowLearner
    )
}

pub fn recommendations(style: LearningStyle) -> Vec<&'static str> {
    let mut lines = Vec::new();
    match style {
        LearningStyle::FastLearner => lines.push("Provide advanced modules to keep them engaged."),
        LearningStyle::SlowLearner => {
            lines.push("Suggest breakdown of complex topics into smaller chunks.")
        }
        LearningStyle::HighlyEngaged => lines.push("Encourage peer mentoring roles."),
        _ => {}
    }
    if needs_improvement_tips(style) {
        lines.push("Focus on structured study plans and active recall.");
    }
    lines.push("Review consistency patterns weekly.");
    lines
}

pub const STUDY_TIPS: [(&str, &str); 3] = [
    (
        "Pomodoro Technique",
        "Study for 25 minutes, then take a 5-minute break. After 4 cycles, take a longer break.",
    ),
    (
        "Active Recall",
        "Don't just re-read. Test yourself immediately after studying.",
    ),
    (
        "Spaced Repetition",
        "Review material at increasing intervals (1 day, 3 days, 1 week).",
    ),
];
