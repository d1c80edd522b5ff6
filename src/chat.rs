use crate::models::{ChatReply, LearningStyle, ScheduleRow};

type Predicate = fn(&str) -> bool;
type Handler = fn(LearningStyle) -> ChatReply;

/// Intent routes, checked top to bottom against the lower-cased message.
const ROUTES: &[(Predicate, Handler)] = &[
    (asks_for_schedule, schedule_reply),
    (asks_for_efficiency, efficiency_reply),
];

const FALLBACK: &str = "I can provide you with a personalized study table or suggest the most \
efficient study methods for your learning style. Just ask!";

pub fn greeting(style: LearningStyle) -> String {
    format!(
        "Hi! I'm your AI Study Assistant. I see your learning profile is: **{}**. \
         How can I help you study better today?",
        style
    )
}

/// Answers a chat message for a student of the given style. Blank messages get
/// no reply.
pub fn respond(message: &str, style: LearningStyle) -> Option<ChatReply> {
    if message.trim().is_empty() {
        return None;
    }

    let query = message.to_lowercase();
    let reply = ROUTES
        .iter()
        .find(|(is_match, _)| is_match(&query))
        .map(|(_, handle)| handle(style))
        .unwrap_or_else(|| ChatReply {
            text: FALLBACK.to_string(),
            table: None,
        });

    Some(reply)
}

fn asks_for_schedule(query: &str) -> bool {
    ["table", "schedule", "timetable"]
        .iter()
        .any(|keyword| query.contains(keyword))
}

fn asks_for_efficiency(query: &str) -> bool {
    ["efficiency", "study well", "how to study"]
        .iter()
        .any(|keyword| query.contains(keyword))
}

fn schedule_reply(style: LearningStyle) -> ChatReply {
    ChatReply {
        text: format!(
            "Here is a personalized study schedule optimized for a **{}**:",
            style
        ),
        table: Some(study_table(style).to_vec()),
    }
}

fn efficiency_reply(style: LearningStyle) -> ChatReply {
    let text = match style {
        LearningStyle::FastLearner => {
            "To maximize your efficiency, use the **Feynman Technique**. Teach complex topics \
             to someone else to find your knowledge gaps. Also, try interleaving subjects to \
             keep your brain challenged."
        }
        LearningStyle::SlowLearner => {
            "Focus on **Concept Mapping**. Don't rush through chapters. Use visual aids to \
             connect new data to existing knowledge. Break topics into 10-minute blocks."
        }
        _ => {
            "The **Pomodoro Technique** combined with **Active Recall** is your best bet. \
             Study for 25 mins, break for 5. Always test yourself before you think you're ready."
        }
    };

    ChatReply {
        text: text.to_string(),
        table: None,
    }
}

const fn row(time: &'static str, activity: &'static str) -> ScheduleRow {
    ScheduleRow { time, activity }
}

pub fn study_table(style: LearningStyle) -> &'static [ScheduleRow; 4] {
    static FAST: [ScheduleRow; 4] = [
        row("08:00 AM", "Deep Work: Core Concepts"),
        row("10:00 AM", "Advanced Problem Solving"),
        row("12:00 PM", "Peer Mentoring / Teaching"),
        row("02:00 PM", "Exploratory Research"),
    ];
    static SLOW: [ScheduleRow; 4] = [
        row("09:00 AM", "Flashcard Review (Active Recall)"),
        row("10:30 AM", "Micro-learning: 1 Major Concept"),
        row("01:00 PM", "Visual Mapping Session"),
        row("03:00 PM", "Review & Quiz"),
    ];
    static ENGAGED: [ScheduleRow; 4] = [
        row("07:30 AM", "Morning Goal Setting"),
        row("09:00 AM", "Intensive Study Block"),
        row("12:00 PM", "Collaborative Project Work"),
        row("04:00 PM", "Daily Reflection & Planning"),
    ];
    static DISENGAGED: [ScheduleRow; 4] = [
        row("10:00 AM", "15-min Mini Sprint"),
        row("11:30 AM", "Gamified Quiz session"),
        row("02:00 PM", "Interactive Video Learning"),
        row("04:00 PM", "Review Progress & Reward"),
    ];
    static AVERAGE: [ScheduleRow; 4] = [
        row("09:00 AM", "Pomodoro Session (4 Cycles)"),
        row("11:30 AM", "Core Subject Review"),
        row("02:00 PM", "Structured Practice Test"),
        row("04:00 PM", "Summary Writing"),
    ];

    match style {
        LearningStyle::FastLearner => &FAST,
        LearningStyle::SlowLearner => &SLOW,
        LearningStyle::HighlyEngaged => &ENGAGED,
        LearningStyle::DisengagedLearner => &DISENGAGED,
        LearningStyle::AverageLearner => &AVERAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_keywords_return_the_style_table() {
        let reply = respond("Can I get a TIMETABLE?", LearningStyle::SlowLearner).unwrap();
        let table = reply.table.unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table[0].activity, "Flashcard Review (Active Recall)");
        assert!(reply.text.contains("**Slow Learner**"));
    }

    #[test]
    fn table_beats_efficiency_when_both_appear() {
        let reply = respond("give me a table for efficiency", LearningStyle::FastLearner).unwrap();
        assert!(reply.table.is_some());
        assert!(reply.text.starts_with("Here is a personalized study schedule"));
    }

    #[test]
    fn efficiency_advice_has_three_variants() {
        let fast = respond("how to study?", LearningStyle::FastLearner).unwrap();
        let slow = respond("How can I study well", LearningStyle::SlowLearner).unwrap();
        let other = respond("efficiency tips", LearningStyle::HighlyEngaged).unwrap();
        let average = respond("efficiency tips", LearningStyle::AverageLearner).unwrap();

        assert!(fast.text.contains("Feynman Technique"));
        assert!(slow.text.contains("Concept Mapping"));
        assert!(other.text.contains("Pomodoro Technique"));
        assert_eq!(other, average);
        assert!(fast.table.is_none());
    }

    #[test]
    fn unknown_intent_falls_back() {
        let reply = respond("hello there", LearningStyle::DisengagedLearner).unwrap();
        assert_eq!(reply.text, FALLBACK);
        assert!(reply.table.is_none());
    }

    #[test]
    fn blank_message_gets_no_reply() {
        assert!(respond("   ", LearningStyle::AverageLearner).is_none());
    }

    #[test]
    fn every_style_has_a_distinct_schedule() {
        let firsts: std::collections::HashSet<_> = LearningStyle::ALL
            .iter()
            .map(|style| study_table(*style)[0])
            .collect();
        assert_eq!(firsts.len(), LearningStyle::ALL.len());
    }
}
