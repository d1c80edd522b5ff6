use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_QUESTION_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub answer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question_id: u32,
    pub selected: String,
}

const fn question(
    id: u32,
    question: &'static str,
    options: [&'static str; 4],
    answer: &'static str,
) -> Question {
    Question {
        id,
        question,
        options,
        answer,
    }
}

pub static QUESTION_BANK: [Question; 12] = [
    question(
        1,
        "How long is a standard Pomodoro study interval?",
        ["10 minutes", "25 minutes", "45 minutes", "60 minutes"],
        "25 minutes",
    ),
    question(
        2,
        "Which technique involves explaining a concept in simple terms?",
        ["Feynman Technique", "Cornell Notes", "SQ3R", "Mind Palace"],
        "Feynman Technique",
    ),
    question(
        3,
        "What does active recall ask you to do?",
        [
            "Re-read your notes",
            "Highlight key passages",
            "Retrieve information from memory",
            "Listen to lectures again",
        ],
        "Retrieve information from memory",
    ),
    question(
        4,
        "Spaced repetition mainly fights which effect?",
        ["Forgetting curve", "Halo effect", "Placebo effect", "Serial position"],
        "Forgetting curve",
    ),
    question(
        5,
        "Which tool connects ideas visually around a central topic?",
        ["Flashcard", "Concept map", "Outline", "Timeline"],
        "Concept map",
    ),
    question(
        6,
        "Mixing different subjects within one session is called?",
        ["Blocking", "Cramming", "Interleaving", "Skimming"],
        "Interleaving",
    ),
    question(
        7,
        "How many hours of sleep support memory consolidation for most students?",
        ["4-5 hours", "5-6 hours", "7-8 hours", "10-11 hours"],
        "7-8 hours",
    ),
    question(
        8,
        "After how many Pomodoro cycles should you take a longer break?",
        ["2", "3", "4", "6"],
        "4",
    ),
    question(
        9,
        "Which note-taking system splits the page into cues, notes and summary?",
        ["Cornell", "Zettelkasten", "Bullet journal", "Outline"],
        "Cornell",
    ),
    question(
        10,
        "Testing yourself before you feel ready is an example of?",
        ["Passive review", "Desirable difficulty", "Multitasking", "Rote copying"],
        "Desirable difficulty",
    ),
    question(
        11,
        "Which habit best predicts long-term retention?",
        [
            "Last-minute cramming",
            "Consistent daily review",
            "Studying with music",
            "Reading faster",
        ],
        "Consistent daily review",
    ),
    question(
        12,
        "A short, focused study burst for disengaged learners is often called a?",
        ["Marathon", "Mini sprint", "Deep dive", "Retrospective"],
        "Mini sprint",
    ),
];

/// Shuffles the bank and returns the first `count` questions.
pub fn pick_questions<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<&'static Question> {
    let mut questions: Vec<&'static Question> = QUESTION_BANK.iter().collect();
    questions.shuffle(rng);
    questions.truncate(count);
    questions
}

pub fn find_question(id: u32) -> Option<&'static Question> {
    QUESTION_BANK.iter().find(|question| question.id == id)
}

/// Counts answers that match the bank's answer, ignoring case. Answers to
/// unknown question ids score nothing.
pub fn score(answers: &[Answer]) -> usize {
    answers
        .iter()
        .filter(|answer| {
            find_question(answer.question_id)
                .map(|question| question.answer.to_lowercase() == answer.selected.to_lowercase())
                .unwrap_or(false)
        })
        .count()
}

pub fn verdict(score: usize) -> &'static str {
    match score {
        8.. => "Outstanding! You're a genius.",
        5..=7 => "Good effort! Keep learning.",
        _ => "Keep practicing to improve.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn answer(question_id: u32, selected: &str) -> Answer {
        Answer {
            question_id,
            selected: selected.to_string(),
        }
    }

    #[test]
    fn picks_distinct_questions_up_to_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_questions(DEFAULT_QUESTION_COUNT, &mut rng);
        assert_eq!(picked.len(), DEFAULT_QUESTION_COUNT);

        let ids: std::collections::HashSet<u32> = picked.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), DEFAULT_QUESTION_COUNT);

        let all = pick_questions(50, &mut rng);
        assert_eq!(all.len(), QUESTION_BANK.len());
    }

    #[test]
    fn scoring_is_case_insensitive_exact_match() {
        let answers = vec![
            answer(1, "25 MINUTES"),
            answer(2, "feynman technique"),
            answer(3, "Re-read your notes"),
            answer(99, "anything"),
            answer(8, "4 "),
        ];
        assert_eq!(score(&answers), 2);
    }

    #[test]
    fn every_answer_is_one_of_its_options() {
        for question in QUESTION_BANK.iter() {
            assert!(question.options.contains(&question.answer), "{}", question.id);
        }
    }

    #[test]
    fn verdict_tiers() {
        assert_eq!(verdict(10), "Outstanding! You're a genius.");
        assert_eq!(verdict(8), "Outstanding! You're a genius.");
        assert_eq!(verdict(5), "Good effort! Keep learning.");
        assert_eq!(verdict(4), "Keep practicing to improve.");
    }
}
