use std::sync::LazyLock;

use regex::Regex;

use crate::models::{CardStatus, Flashcard, LearningStyle};

pub const MAX_CARDS: usize = 10;

static LINK_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i) (?:is|are|was|were|refers to|means|defined as) ")
        .expect("link verb pattern is valid")
});

/// Builds question/answer cards from free text, one per sentence longer than ten
/// characters, keeping at most [`MAX_CARDS`].
pub fn extract(raw: &str) -> Vec<Flashcard> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(['.', '!', '?'])
        .filter(|fragment| fragment.trim().chars().count() > 10)
        .enumerate()
        .map(|(index, fragment)| card_for(index, fragment.trim()))
        .take(MAX_CARDS)
        .collect()
}

fn card_for(index: usize, sentence: &str) -> Flashcard {
    let parts: Vec<&str> = LINK_VERB.split(sentence).collect();

    let (front, back) = match (parts.first(), parts.last()) {
        (Some(subject), Some(definition)) if parts.len() >= 2 => {
            (format!("{subject}?"), definition.to_string())
        }
        _ => (format!("Concept {}", index + 1), sentence.to_string()),
    };

    Flashcard {
        front,
        back,
        status: CardStatus::Neutral,
    }
}

pub fn review_tip(style: LearningStyle) -> &'static str {
    match style {
        LearningStyle::FastLearner => "Focus on the \"Why\" behind each card to maintain speed.",
        LearningStyle::SlowLearner => {
            "Say the answer out loud before flipping the card for better retention."
        }
        _ => "Space your reviews: 1 hour, 1 day, then 1 week later.",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
    pub mastered: usize,
    pub reviewing: usize,
}

/// A generated set of cards being reviewed one at a time.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Flashcard>,
    current: usize,
    stats: ReviewStats,
}

impl Deck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        let mut stats = ReviewStats::default();
        for card in cards.iter() {
            match card.status {
                CardStatus::Mastered => stats.mastered += 1,
                CardStatus::Reviewing => stats.reviewing += 1,
                CardStatus::Neutral => {}
            }
        }

        Self {
            cards,
            current: 0,
            stats,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.current)
    }

    pub fn stats(&self) -> ReviewStats {
        self.stats
    }

    /// Share of cards marked mastered, between 0 and 1.
    pub fn progress(&self) -> f64 {
        if self.cards.is_empty() {
            0.0
        } else {
            self.stats.mastered as f64 / self.cards.len() as f64
        }
    }

    pub fn next(&mut self) {
        if !self.cards.is_empty() {
            self.current = (self.current + 1) % self.cards.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.cards.is_empty() {
            self.current = (self.current + self.cards.len() - 1) % self.cards.len();
        }
    }

    /// Records a review outcome for the current card and moves on unless the
    /// card is the last one.
    pub fn mark(&mut self, status: CardStatus) {
        let Some(card) = self.cards.get_mut(self.current) else {
            return;
        };

        match card.status {
            CardStatus::Mastered => self.stats.mastered -= 1,
            CardStatus::Reviewing => self.stats.reviewing -= 1,
            CardStatus::Neutral => {}
        }
        match status {
            CardStatus::Mastered => self.stats.mastered += 1,
            CardStatus::Reviewing => self.stats.reviewing += 1,
            CardStatus::Neutral => {}
        }
        card.status = status;

        if self.current + 1 < self.cards.len() {
            self.next();
        }
    }
}
