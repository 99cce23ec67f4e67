use crate::analysis::normalize::Normalizer;
use sentimentcore::Category;
use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "love", "loving", "loved", "awesome", "amazing", "happy", "excellent",
    "fantastic", "nice", "best", "wonderful", "enjoy", "enjoyed", "like", "fun", "brilliant",
    "smooth", "fast", "win", "winning", "glad", "cool", "perfect", "thanks", "beautiful",
    "delightful", "impressive", "recommend", "solid", "stable",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "hated", "worst", "sad", "angry", "broken", "slow",
    "fail", "failed", "failing", "bug", "buggy", "crash", "crashed", "annoying", "horrible",
    "poor", "disappointed", "disappointing", "ugly", "useless", "lost", "down", "wrong",
    "late", "expensive", "sucks", "outage", "laggy",
];

const NEGATORS: &[&str] = &["not", "no", "never", "dont", "don't", "isnt", "isn't", "cant", "can't", "wasnt", "wasn't"];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "of", "to", "in", "on", "at", "for", "with", "is",
    "are", "was", "were", "be", "been", "it", "its", "this", "that", "these", "those", "i",
    "we", "you", "they", "he", "she", "me", "my", "our", "your", "their", "so", "just", "as",
    "by", "from", "about", "today", "again", "really", "very",
];

/// Outcome of scoring one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub score: i32,
    pub normalized: String,
}

/// Word-list classifier: positive words add one, negative words subtract
/// one, and a negator flips the polarity of the next scored word.
pub struct Analyzer {
    normalizer: Normalizer,
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negators: HashSet<&'static str>,
    stop_words: HashSet<&'static str>,
}

impl Analyzer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            normalizer: Normalizer::new()?,
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
            stop_words: STOP_WORDS.iter().copied().collect(),
        })
    }

    pub fn score_tokens(&self, tokens: &[String]) -> i32 {
        let mut score = 0;
        let mut negate = false;
        for token in tokens {
            let token = token.as_str();
            if self.negators.contains(token) {
                negate = true;
                continue;
            }
            let polarity = if self.positive.contains(token) {
                1
            } else if self.negative.contains(token) {
                -1
            } else {
                continue;
            };
            score += if negate { -polarity } else { polarity };
            negate = false;
        }
        score
    }

    pub fn classify(&self, text: &str) -> Classification {
        let normalized = self.normalizer.normalize(text);
        let tokens = self
            .normalizer
            .tokens(&normalized, |word| self.stop_words.contains(word));
        let score = self.score_tokens(&tokens);
        let category = match score {
            s if s > 0 => Category::Positive,
            s if s < 0 => Category::Negative,
            _ => Category::Neutral,
        };
        Classification {
            category,
            score,
            normalized,
        }
    }
}
