use crate::generator::template::{phrases, SUBJECTS, TAGS};
use crate::workflow::runner::Pipeline;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use sentimentcore::Category;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the synthetic sentence feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Sentences emitted per second; zero disables the feed.
    pub rate_per_sec: f64,
    pub seed: u64,
    /// Relative weights for positive, negative and neutral sentences.
    pub weights: [f64; 3],
    /// Probability of appending a hashtag.
    pub tag_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rate_per_sec: 5.0,
            seed: 0,
            weights: [0.45, 0.25, 0.30],
            tag_probability: 0.3,
        }
    }
}

impl GeneratorConfig {
    pub fn period(&self) -> Option<Duration> {
        (self.rate_per_sec.is_finite() && self.rate_per_sec > 0.0)
            .then(|| Duration::from_secs_f64(1.0 / self.rate_per_sec))
    }
}

/// Seeded source of sentences with an intended sentiment.
pub struct SentenceGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl SentenceGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    fn pick_category(&mut self) -> Category {
        let weights = self.config.weights.map(|w| if w.is_finite() { w.max(0.0) } else { 0.0 });
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Category::Neutral;
        }
        let mut roll = self.rng.gen_range(0.0..total);
        for (category, weight) in Category::ALL.into_iter().zip(weights) {
            if roll < weight {
                return category;
            }
            roll -= weight;
        }
        Category::Neutral
    }

    /// Next sentence together with the sentiment it was written to carry.
    pub fn next_sentence(&mut self) -> (Category, String) {
        let category = self.pick_category();
        let subject = SUBJECTS.choose(&mut self.rng).copied().unwrap_or("It");
        let phrase = phrases(category).choose(&mut self.rng).copied().unwrap_or("happened");
        let mut sentence = format!("{subject} {phrase}");
        let tag_probability = if self.config.tag_probability.is_finite() {
            self.config.tag_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if self.rng.gen_bool(tag_probability) {
            if let Some(tag) = TAGS.choose(&mut self.rng) {
                sentence.push(' ');
                sentence.push_str(tag);
            }
        }
        (category, sentence)
    }
}

/// Feeds generated sentences into `pipeline` at the configured rate until
/// the task is dropped.
pub async fn run_feed(mut generator: SentenceGenerator, pipeline: Pipeline) {
    let Some(period) = generator.config.period() else {
        log::info!("[feed] disabled (rate 0)");
        return;
    };
    log::info!(
        "[feed] emitting {:.1} sentences/s (seed {})",
        generator.config.rate_per_sec,
        generator.config.seed
    );

    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let (_, sentence) = generator.next_sentence();
        if let Err(err) = pipeline.process(&sentence) {
            log::warn!("[feed] dropping generated sentence: {err:#}");
        }
    }
}
