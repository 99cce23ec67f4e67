use sentimentcore::snapshot::CategoryCounts;
use sentimentcore::Category;
use std::collections::{HashMap, VecDeque};

/// Seconds as a millisecond span, saturating at `i64::MAX`.
fn span_ms(seconds: u64) -> i64 {
    i64::try_from(seconds.saturating_mul(1000)).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    timestamp_ms: i64,
    text: String,
}

/// Classified sentences held for the dashboard endpoints: cumulative
/// totals plus a bounded, time-ordered log per category.
#[derive(Debug, Clone)]
pub struct SentimentStore {
    totals: CategoryCounts,
    log: HashMap<Category, VecDeque<Entry>>,
    retention_ms: i64,
    max_entries: usize,
    processed: u64,
}

impl SentimentStore {
    pub fn new(retention_secs: u64, max_entries: usize) -> Self {
        Self {
            totals: CategoryCounts::default(),
            log: HashMap::new(),
            retention_ms: span_ms(retention_secs),
            max_entries: max_entries.max(1),
            processed: 0,
        }
    }

    pub fn record(&mut self, category: Category, text: &str, now_ms: i64) {
        self.totals
            .set(category, self.totals.get(category).saturating_add(1));
        self.processed += 1;

        let entries = self.log.entry(category).or_default();
        entries.push_back(Entry {
            timestamp_ms: now_ms,
            text: text.to_string(),
        });
        while entries.len() > self.max_entries {
            entries.pop_front();
        }
        self.prune(now_ms);
    }

    fn prune(&mut self, now_ms: i64) {
        let cutoff = now_ms.saturating_sub(self.retention_ms);
        for entries in self.log.values_mut() {
            while entries.front().is_some_and(|entry| entry.timestamp_ms < cutoff) {
                entries.pop_front();
            }
        }
    }

    /// Cumulative totals, or `None` until the first sentence arrives.
    pub fn totals(&self) -> Option<CategoryCounts> {
        (self.processed > 0).then_some(self.totals)
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Sentences of `category` recorded within the last `seconds`.
    pub fn count_since(&self, category: Category, seconds: u64, now_ms: i64) -> u64 {
        let begin = now_ms.saturating_sub(span_ms(seconds));
        self.log
            .get(&category)
            .map(|entries| {
                entries
                    .iter()
                    .rev()
                    .take_while(|entry| entry.timestamp_ms >= begin)
                    .filter(|entry| entry.timestamp_ms <= now_ms)
                    .count() as u64
            })
            .unwrap_or(0)
    }

    /// Up to `limit` distinct sentences of `category` from the last
    /// `seconds`, newest first, with the time each was last seen.
    pub fn recent(&self, category: Category, seconds: u64, limit: usize, now_ms: i64) -> Vec<(String, i64)> {
        let begin = now_ms.saturating_sub(span_ms(seconds));
        let mut items: Vec<(String, i64)> = Vec::new();
        let Some(entries) = self.log.get(&category) else {
            return items;
        };
        for entry in entries.iter().rev() {
            if entry.timestamp_ms < begin || items.len() >= limit {
                break;
            }
            if entry.timestamp_ms > now_ms || items.iter().any(|(text, _)| *text == entry.text) {
                continue;
            }
            items.push((entry.text.clone(), entry.timestamp_ms));
        }
        items
    }
}

impl Default for SentimentStore {
    fn default() -> Self {
        Self::new(300, 10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_absent_until_first_record() {
        let mut store = SentimentStore::default();
        assert_eq!(store.totals(), None);
        store.record(Category::Positive, "great", 1_000);
        store.record(Category::Positive, "love it", 2_000);
        store.record(Category::Neutral, "ok", 2_000);

        let totals = store.totals().unwrap();
        assert_eq!(totals.positive, 2);
        assert_eq!(totals.negative, 0);
        assert_eq!(store.processed(), 3);
    }

    #[test]
    fn counts_respect_the_window() {
        let mut store = SentimentStore::default();
        for second in 0..30 {
            store.record(Category::Negative, "slow", second * 1_000);
        }
        assert_eq!(store.count_since(Category::Negative, 10, 29_000), 11);
        assert_eq!(store.count_since(Category::Positive, 10, 29_000), 0);
    }

    #[test]
    fn recent_is_newest_first_and_distinct() {
        let mut store = SentimentStore::default();
        store.record(Category::Positive, "first", 1_000);
        store.record(Category::Positive, "second", 2_000);
        store.record(Category::Positive, "first", 3_000);
        store.record(Category::Positive, "third", 4_000);

        let recent = store.recent(Category::Positive, 300, 10, 5_000);
        assert_eq!(
            recent,
            vec![
                ("third".to_string(), 4_000),
                ("first".to_string(), 3_000),
                ("second".to_string(), 2_000),
            ]
        );
        assert_eq!(store.recent(Category::Positive, 300, 2, 5_000).len(), 2);
    }

    #[test]
    fn huge_windows_cover_everything() {
        let mut store = SentimentStore::new(u64::MAX, 100);
        store.record(Category::Positive, "still here", 1_000_000);

        let now = 1_000_500;
        assert_eq!(store.count_since(Category::Positive, 300, now), 1);
        assert_eq!(store.count_since(Category::Positive, u64::MAX, now), 1);
        assert_eq!(
            store.recent(Category::Positive, u64::MAX, 10, now),
            vec![("still here".to_string(), 1_000_000)]
        );
    }

    #[test]
    fn retention_and_cap_bound_the_log() {
        let mut store = SentimentStore::new(5, 3);
        for second in 0..10 {
            store.record(Category::Neutral, &format!("n{second}"), second * 1_000);
        }
        let recent = store.recent(Category::Neutral, 300, 10, 9_000);
        let texts: Vec<&str> = recent.iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(texts, vec!["n9", "n8", "n7"]);
        assert_eq!(store.totals().unwrap().neutral, 10);

        store.record(Category::Positive, "later", 60_000);
        assert!(store.recent(Category::Neutral, 300, 10, 60_000).is_empty());
    }
}
