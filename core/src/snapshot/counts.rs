use crate::prelude::{Category, DecodeError};
use serde::Serialize;
use serde_json::Value;

/// Per-category integer counts decoded from a backend response.
///
/// Fields that are absent or not numeric decode to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

/// Counts observed over the interpolation window.
pub type CountSnapshot = CategoryCounts;

/// Cumulative counts since the backend started.
pub type AggregateSnapshot = CategoryCounts;

impl CategoryCounts {
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Positive => self.positive,
            Category::Negative => self.negative,
            Category::Neutral => self.neutral,
        }
    }

    pub fn set(&mut self, category: Category, count: u64) {
        match category {
            Category::Positive => self.positive = count,
            Category::Negative => self.negative = count,
            Category::Neutral => self.neutral = count,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.negative)
            .saturating_add(self.neutral)
    }

    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let object = value.as_object().ok_or(DecodeError::NotAnObject)?;
        let mut counts = Self::default();
        for category in Category::ALL {
            counts.set(category, coerce_count(object.get(category.as_str())));
        }
        Ok(counts)
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(&value)
    }
}

fn coerce_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(non_negative))
            .unwrap_or(0),
        Some(Value::String(text)) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(non_negative))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn non_negative(value: f64) -> Option<u64> {
    (value.is_finite() && value > 0.0).then(|| value.trunc() as u64)
}

/// Totals row shown under the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayTotals {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub all: u64,
}

impl From<&AggregateSnapshot> for DisplayTotals {
    fn from(snapshot: &AggregateSnapshot) -> Self {
        Self {
            positive: snapshot.positive,
            negative: snapshot.negative,
            neutral: snapshot.neutral,
            all: snapshot.total(),
        }
    }
}

/// Shortens large counts to whole thousands, e.g. `25_400` becomes `"25K"`.
pub fn abbreviate_count(count: u64) -> String {
    if count < 1000 {
        count.to_string()
    } else {
        format!("{}K", count / 1000)
    }
}
