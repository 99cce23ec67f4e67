use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment label used to key every series, total and table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

impl Category {
    /// Fixed display and request order.
    pub const ALL: [Category; 3] = [Category::Positive, Category::Negative, Category::Neutral];

    /// Lowercase name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Neutral => "neutral",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Positive => "Positive",
            Category::Negative => "Negative",
            Category::Neutral => "Neutral",
        }
    }

    /// Chart color as an RGB triple.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Category::Positive => (0x46, 0x88, 0x47),
            Category::Negative => (0xb9, 0x4a, 0x48),
            Category::Neutral => (0x42, 0x8b, 0xca),
        }
    }

    pub fn color_hex(self) -> String {
        let (r, g, b) = self.color();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Category::Positive),
            "negative" => Ok(Category::Negative),
            "neutral" => Ok(Category::Neutral),
            _ => Err(UnknownCategory(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sentiment category: {0}")]
pub struct UnknownCategory(pub String);

/// A buffered sample paired with its synthesized timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

/// Everything the chart renderer needs for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub category: Category,
    pub label: &'static str,
    pub color: (u8, u8, u8),
    pub points: Vec<PlotPoint>,
}

/// Failure to turn a response body into a typed snapshot.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("expected a JSON object or array")]
    NotACollection,
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single backend request.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered with status {0}")]
    Status(u16),
    #[error("undecodable payload: {0}")]
    Decode(#[from] DecodeError),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Failure loading or validating a dashboard configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_wire_name() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(" Positive ".parse::<Category>().unwrap(), Category::Positive);
        assert!("angry".parse::<Category>().is_err());
    }

    #[test]
    fn category_colors_match_dashboard_palette() {
        assert_eq!(Category::Positive.color_hex(), "#468847");
        assert_eq!(Category::Negative.color_hex(), "#b94a48");
        assert_eq!(Category::Neutral.color_hex(), "#428bca");
    }
}
