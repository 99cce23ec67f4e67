use crate::config::DashboardConfig;
use crate::prelude::{Category, FetchError, FetchResult};
use crate::snapshot::{AggregateSnapshot, CategoryCounts, CountSnapshot, SnapshotTable};
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;

/// Backend the dashboard polls.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Events per category observed over the last `seconds`.
    async fn counts(&self, categories: &[Category], seconds: u64) -> FetchResult<CountSnapshot>;
    /// Cumulative events per category.
    async fn aggregates(&self) -> FetchResult<AggregateSnapshot>;
    /// Most recent item labels for `category`.
    async fn recent(&self, category: Category) -> FetchResult<SnapshotTable>;
    /// Pushes a sentence into the backend's stream.
    async fn inject(&self, text: &str) -> FetchResult<()>;
}

/// `SentimentSource` over the backend's HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpSentimentSource {
    client: reqwest::Client,
    config: DashboardConfig,
}

impl HttpSentimentSource {
    pub fn new(config: &DashboardConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn get_body(&self, path: &str, query: &[(&str, String)]) -> FetchResult<Vec<u8>> {
        let response = self
            .client
            .get(self.config.endpoint(path))
            .header(CACHE_CONTROL, "no-cache")
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Renders categories as the bracketed list the counts endpoint expects.
pub fn category_list(categories: &[Category]) -> String {
    let names: Vec<&str> = categories.iter().map(|category| category.as_str()).collect();
    format!("[{}]", names.join(","))
}

#[async_trait]
impl SentimentSource for HttpSentimentSource {
    async fn counts(&self, categories: &[Category], seconds: u64) -> FetchResult<CountSnapshot> {
        let query = [
            ("sentiments", category_list(categories)),
            ("seconds", seconds.to_string()),
        ];
        let body = self.get_body("counts", &query).await?;
        Ok(CategoryCounts::from_slice(&body)?)
    }

    async fn aggregates(&self) -> FetchResult<AggregateSnapshot> {
        let body = self.get_body("aggregates", &[]).await?;
        Ok(CategoryCounts::from_slice(&body)?)
    }

    async fn recent(&self, category: Category) -> FetchResult<SnapshotTable> {
        let query = [("sentiment", category.as_str().to_string())];
        let body = self.get_body("sentiments", &query).await?;
        Ok(SnapshotTable::from_slice(category, &body)?)
    }

    async fn inject(&self, text: &str) -> FetchResult<()> {
        let response = self
            .client
            .post(self.config.endpoint("sentence"))
            .json(&text)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::Status(status.as_u16()))
        }
    }
}
