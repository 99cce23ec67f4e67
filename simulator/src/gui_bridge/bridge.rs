use crate::gui_bridge::model::SentimentStore;
use crate::workflow::runner::Pipeline;
use sentimentcore::Category;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock, RwLockReadGuard};
use warp::{http::StatusCode, Filter};

const MAX_SENTENCE_BYTES: u64 = 16 * 1024;

#[derive(Debug, Deserialize)]
struct CountsQuery {
    sentiments: Option<String>,
    #[serde(default = "default_count_seconds")]
    seconds: u64,
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    sentiment: String,
    #[serde(default = "default_recent_seconds")]
    seconds: u64,
    #[serde(default = "default_recent_limit")]
    limit: usize,
}

fn default_count_seconds() -> u64 {
    300
}

fn default_recent_seconds() -> u64 {
    300
}

fn default_recent_limit() -> usize {
    10
}

type Reply = warp::reply::WithStatus<warp::reply::Json>;

fn reply<T: Serialize>(body: &T, status: StatusCode) -> Reply {
    warp::reply::with_status(warp::reply::json(body), status)
}

fn read_store(
    store: &RwLock<SentimentStore>,
) -> Result<RwLockReadGuard<'_, SentimentStore>, Reply> {
    store.read().map_err(|_| {
        log::error!("[bridge] sentiment store lock poisoned");
        reply(
            &json!({"error": "store unavailable"}),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    })
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Splits `[negative,positive]`-style lists; bare comma lists work too.
fn parse_label_list(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|label| label.trim().trim_matches('"').to_string())
        .filter(|label| !label.is_empty())
        .collect()
}

fn counts_reply(store: &RwLock<SentimentStore>, query: CountsQuery) -> Reply {
    let store = match read_store(store) {
        Ok(store) => store,
        Err(reply) => return reply,
    };
    let labels = match query.sentiments.as_deref() {
        Some(raw) => parse_label_list(raw),
        None => Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
    };
    let now = now_millis();
    let mut body = Map::new();
    for label in labels {
        let count = label
            .parse::<Category>()
            .map(|category| store.count_since(category, query.seconds, now))
            .unwrap_or(0);
        body.insert(label, Value::from(count));
    }
    reply(&Value::Object(body), StatusCode::OK)
}

fn aggregates_reply(store: &RwLock<SentimentStore>) -> Reply {
    let store = match read_store(store) {
        Ok(store) => store,
        Err(reply) => return reply,
    };
    match store.totals() {
        Some(totals) => reply(&totals, StatusCode::OK),
        None => reply(
            &json!({"error": "No sentiments processed."}),
            StatusCode::NOT_FOUND,
        ),
    }
}

fn recent_reply(store: &RwLock<SentimentStore>, query: RecentQuery) -> Reply {
    let category = match query.sentiment.parse::<Category>() {
        Ok(category) => category,
        Err(err) => return reply(&json!({"error": err.to_string()}), StatusCode::BAD_REQUEST),
    };
    let store = match read_store(store) {
        Ok(store) => store,
        Err(reply) => return reply,
    };
    let mut body = Map::new();
    for (text, timestamp) in store.recent(category, query.seconds, query.limit, now_millis()) {
        body.insert(text, Value::from(timestamp));
    }
    reply(&Value::Object(body), StatusCode::OK)
}

fn sentence_reply(pipeline: &Pipeline, text: String) -> Reply {
    match pipeline.process(&text) {
        Ok(Some(classification)) => reply(
            &json!({"status": "ok", "sentiment": classification.category}),
            StatusCode::OK,
        ),
        Ok(None) => reply(
            &json!({"status": "ignored", "error": "empty sentence"}),
            StatusCode::BAD_REQUEST,
        ),
        Err(err) => {
            log::error!("[bridge] sentence error: {err:#}");
            reply(
                &json!({"status": "error"}),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

/// Dashboard-facing HTTP routes over `pipeline` and its store.
pub fn routes(
    pipeline: Pipeline,
) -> impl Filter<Extract = (Reply,), Error = warp::Rejection> + Clone {
    let store = pipeline.store();
    let store_filter = warp::any().map(move || store.clone());
    let pipeline_filter = warp::any().map(move || pipeline.clone());

    let counts = warp::path("counts")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<CountsQuery>())
        .and(store_filter.clone())
        .map(|query: CountsQuery, store: Arc<RwLock<SentimentStore>>| {
            counts_reply(&store, query)
        });

    let aggregates = warp::path("aggregates")
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .map(|store: Arc<RwLock<SentimentStore>>| aggregates_reply(&store));

    let recent = warp::path("sentiments")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<RecentQuery>())
        .and(store_filter)
        .map(|query: RecentQuery, store: Arc<RwLock<SentimentStore>>| {
            recent_reply(&store, query)
        });

    let sentence = warp::path("sentence")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_SENTENCE_BYTES))
        .and(warp::body::json::<String>())
        .and(pipeline_filter)
        .map(|text: String, pipeline: Pipeline| sentence_reply(&pipeline, text));

    counts.or(aggregates).unify().or(recent).unify().or(sentence).unify()
}

/// Serves the routes on `addr` until `shutdown` resolves.
pub async fn serve(
    pipeline: Pipeline,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let filter = routes(pipeline).with(warp::log("simulator::bridge"));
    let (bound, server) = warp::serve(filter).try_bind_with_graceful_shutdown(addr, shutdown)?;
    log::info!("[bridge] serving dashboard endpoints on http://{bound}");
    server.await;
    log::info!("[bridge] stopped");
    Ok(())
}
