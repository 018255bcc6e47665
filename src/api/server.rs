//! Crawl trigger endpoint
//!
//! `GET /crawl?stock=<ticker>&quarter=<label>` runs a full crawl as an
//! external process, then reassembles the resulting CSV files into a
//! JSON payload. The subprocess runs with no timeout, and the endpoint
//! carries no authentication or rate limiting - it is a thin trigger in
//! front of the crawler, not a public API.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::process::Command;
use tracing::{error, info};

use crate::config::Config;
use crate::services::aggregate;

#[derive(Debug, Deserialize)]
pub struct CrawlParams {
    pub stock: String,
    pub quarter: String,
}

pub fn router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/crawl", get(crawl_handler))
        .with_state(config)
}

/// Binds the listen address and serves the router until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = config.listen_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Crawl API listening on {}", addr);
    axum::serve(listener, router(Arc::new(config))).await?;
    Ok(())
}

async fn crawl_handler(
    State(config): State<Arc<Config>>,
    Query(params): Query<CrawlParams>,
) -> Json<Value> {
    info!("Crawl request: stock={} quarter={}", params.stock, params.quarter);

    // synchronous trigger: the response is built only after the crawler
    // process exits
    match Command::new(&config.crawler_command)
        .arg(&params.stock)
        .status()
        .await
    {
        Ok(status) if !status.success() => {
            error!("⚠️ Crawler exited with {}", status);
        }
        Err(e) => {
            error!("❌ Could not launch crawler '{}': {}", config.crawler_command, e);
        }
        _ => {}
    }

    let tables = aggregate::collect_tables(&config.output_root, &params.stock, &params.quarter);
    if tables.is_empty() {
        Json(json!({
            "message": format!(
                "No data found for ticker {} in period {}",
                params.stock, params.quarter
            )
        }))
    } else {
        Json(Value::Object(tables))
    }
}
