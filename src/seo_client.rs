use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::app_state::Article;

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    seo_optimized_article: Option<String>,
    retrieved_articles: Option<Vec<RetrievedArticle>>,
}

#[derive(Debug, Deserialize)]
struct RetrievedArticle {
    title: String,
    url: String,
}

/// What went wrong with a fetch. The UI collapses all of these into one
/// inline failure message; the variants exist so the log can say which leg
/// failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
}

/// Result of one fetch, reported back to the event loop over the channel.
#[derive(Debug, Clone)]
pub enum SeoMessage {
    Completed {
        entry_id: Uuid,
        /// None when the service replied without an article body.
        article: Option<String>,
        sources: Vec<Article>,
    },
    Failed {
        entry_id: Uuid,
        error: String,
    },
}

/// Ask the Newsify service for an answer to one query.
///
/// Exactly one POST per call, no retry, no timeout: a request that never
/// settles leaves its entry pending forever. The outcome goes to `tx` tagged
/// with the owning entry's id so out-of-order resolutions patch the right row.
pub async fn fetch_seo_content(
    base_url: &str,
    entry_id: Uuid,
    query: String,
    tx: mpsc::Sender<SeoMessage>,
) {
    tracing::info!("Fetching SEO content for entry {}: {}", entry_id, query);

    let msg = match generate_seo_content(base_url, query).await {
        Ok(response) => {
            let sources = response
                .retrieved_articles
                .unwrap_or_default()
                .into_iter()
                .map(|a| Article {
                    title: a.title,
                    url: a.url,
                })
                .collect();
            SeoMessage::Completed {
                entry_id,
                article: response.seo_optimized_article,
                sources,
            }
        }
        Err(e) => {
            tracing::error!("Newsify API error for entry {}: {}", entry_id, e);
            SeoMessage::Failed {
                entry_id,
                error: e.to_string(),
            }
        }
    };

    // Receiver dropping means the app is shutting down; nothing to do.
    let _ = tx.send(msg).await;
}

async fn generate_seo_content(
    base_url: &str,
    query: String,
) -> Result<GenerateResponse, FetchError> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/generate-seo-content", base_url))
        .json(&GenerateRequest { query })
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    Ok(response.json::<GenerateResponse>().await?)
}
