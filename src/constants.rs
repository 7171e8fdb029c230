// Constants, loaded from environment where it makes sense.

use std::env;

lazy_static::lazy_static! {
    pub static ref NEWSIFY_API_URL: String = env::var("NEWSIFY_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
}

/// Fallback answer when the service replies without an article body.
pub const NO_RESPONSE_TEXT: &str = "No response";

/// Inline message for any request that failed. Connect errors, bad statuses
/// and unparseable bodies are all surfaced the same way.
pub const FETCH_FAILED_TEXT: &str = "Failed to fetch response";

/// Delay between flipping the toggle indicator and applying the theme,
/// so the indicator transition is visible before the colors swap.
pub const THEME_APPLY_DELAY_MS: u64 = 300;

pub const EXAMPLE_QUERIES: [&str; 4] = [
    "What are the latest news for Uttar Pradesh?",
    "What is the capital of India?",
    "What is the capital of Uttar Pradesh?",
    "What is the most populated state in India?",
];
