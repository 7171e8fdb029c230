use chrono::{DateTime, Local};
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;
use uuid::Uuid;

use crate::constants::{FETCH_FAILED_TEXT, NO_RESPONSE_TEXT};
use crate::history::Chat;
use crate::seo_client::SeoMessage;
use crate::theme::{ThemePreference, ThemeToggle};

/// One source link returned alongside an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseState {
    Pending,
    Received(String),
    Failed,
}

impl ResponseState {
    /// Text shown in the transcript for this state.
    pub fn display_text(&self) -> &str {
        match self {
            ResponseState::Pending => "...",
            ResponseState::Received(text) => text,
            ResponseState::Failed => FETCH_FAILED_TEXT,
        }
    }
}

/// One transcript row: a submitted query plus its eventual answer.
///
/// Entries carry a unique id assigned at creation and responses are matched
/// back by that id, so two identical queries in flight at the same time each
/// resolve their own row. Articles live on the entry for the same reason: a
/// resolving fetch writes only its own source list.
#[derive(Debug, Clone)]
pub struct QueryEntry {
    pub id: Uuid,
    pub query: String,
    pub submitted_at: DateTime<Local>,
    pub response: ResponseState,
    pub articles: Vec<Article>,
}

impl QueryEntry {
    pub fn new(query: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            query,
            submitted_at: Local::now(),
            response: ResponseState::Pending,
            articles: Vec::new(),
        }
    }
}

/// Which overlay, if any, sits on top of the query page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    None,
    History,
    Settings,
}

pub struct AppState {
    /// Append-only transcript, insertion order = display order.
    pub entries: Vec<QueryEntry>,
    pub textarea: TextArea<'static>,
    /// Latched off by the first accepted submission and never re-set,
    /// even if nothing else is on screen.
    pub first_query: bool,
    pub chats: Vec<Chat>,
    pub overlay: Overlay,
    /// Cursor within the settings radio list.
    pub settings_cursor: usize,
    pub theme: ThemeToggle,
    pub scroll_offset: u16,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            textarea: make_input_area(),
            first_query: true,
            chats: crate::history::seed_chats(),
            overlay: Overlay::None,
            settings_cursor: 0,
            theme: ThemeToggle::new(),
            scroll_offset: 0,
        }
    }

    /// Accept or reject the current input as a query.
    ///
    /// Whitespace-only input is a no-op. On accept the input is cleared, the
    /// example list is latched away, and a Pending entry is appended before
    /// any network activity happens. Returns the new entry's id and query so
    /// the caller can spawn the fetch.
    pub fn submit_query(&mut self) -> Option<(Uuid, String)> {
        let input = self.textarea.lines().join("\n").trim().to_string();
        if input.is_empty() {
            return None;
        }

        self.textarea = make_input_area();
        self.first_query = false;

        let entry = QueryEntry::new(input.clone());
        let id = entry.id;
        tracing::info!("Submitted query {}: {}", id, input);
        self.entries.push(entry);
        self.scroll_to_bottom();
        Some((id, input))
    }

    /// Put an example query into the input field. No entry, no request.
    pub fn use_example_query(&mut self, index: usize) {
        if let Some(example) = crate::constants::EXAMPLE_QUERIES.get(index) {
            self.textarea = make_input_area();
            self.textarea.insert_str(example);
        }
    }

    pub fn entry_mut(&mut self, id: Uuid) -> Option<&mut QueryEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Patch the owning entry with a settled fetch result.
    pub fn apply_seo_message(&mut self, msg: SeoMessage) {
        match msg {
            SeoMessage::Completed {
                entry_id,
                article,
                sources,
            } => {
                if let Some(entry) = self.entry_mut(entry_id) {
                    let text = article.unwrap_or_else(|| NO_RESPONSE_TEXT.to_string());
                    entry.response = ResponseState::Received(text);
                    entry.articles = sources;
                    tracing::info!("Entry {} resolved with {} sources", entry_id, entry.articles.len());
                } else {
                    tracing::error!("Completed fetch for unknown entry {}", entry_id);
                }
            }
            SeoMessage::Failed { entry_id, error } => {
                tracing::error!("Fetch for entry {} failed: {}", entry_id, error);
                // Articles stay whatever they were; only the answer changes.
                if let Some(entry) = self.entry_mut(entry_id) {
                    entry.response = ResponseState::Failed;
                }
            }
        }
    }

    pub fn toggle_overlay(&mut self, overlay: Overlay) {
        self.overlay = if self.overlay == overlay {
            Overlay::None
        } else {
            overlay
        };
        if self.overlay == Overlay::Settings {
            self.settings_cursor = match self.theme.preference() {
                ThemePreference::Light => 0,
                ThemePreference::Dark => 1,
                ThemePreference::System => 2,
            };
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        // Three rendered lines per entry (query, answer, spacer); the draw
        // code clamps against the viewport.
        self.scroll_offset = (self.entries.len() as u16).saturating_mul(3);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn make_input_area() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text("Ask a question...");
    textarea.set_block(Block::default().borders(Borders::ALL).title("Ask"));
    textarea
}
