use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::app_state::{AppState, Overlay};
use crate::seo_client::{fetch_seo_content, SeoMessage};
use crate::theme::{ThemeMessage, ThemePreference};

const SETTINGS_CHOICES: [ThemePreference; 3] = [
    ThemePreference::Light,
    ThemePreference::Dark,
    ThemePreference::System,
];

/// Handle one key event. Returns true when the app should exit.
pub async fn handle_key_event(
    app: &mut AppState,
    key: KeyEvent,
    api_url: &str,
    seo_tx: mpsc::Sender<SeoMessage>,
    theme_tx: mpsc::Sender<ThemeMessage>,
) -> Result<bool> {
    // Overlays capture the keyboard while open.
    match app.overlay {
        Overlay::Settings => {
            handle_settings_key(app, key.code);
            return Ok(false);
        }
        Overlay::History => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                app.overlay = Overlay::None;
            }
            return Ok(false);
        }
        Overlay::None => {}
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Ok(true),
        (KeyCode::Esc, _) => return Ok(true),

        (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
            app.theme.toggle(theme_tx);
        }
        (KeyCode::Char('h'), KeyModifiers::CONTROL) => {
            app.toggle_overlay(Overlay::History);
        }
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            app.toggle_overlay(Overlay::Settings);
        }

        // Example shortcuts only exist before the first submission,
        // matching their visibility.
        (KeyCode::F(n @ 1..=4), _) if app.first_query => {
            app.use_example_query(n as usize - 1);
        }

        (KeyCode::PageUp, _) => app.scroll_up(5),
        (KeyCode::PageDown, _) => app.scroll_down(5),

        (KeyCode::Enter, KeyModifiers::SHIFT) => {
            app.textarea.insert_newline();
        }
        (KeyCode::Enter, _) => {
            // A pending fetch never blocks further submissions; each one
            // fires its own independent request.
            if let Some((entry_id, query)) = app.submit_query() {
                let base_url = api_url.to_string();
                tokio::spawn(async move {
                    fetch_seo_content(&base_url, entry_id, query, seo_tx).await;
                });
            }
        }

        _ => {
            app.textarea.input(Event::Key(key));
        }
    }

    Ok(false)
}

fn handle_settings_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Up => {
            app.settings_cursor = app.settings_cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            app.settings_cursor = (app.settings_cursor + 1).min(SETTINGS_CHOICES.len() - 1);
        }
        KeyCode::Enter => {
            let choice = SETTINGS_CHOICES[app.settings_cursor];
            tracing::info!("Settings: theme preference set to {:?}", choice);
            app.theme.set_preference(choice);
            app.overlay = Overlay::None;
        }
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn press(
        app: &mut AppState,
        event: KeyEvent,
    ) -> (bool, mpsc::Receiver<SeoMessage>) {
        let (seo_tx, seo_rx) = mpsc::channel(4);
        let (theme_tx, _theme_rx) = mpsc::channel(4);
        let quit = handle_key_event(app, event, "http://127.0.0.1:1", seo_tx, theme_tx)
            .await
            .unwrap();
        (quit, seo_rx)
    }

    #[tokio::test]
    async fn test_typing_reaches_textarea() {
        let mut app = AppState::new();
        press(&mut app, key(KeyCode::Char('h'))).await;
        press(&mut app, key(KeyCode::Char('i'))).await;
        assert_eq!(app.textarea.lines().join(""), "hi");
    }

    #[tokio::test]
    async fn test_enter_on_empty_input_sends_nothing() {
        let mut app = AppState::new();
        let (_, mut seo_rx) = press(&mut app, key(KeyCode::Enter)).await;
        assert!(app.entries.is_empty());
        assert!(seo_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_enter_submits_and_fires_request() {
        let mut app = AppState::new();
        app.textarea.insert_str("what is up");
        let (_, mut seo_rx) = press(&mut app, key(KeyCode::Enter)).await;

        assert_eq!(app.entries.len(), 1);
        // The endpoint is unreachable, so the spawned fetch reports a
        // failure tagged with the entry id.
        let msg = seo_rx.recv().await.unwrap();
        match msg {
            SeoMessage::Failed { entry_id, .. } => assert_eq!(entry_id, app.entries[0].id),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_example_shortcut_gated_by_first_query() {
        let mut app = AppState::new();
        press(&mut app, key(KeyCode::F(2))).await;
        assert_eq!(
            app.textarea.lines().join(""),
            crate::constants::EXAMPLE_QUERIES[1]
        );

        press(&mut app, key(KeyCode::Enter)).await;
        assert!(!app.first_query);

        // Shortcuts are gone along with the list.
        press(&mut app, key(KeyCode::F(3))).await;
        assert_eq!(app.textarea.lines().join(""), "");
    }

    #[tokio::test]
    async fn test_settings_overlay_selection() {
        let mut app = AppState::new();
        press(&mut app, ctrl('s')).await;
        assert_eq!(app.overlay, Overlay::Settings);
        // Cursor starts on the current preference, System.
        assert_eq!(app.settings_cursor, 2);

        press(&mut app, key(KeyCode::Up)).await;
        press(&mut app, key(KeyCode::Enter)).await;
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.theme.preference(), ThemePreference::Dark);
        assert_eq!(app.theme.applied_dark(), Some(true));
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = AppState::new();
        let (quit, _) = press(&mut app, ctrl('q')).await;
        assert!(quit);
        let (quit, _) = press(&mut app, key(KeyCode::Esc)).await;
        assert!(quit);

        // Esc with an overlay open closes it instead of quitting.
        press(&mut app, ctrl('h')).await;
        assert_eq!(app.overlay, Overlay::History);
        let (quit, _) = press(&mut app, key(KeyCode::Esc)).await;
        assert!(!quit);
        assert_eq!(app.overlay, Overlay::None);
    }
}
