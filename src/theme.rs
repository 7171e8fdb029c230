use std::env;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::constants::THEME_APPLY_DELAY_MS;

/// What the user asked for. `System` defers to ambient detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, Copy)]
pub enum ThemeMessage {
    /// Ambient detection settled.
    Detected { dark: bool },
    /// Delayed apply fired after a toggle press.
    Apply { dark: bool },
}

/// Two-state toggle over light/dark with a cosmetic delay.
///
/// Pressing the toggle flips the indicator immediately so its transition is
/// visible, then the actual palette change arrives `THEME_APPLY_DELAY_MS`
/// later as a `ThemeMessage::Apply` on the event loop. Until ambient
/// detection settles both fields are None and the control renders nothing,
/// which avoids flashing the wrong palette on startup.
pub struct ThemeToggle {
    preference: ThemePreference,
    applied_dark: Option<bool>,
    indicator_dark: Option<bool>,
}

impl ThemeToggle {
    pub fn new() -> Self {
        Self {
            preference: ThemePreference::System,
            applied_dark: None,
            indicator_dark: None,
        }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// The palette currently in effect, None while detection is pending.
    pub fn applied_dark(&self) -> Option<bool> {
        self.applied_dark
    }

    /// What the toggle control shows, ahead of the applied palette.
    pub fn indicator_dark(&self) -> Option<bool> {
        self.indicator_dark
    }

    pub fn is_known(&self) -> bool {
        self.applied_dark.is_some()
    }

    /// Flip the toggle. No-op while the initial state is still unknown.
    pub fn toggle(&mut self, tx: mpsc::Sender<ThemeMessage>) {
        let Some(current) = self.indicator_dark else {
            tracing::debug!("Theme toggle pressed before detection settled, ignoring");
            return;
        };
        let dark = !current;
        self.indicator_dark = Some(dark);
        tracing::info!("Theme toggle pressed, indicator now dark={}", dark);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(THEME_APPLY_DELAY_MS)).await;
            let _ = tx.send(ThemeMessage::Apply { dark }).await;
        });
    }

    /// Settings overlay selection. Light and Dark apply immediately; the
    /// cosmetic delay belongs to the toggle only. System re-runs detection.
    pub fn set_preference(&mut self, preference: ThemePreference) {
        self.preference = preference;
        match preference {
            ThemePreference::Light => self.set_applied(false),
            ThemePreference::Dark => self.set_applied(true),
            ThemePreference::System => self.set_applied(detect_ambient_dark()),
        }
    }

    pub fn handle_message(&mut self, msg: ThemeMessage) {
        match msg {
            ThemeMessage::Detected { dark } => {
                // A detection result never overrides an explicit choice made
                // while it was in flight.
                if self.applied_dark.is_none() {
                    tracing::info!("Ambient theme detected: dark={}", dark);
                    self.set_applied(dark);
                }
            }
            ThemeMessage::Apply { dark } => {
                tracing::info!("Applying theme: dark={}", dark);
                self.preference = if dark {
                    ThemePreference::Dark
                } else {
                    ThemePreference::Light
                };
                self.set_applied(dark);
            }
        }
    }

    fn set_applied(&mut self, dark: bool) {
        self.applied_dark = Some(dark);
        self.indicator_dark = Some(dark);
    }
}

impl Default for ThemeToggle {
    fn default() -> Self {
        Self::new()
    }
}

/// Kick off ambient detection; the result lands on the event loop like any
/// other message.
pub fn spawn_ambient_detection(tx: mpsc::Sender<ThemeMessage>) {
    tokio::spawn(async move {
        let dark = detect_ambient_dark();
        let _ = tx.send(ThemeMessage::Detected { dark }).await;
    });
}

/// Best-effort guess at the terminal's palette: explicit NEWSIFY_THEME wins,
/// then the conventional COLORFGBG hint, else dark.
pub fn detect_ambient_dark() -> bool {
    if let Ok(value) = env::var("NEWSIFY_THEME") {
        match value.to_lowercase().as_str() {
            "light" => return false,
            "dark" => return true,
            _ => {}
        }
    }
    if let Ok(value) = env::var("COLORFGBG") {
        return colorfgbg_is_dark(&value).unwrap_or(true);
    }
    true
}

/// COLORFGBG looks like "15;0" (foreground;background). Backgrounds 0..=6
/// and 8 are the dark half of the classic 16-color palette.
fn colorfgbg_is_dark(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg <= 6 || bg == 8)
}
