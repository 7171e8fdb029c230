use newsify::theme::{ThemeMessage, ThemePreference, ThemeToggle};
use tokio::sync::mpsc;

#[tokio::test]
async fn test_full_toggle_cycle_light_to_dark_and_back() {
    let (tx, mut rx) = mpsc::channel(4);
    let mut toggle = ThemeToggle::new();

    // Ambient detection settles on light.
    toggle.handle_message(ThemeMessage::Detected { dark: false });
    assert_eq!(toggle.applied_dark(), Some(false));
    assert_eq!(toggle.indicator_dark(), Some(false));

    // Press: indicator flips at once, the palette only after the delayed
    // Apply message comes back through the loop.
    toggle.toggle(tx.clone());
    assert_eq!(toggle.indicator_dark(), Some(true));
    assert_eq!(toggle.applied_dark(), Some(false));

    toggle.handle_message(rx.recv().await.unwrap());
    assert_eq!(toggle.applied_dark(), Some(true));
    assert_eq!(toggle.preference(), ThemePreference::Dark);

    // Second press returns to light.
    toggle.toggle(tx);
    toggle.handle_message(rx.recv().await.unwrap());
    assert_eq!(toggle.applied_dark(), Some(false));
    assert_eq!(toggle.indicator_dark(), Some(false));
    assert_eq!(toggle.preference(), ThemePreference::Light);
}

#[tokio::test]
async fn test_unknown_state_renders_nothing_and_ignores_presses() {
    let (tx, mut rx) = mpsc::channel(4);
    let mut toggle = ThemeToggle::new();

    assert!(!toggle.is_known());
    toggle.toggle(tx);
    assert!(toggle.indicator_dark().is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_settings_choice_bypasses_toggle_delay() {
    let mut toggle = ThemeToggle::new();
    toggle.handle_message(ThemeMessage::Detected { dark: true });

    // Light/Dark from the settings overlay apply immediately.
    toggle.set_preference(ThemePreference::Light);
    assert_eq!(toggle.applied_dark(), Some(false));
    assert_eq!(toggle.indicator_dark(), Some(false));
    assert_eq!(toggle.preference(), ThemePreference::Light);

    toggle.set_preference(ThemePreference::Dark);
    assert_eq!(toggle.applied_dark(), Some(true));
}

#[test]
fn test_system_preference_resolves_through_detection() {
    // NEWSIFY_THEME pins ambient detection for the test.
    std::env::set_var("NEWSIFY_THEME", "light");
    let mut toggle = ThemeToggle::new();
    toggle.set_preference(ThemePreference::System);
    assert_eq!(toggle.preference(), ThemePreference::System);
    assert_eq!(toggle.applied_dark(), Some(false));
    std::env::remove_var("NEWSIFY_THEME");
}
