use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

use newsify::app_state::AppState;
use newsify::events::handle_key_event;
use newsify::theme::{spawn_ambient_detection, ThemePreference};
use newsify::ui;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the Newsify SEO answer service")]
struct Cli {
    /// Base URL of the Newsify API.
    #[arg(long, default_value_t = newsify::constants::NEWSIFY_API_URL.clone())]
    api_url: String,

    /// Skip ambient detection and start with this theme.
    #[arg(long, value_parser = ["light", "dark", "system"])]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Stdout belongs to the TUI, so logs go to a file.
    let file_appender = tracing_appender::rolling::never(".", "debug.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsify=debug".into()),
        )
        .init();

    info!("Starting Newsify TUI against {}", cli.api_url);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new();
    let res = run_app(&mut terminal, &mut app, &cli).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cli: &Cli,
) -> Result<()> {
    let (seo_tx, mut seo_rx) = mpsc::channel(100);
    let (theme_tx, mut theme_rx) = mpsc::channel(16);

    match cli.theme.as_deref() {
        Some("light") => app.theme.set_preference(ThemePreference::Light),
        Some("dark") => app.theme.set_preference(ThemePreference::Dark),
        Some("system") => app.theme.set_preference(ThemePreference::System),
        _ => spawn_ambient_detection(theme_tx.clone()),
    }

    loop {
        // Drain settled fetches and theme transitions before drawing.
        while let Ok(msg) = seo_rx.try_recv() {
            app.apply_seo_message(msg);
        }
        while let Ok(msg) = theme_rx.try_recv() {
            app.theme.handle_message(msg);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    let quit = handle_key_event(
                        app,
                        key,
                        &cli.api_url,
                        seo_tx.clone(),
                        theme_tx.clone(),
                    )
                    .await?;
                    if quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.scroll_up(3),
                    MouseEventKind::ScrollDown => app.scroll_down(3),
                    _ => {}
                },
                _ => {}
            }
        }
    }
}
