use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use folio_core::{AppConfig, HttpRelay, Route, Section, SiteContent, SubmissionRelay, WaitlistClient};
use folio_tui::{
    app::{App, Command},
    event::{AppEvent, EventHandler, SubmitResult},
    input::handle_key_event,
    theme::load_theme,
    widgets,
};

type Backend = CrosstermBackend<io::Stdout>;

/// Network collaborators the UI hands submissions to
struct Outbox {
    relay: Arc<dyn SubmissionRelay>,
    waitlist: Arc<WaitlistClient>,
    tx: mpsc::UnboundedSender<SubmitResult>,
}

pub async fn run(config: Arc<AppConfig>, route: Route, section: Option<Section>) -> Result<()> {
    let content = SiteContent::load(config.content_path().as_deref())?;
    let theme = load_theme(&config.ui.theme);

    if config.relay.access_key.is_none() {
        tracing::warn!("No relay access key configured; contact messages will be rejected");
    }
    let relay: Arc<dyn SubmissionRelay> = Arc::new(HttpRelay::new(&config.relay)?);
    let waitlist = Arc::new(WaitlistClient::new(&config.relay)?);

    // Create channel for async submission results
    let (tx, mut rx) = mpsc::unbounded_channel::<SubmitResult>();
    let outbox = Outbox { relay, waitlist, tx };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Folio"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), content, theme);
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    let now = app.now_ms();
    app.start_at(route, section, now);
    tracing::info!(width = size.width, height = size.height, "Folio started");

    let result = main_loop(&mut terminal, &mut app, &outbox, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn main_loop(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    outbox: &Outbox,
    rx: &mut mpsc::UnboundedReceiver<SubmitResult>,
) -> Result<()> {
    let event_handler = EventHandler::with_animation_fps(app.config.ui.tick_rate_ms, app.config.ui.animation_fps);

    // Checked at the end of each iteration to pick the next poll interval
    let mut needs_fast_update = true;

    loop {
        // Process any completed submissions (non-blocking)
        while let Ok(result) = rx.try_recv() {
            let now = app.now_ms();
            app.apply_submit_result(result, now);
        }

        let now = app.now_ms();
        app.tick(now);

        terminal.draw(|frame| widgets::draw(frame, app, now))?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    let now = app.now_ms();
                    if let Some(command) = app.apply(action, now) {
                        dispatch(app, command, outbox);
                    }
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(width, height) => app.resize(width, height),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_animation(app.now_ms());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Run a command the UI asked for; submissions report back over the channel
fn dispatch(app: &mut App, command: Command, outbox: &Outbox) {
    match command {
        Command::SubmitContact(payload) => {
            let relay = outbox.relay.clone();
            let tx = outbox.tx.clone();
            tokio::spawn(async move {
                let result = relay.submit(&payload).await.map_err(|e| e.to_string());
                let _ = tx.send(SubmitResult::Contact(result));
            });
        }
        Command::SubmitWaitlist(submission) => {
            let client = outbox.waitlist.clone();
            let tx = outbox.tx.clone();
            tokio::spawn(async move {
                let result = client.post(&submission).await.map_err(|e| e.to_string());
                let _ = tx.send(SubmitResult::Waitlist(result));
            });
        }
        Command::Open(url) => {
            tracing::info!(url = %url, "Opening project link");
            if let Err(e) = open::that(url.as_str()) {
                tracing::warn!(error = %e, "Failed to open browser");
                app.status_message = Some(format!("Could not open browser: {}", e));
            }
        }
    }
}
