pub mod app;
pub mod ports;
pub mod theme;
pub mod views;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::{Frame, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::client::HttpActivationApi;
use crate::config::config::Config;
use crate::core::confirmation::ConfirmationView;
use crate::core::route::Route;

use self::app::{Action, App, UiEvent, View};
use self::ports::{ChannelNavigator, ChannelNotifier};
use self::views::alert::render_alert;
use self::views::confirm::render_confirm;
use self::views::home::render_home;

pub fn render(f: &mut Frame, app: &App) {
    match app.view() {
        View::Confirmation => render_confirm(f, app),
        View::Home | View::NotFound => render_home(f, app),
    }
    render_alert(f, app);
}

pub async fn launch(config: &Config, route: Route) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let api = Arc::new(HttpActivationApi::new(config.api_url.clone(), config.timeout)?);
    let view = Arc::new(ConfirmationView::new(
        api,
        Arc::new(ChannelNavigator::new(tx.clone())),
        Arc::new(ChannelNotifier::new(tx.clone())),
        config.confirm_options(),
    ));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(page = route.title(), "terminal UI started");
    let res = run_loop(&mut terminal, App::new(route), view, tx, rx);

    // Restore terminal
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    terminal.show_cursor()?;

    res
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    view: Arc<ConfirmationView>,
    tx: mpsc::UnboundedSender<UiEvent>,
    mut rx: mpsc::UnboundedReceiver<UiEvent>,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(200);

    loop {
        while let Ok(ev) = rx.try_recv() {
            debug!(event = ?ev, "ui event");
            app.apply(ev);
        }

        terminal.draw(|f| render(f, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        if event::poll(timeout)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press {
                    match app.handle_key(k.code) {
                        Action::Quit => break Ok(()),
                        Action::Confirm => {
                            // The request runs in the background; the UI keeps drawing
                            let view = view.clone();
                            let token = app.token();
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                let attempt = view.confirm(token.as_ref()).await;
                                debug!(state = ?attempt.state, "confirmation settled");
                                let _ = tx.send(UiEvent::Settled);
                            });
                        }
                        Action::None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }
}
