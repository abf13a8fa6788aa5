//! therm-tui - Thermolog Terminal UI
//!
//! Read-only chart of recent temperature readings.
//! No mutations possible - purely observational.

mod app;
mod data;
mod events;
mod ui;

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::App;
use data::{DataClient, FetchTimer};
use events::{AppEvent, EventHandler, handle_key, handle_mouse};

#[derive(Parser)]
#[command(name = "therm-tui")]
#[command(about = "Thermolog Terminal UI - live temperature chart")]
#[command(version)]
struct Cli {
    /// Hub endpoint to fetch readings from
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    endpoint: String,

    /// Only chart readings from this device
    #[arg(long)]
    device: Option<String>,

    /// Number of readings to chart
    #[arg(long, default_value = "60")]
    points: u64,

    /// Enable demo mode with generated data
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging (to stderr, not the drawn terminal)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("therm_tui=debug".parse()?))
        .init();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run application
    let result = run_app(&mut terminal, cli).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cli: Cli,
) -> anyhow::Result<()> {
    let mut app = App::new(cli.endpoint.clone(), cli.device.clone());
    let tick_rate = Duration::from_millis(100);

    let mut event_handler = EventHandler::new(tick_rate);
    let mut timer = FetchTimer::new(event_handler.sender());
    let client = DataClient::new(&cli.endpoint, cli.points, event_handler.sender());

    // Initial load; later fetches come from the refresh timer or the
    // refresh key.
    if cli.demo {
        // Demo mode - stream generated data
        let tx = event_handler.sender();
        tokio::spawn(async move {
            run_demo_mode(tx).await;
        });
    } else {
        let initial = client.clone();
        let device = cli.device.clone();
        tokio::spawn(async move {
            initial.fetch(device).await;
        });
    }

    // Main loop
    while app.running {
        // Draw UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Handle events
        if let Some(event) = event_handler.next().await {
            match event {
                AppEvent::Key(key) => {
                    handle_key(&mut app, key);
                }
                AppEvent::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    handle_mouse(&mut app, mouse, area);
                }
                AppEvent::Resize(_, _) => {
                    // Terminal will redraw automatically
                }
                AppEvent::Tick => {
                    // Periodic tick - could update animations here
                }
                AppEvent::FetchDue => {
                    app.request_fetch();
                }
                AppEvent::DataUpdate(data_event) => {
                    data::apply_data_event(&mut app, data_event);
                }
            }

            let directives = app.take_directives();
            therm_chart::apply_directives(&mut timer, &directives);

            if app.take_fetch_request() {
                if cli.demo {
                    app.show_synthetic(data::placeholder_points(), None);
                } else {
                    let fetcher = client.clone();
                    let device = app.device.clone();
                    tokio::spawn(async move {
                        fetcher.fetch(device).await;
                    });
                }
            }
        }
    }

    Ok(())
}

/// Demo mode - generates placeholder data so the UI can be exercised
/// without a running hub
async fn run_demo_mode(tx: tokio::sync::mpsc::UnboundedSender<AppEvent>) {
    use events::DataEvent;

    let mut interval = tokio::time::interval(Duration::from_secs(2));

    loop {
        interval.tick().await;

        let points = data::placeholder_points();
        if tx.send(AppEvent::DataUpdate(DataEvent::Placeholder(points))).is_err() {
            break;
        }
    }
}
