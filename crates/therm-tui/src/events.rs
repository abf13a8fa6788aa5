//! Event handling for the Thermolog TUI

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use therm_chart::DisplayPoint;
use tokio::sync::mpsc;

/// Events consumed by the main loop
#[derive(Debug)]
pub enum AppEvent {
    /// Key press from the terminal
    Key(KeyEvent),
    /// Terminal mouse input
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Idle tick, emitted when no terminal event arrived
    Tick,
    /// The refresh timer fired
    FetchDue,
    /// Data update from a fetch
    DataUpdate(DataEvent),
}

/// Outcome of one fetch cycle
#[derive(Debug, Clone)]
pub enum DataEvent {
    /// Points fetched from the hub.
    Live(Vec<DisplayPoint>),
    /// Generated placeholder points.
    Placeholder(Vec<DisplayPoint>),
    /// The fetch failed.
    Failed(String),
    /// Device ids known to the hub.
    Devices(Vec<String>),
}

/// Bridges crossterm's blocking poll into the async event stream
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    _tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        // The poll loop lives on its own task; dropped receiver stops it
        tokio::spawn(async move {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if event_tx.send(AppEvent::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(Event::Mouse(mouse)) => {
                            if event_tx.send(AppEvent::Mouse(mouse)).is_err() {
                                break;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if event_tx.send(AppEvent::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                } else {
                    if event_tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self._tx.clone()
    }
}

/// Apply a key press to the app state
pub fn handle_key(app: &mut crate::app::App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.running = false;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char(' ') => {
            app.toggle_refresh();
        }
        KeyCode::Char('i') => {
            app.cycle_refresh_interval();
        }
        KeyCode::Char('r') => {
            app.request_fetch();
        }
        KeyCode::Char('d') => {
            app.cycle_device();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.select_prev();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.select_next();
        }
        KeyCode::Esc => {
            app.cursor = None;
        }
        _ => {}
    }
}

/// Handle mouse input
///
/// A left click inside the plot snaps the inspection cursor to the
/// nearest point by horizontal distance. Clicks far from every point
/// clear the cursor instead.
pub fn handle_mouse(app: &mut crate::app::App, mouse: MouseEvent, frame_area: Rect) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let plot = crate::ui::plot_area(frame_area);
    if app.points.is_empty() || plot.width < 2 {
        return;
    }
    let inside_x = mouse.column >= plot.x && mouse.column < plot.x + plot.width;
    let inside_y = mouse.row >= plot.y && mouse.row < plot.y + plot.height;
    if !inside_x || !inside_y {
        return;
    }

    let width = f64::from(plot.width - 1);
    let xs: Vec<f64> = therm_chart::polyline(&app.points, width, f64::from(plot.height))
        .into_iter()
        .map(|(x, _)| x)
        .collect();
    let pointer_x = f64::from(mouse.column - plot.x);
    app.cursor = therm_chart::hit_test(&xs, pointer_x);
}
