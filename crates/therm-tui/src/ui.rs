//! UI rendering for the Thermolog TUI

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use therm_chart::geometry::{AXIS_MAX_TEMP, AXIS_MIN_TEMP};

use crate::app::{App, DataSource};

/// Columns reserved for the y-axis labels and axis line.
const Y_AXIS_GUTTER: u16 = 3;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = layout(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_chart(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
}

fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Chart
            Constraint::Length(3), // Footer
        ])
        .split(area)
}

/// The chart region that maps to data coordinates.
///
/// Excludes the block border, the y-axis gutter and the x-axis label
/// rows. Mouse clicks are resolved against this rectangle.
pub fn plot_area(area: Rect) -> Rect {
    let chart = layout(area)[1];
    Rect {
        x: chart.x.saturating_add(1 + Y_AXIS_GUTTER),
        y: chart.y.saturating_add(1),
        width: chart.width.saturating_sub(2 + Y_AXIS_GUTTER),
        height: chart.height.saturating_sub(4),
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let source = match app.source {
        DataSource::Live => Span::styled("● live", Style::default().fg(Color::Green)),
        DataSource::Synthetic => Span::styled("● synthetic", Style::default().fg(Color::Yellow)),
        DataSource::Connecting => Span::styled("○ connecting", Style::default().fg(Color::DarkGray)),
    };

    let refresh = if app.refresh.enabled {
        Span::styled(
            format!("auto {}s", app.refresh.interval_secs),
            Style::default().fg(Color::Cyan),
        )
    } else {
        Span::styled("auto off", Style::default().fg(Color::DarkGray))
    };

    let device = app.device.clone().unwrap_or_else(|| "all devices".to_string());

    let latest = app
        .latest()
        .map(|p| format!("{:.2}°C at {}", p.temperature, p.time_label))
        .unwrap_or_else(|| "no readings".to_string());

    let header = Paragraph::new(Line::from(vec![
        Span::raw("  "),
        source,
        Span::raw("  │  "),
        refresh,
        Span::raw("  │  "),
        Span::styled(device, Style::default().fg(Color::White)),
        Span::raw("  │  "),
        Span::styled(latest, Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 🌡 THERMOLOG ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    );

    frame.render_widget(header, area);
}

fn draw_chart(frame: &mut Frame, app: &App, area: Rect) {
    let series: Vec<(f64, f64)> = app
        .points
        .iter()
        .map(|p| (p.index as f64, p.temperature))
        .collect();

    let selected: Vec<(f64, f64)> = app
        .selected()
        .map(|p| vec![(p.index as f64, p.temperature)])
        .unwrap_or_default();

    let mut datasets = vec![
        Dataset::default()
            .name("°C")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&series),
    ];
    if !selected.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Yellow))
                .data(&selected),
        );
    }

    // Oldest reading on the left edge, newest on the right.
    let x_max = app.points.len().saturating_sub(1).max(1) as f64;
    let x_labels = match app.points.as_slice() {
        [] => vec![],
        [only] => vec![Span::raw(only.time_label.clone())],
        [first, .., last] => vec![
            Span::raw(first.time_label.clone()),
            Span::raw(last.time_label.clone()),
        ],
    };

    let title = app.selected().map_or_else(
        || " Temperature ".to_string(),
        |p| format!(" {:.2}°C at {} [{}] ", p.temperature, p.time_label, p.device_id),
    );

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Green));
    if let Some(error) = &app.error {
        block = block.title_bottom(Line::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        ));
    }

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            // The axis is fixed; readings outside it plot out of view
            // rather than rescaling the chart.
            Axis::default()
                .bounds([AXIS_MIN_TEMP, AXIS_MAX_TEMP])
                .labels(vec![
                    Span::raw("20"),
                    Span::raw("30"),
                    Span::raw("40"),
                    Span::raw("50"),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let last_update = app
        .last_update
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("Last update: %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "No updates".to_string());

    let help = "  [Space] Auto  [i] Interval  [r] Refresh  [d] Device  [←→] Inspect  [q] Quit  ";

    let footer = Paragraph::new(Line::from(vec![
        Span::raw("  "),
        Span::styled(app.endpoint.clone(), Style::default().fg(Color::White)),
        Span::raw("  │  "),
        Span::styled(last_update, Style::default().fg(Color::DarkGray)),
        Span::raw("  │  "),
        Span::styled(help, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
