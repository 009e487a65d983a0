//! UI rendering for the TUI

use batchscan::export::CSV_HEADER;
use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, TableState, Wrap,
    },
};

use super::app::{App, PopupKind};
use crate::cli::output::format_number;

const TITLE: &str = " Batch Code Scanner ";

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: title, input, batch information, table, status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new(TITLE)
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    draw_input(frame, app, chunks[1]);
    draw_summary(frame, app, chunks[2]);
    draw_table(frame, app, chunks[3]);
    draw_status(frame, app, chunks[4]);

    if let Some(popup) = &app.popup {
        let color = match popup.kind {
            PopupKind::Warning => Color::Yellow,
            PopupKind::Error => Color::Red,
        };
        let popup_area = centered_rect(60, 7, area);
        let body = Paragraph::new(vec![
            Line::from(popup.message.as_str()),
            Line::from(""),
            Line::from(Span::styled("[Enter] OK", Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", popup.title)),
        );
        frame.render_widget(Clear, popup_area);
        frame.render_widget(body, popup_area);
    }
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let mode_style = Style::default().fg(Color::Black).bg(Color::Cyan);
    let prompt = format!("  {}: ", app.mode.label());
    let line = Line::from(vec![
        Span::raw(" Scan Mode: "),
        Span::styled(format!(" {} ", app.mode.label()), mode_style),
        Span::styled(" [Tab]", Style::default().fg(Color::DarkGray)),
        Span::raw(prompt.clone()),
        Span::styled(app.input.as_str(), Style::default().fg(Color::White).bold()),
    ]);
    let input = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(input, area);

    if app.popup.is_none() {
        let used = " Scan Mode: ".len()
            + app.mode.label().len()
            + 2
            + " [Tab]".len()
            + prompt.len()
            + app.input.chars().count();
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(u16::try_from(used).unwrap_or(u16::MAX));
        if x < area.right().saturating_sub(1) {
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

fn draw_summary(frame: &mut Frame, app: &App, area: Rect) {
    let (batch, po, count) = match &app.summary {
        Some(summary) => (
            summary.batch_code.as_str(),
            summary.po_num.as_str(),
            format_number(summary.count),
        ),
        None => ("N/A", "N/A", "0".to_string()),
    };
    let value_style = Style::default().fg(Color::LightBlue).bold();
    let lines = vec![
        Line::from(vec![Span::raw(" Batch Code:           "), Span::styled(batch, value_style)]),
        Line::from(vec![Span::raw(" PO Number:            "), Span::styled(po, value_style)]),
        Line::from(vec![Span::raw(" Total Serial Numbers: "), Span::styled(count, value_style)]),
        Line::from(vec![
            Span::raw(" Last CSV:             "),
            Span::styled(
                app.last_export
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];
    let summary = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Batch Information "),
    );
    frame.render_widget(summary, area);
}

fn draw_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(
        CSV_HEADER
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Cyan).bold())),
    );
    let rows = app.records.iter().map(|record| {
        Row::new(vec![
            Cell::from(record.serial_num.as_str()),
            Cell::from(record.batch_code.as_str()),
            Cell::from(record.po_num.as_str()),
        ])
    });
    let widths = [
        Constraint::Percentage(34),
        Constraint::Percentage(33),
        Constraint::Percentage(33),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Serial Numbers in Batch "),
        );

    let mut state = TableState::default();
    if !app.records.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);

    if app.records.len() > area.height.saturating_sub(3) as usize {
        let mut scrollbar_state = ScrollbarState::new(app.records.len()).position(app.selected);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let status_style = if app.is_scanning() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let line = Line::from(vec![
        Span::styled(format!(" {}", app.status), status_style),
        Span::styled(
            "   [Enter] Scan  [Tab] Mode  [↑↓] Scroll  [Esc] Clear  [Ctrl+C] Quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let status = Paragraph::new(line).block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, area);
}

/// Rect of `percent_x` width and `height` rows centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = u32::from(area.width) * u32::from(percent_x.min(100)) / 100;
    let width = u16::try_from(width).unwrap_or(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
