use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_input::Input;

use crate::app::{App, Field};

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    Block::default().borders(Borders::ALL).title(title).border_style(style)
}

fn draw_input(f: &mut Frame, area: Rect, title: &str, input: &Input, focused: bool) {
    let widget = Paragraph::new(input.value()).block(field_block(title, focused));
    f.render_widget(widget, area);

    if focused {
        f.set_cursor(area.x + 1 + input.cursor() as u16, area.y + 1);
    }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_input(f, chunks[0], "TSV file", &app.path, app.focus == Field::Path);

    let mark = if app.has_header { "[x]" } else { "[ ]" };
    let header = Paragraph::new(format!("{mark} Has header"))
        .block(field_block("Header", app.focus == Field::Header));
    f.render_widget(header, chunks[1]);

    draw_input(
        f,
        chunks[2],
        "Number of files (distribute)",
        &app.count,
        app.focus == Field::Count,
    );

    let status = match &app.status {
        None => Line::from(Span::styled("Ready.", Style::default().fg(Color::DarkGray))),
        Some(notice) => {
            let (prefix, color) = if notice.is_success() {
                ("Success: ", Color::Green)
            } else {
                ("Error: ", Color::Red)
            };
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(notice.message()),
            ])
        }
    };
    let status = Paragraph::new(status)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[3]);

    let help = Paragraph::new(
        "Tab: next field  Space: toggle header  F2: split by key  F3: distribute to N  Ctrl+Q: quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[4]);
}
