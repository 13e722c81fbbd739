//! Frame rendering: wheel panel, roster/history/class panes, input box and
//! status line. All selection logic lives in the engine; this module only
//! reads state and draws it.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::app::{App, InputMode, Pane};

const FOCUS_BORDER: Color = Color::Cyan;

pub fn draw(f: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer[0]);

    draw_wheel(f, app, main[0]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
        ])
        .split(main[1]);

    draw_roster(f, app, sidebar[0]);
    draw_history(f, app, sidebar[1]);
    draw_classes(f, app, sidebar[2]);
    draw_input(f, app, outer[1]);
    draw_status(f, app, outer[2]);
}

fn draw_wheel(f: &mut Frame, app: &App, area: Rect) {
    let engine = &app.engine;
    let available = engine.available();
    let selected = engine.selected_index();

    let mut lines: Vec<Line> = Vec::new();

    let selected_line = match engine.selected_entry() {
        Some(name) => Line::from(vec![
            Span::raw("Selected: "),
            Span::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        None => Line::from(Span::styled(
            "Selected: —",
            Style::default().fg(Color::DarkGray),
        )),
    };
    lines.push(selected_line);

    let degrees = engine.rotation().to_degrees().rem_euclid(360.0);
    let state_span = if engine.is_spinning() {
        Span::styled(
            "SPINNING",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("press s to spin", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(vec![
        Span::raw(format!("Rotation: {:6.1}°   ", degrees)),
        state_span,
        Span::raw("   no-repeat: "),
        Span::raw(if engine.no_repeat() { "on" } else { "off" }),
    ]));
    lines.push(Line::raw(""));

    if engine.roster().is_empty() {
        lines.push(Line::from(Span::styled(
            "Add names to begin (press a)",
            Style::default().fg(Color::DarkGray),
        )));
    } else if available.is_empty() {
        lines.push(Line::from(Span::styled(
            "No names left to draw: reset (r) or load a class",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for (i, name) in available.iter().enumerate() {
            let is_selected = selected == Some(i);
            let marker = if is_selected { "▶ " } else { "  " };
            let shown: String = name.chars().take(16).collect();
            let mut style = Style::default().fg(app.config.segment_color(i, is_selected));
            if is_selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(shown, style),
            ]));
        }
    }

    let block = Block::default().borders(Borders::ALL).title("Wheel");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_roster(f: &mut Frame, app: &mut App, area: Rect) {
    let show_drawn = app.config.wheel.show_drawn;
    let items: Vec<ListItem> = app
        .engine
        .roster()
        .entries()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let drawn = app.engine.roster().is_drawn(name);
            let text = if drawn && show_drawn {
                format!("{:>2}. {} ✓", i + 1, name)
            } else {
                format!("{:>2}. {}", i + 1, name)
            };
            let style = if drawn && show_drawn {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(text, style))
        })
        .collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Names ({})", app.engine.roster().len()));
    if app.focus == Pane::Roster {
        block = block.border_style(Style::default().fg(FOCUS_BORDER));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut app.roster_state);
}

fn draw_history(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .engine
        .roster()
        .history()
        .iter()
        .enumerate()
        .map(|(i, name)| ListItem::new(format!("{:>2}. {}", i + 1, name)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("History ({})", app.engine.roster().history().len()));
    f.render_widget(List::new(items).block(block), area);
}

fn draw_classes(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .engine
        .classes()
        .names()
        .map(|name| {
            let detail = app
                .engine
                .classes()
                .get(name)
                .map(|class| format!("{} · {} names · {}", name, class.entries.len(), class.saved_at))
                .unwrap_or_else(|| name.to_string());
            ListItem::new(detail)
        })
        .collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Classes ({})", app.engine.classes().len()));
    if app.focus == Pane::Classes {
        block = block.border_style(Style::default().fg(FOCUS_BORDER));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut app.classes_state);
}

fn draw_input(f: &mut Frame, app: &mut App, area: Rect) {
    match app.mode {
        InputMode::ClassName => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(FOCUS_BORDER))
                .title("Class name (Enter to save, Esc to cancel)");
            app.class_input.set_block(block);
            f.render_widget(&app.class_input, area);
        }
        _ => {
            let mut block = Block::default()
                .borders(Borders::ALL)
                .title("Names (a to type, Enter to add, Esc to leave)");
            if app.mode == InputMode::AddingNames {
                block = block.border_style(Style::default().fg(FOCUS_BORDER));
            }
            app.name_input.set_block(block);
            f.render_widget(&app.name_input, area);
        }
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = if let InputMode::Confirm(action) = &app.mode {
        Line::from(Span::styled(
            action.prompt(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else if let Some(status) = &app.status {
        Line::from(Span::raw(status.clone()))
    } else {
        Line::from(Span::styled(
            "a add · s spin · n no-repeat · ↑/↓ select · d remove · c clear · r reset · \
             Tab panel · w save · l load · y copy · u duplicate · x delete · q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}
