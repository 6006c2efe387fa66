use crate::app::App;
use cardwheel_core::slot_screen_angle;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Span, Style, Stylize};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const WHEEL_EXTENT: f64 = 1.45;
const LABEL_RADIUS: f64 = 0.72;
const MAX_LABEL_CHARS: usize = 12;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(12),
            Constraint::Length(8),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(root[1]);

    draw_wheel(frame, middle[0], app);
    draw_slots(frame, middle[1], app);
    draw_events(frame, root[2], app);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.session.state;
    let board = &app.session.board;
    let lines = vec![
        Line::from(format!("Card Wheel | Hint: {}", app.next_hint()).bold()),
        Line::from(format!(
            "{}  Multiplier x{:.2}  Noble Traitor +{}  Revealed {}/{}",
            state.gold_label(),
            state.multiplier,
            state.noble_traitor_bonus,
            board.revealed_count(),
            board.len()
        )),
        Line::from(format!(
            "Seed {} | Spins {}",
            app.session.seed(),
            app.session.spins()
        )),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Overview");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

struct WheelLabel {
    x: f64,
    y: f64,
    text: String,
    style: Style,
}

fn draw_wheel(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.session.view();
    let wheel = &app.session.wheel;
    let config = wheel.config();

    // Terminal cells are roughly twice as tall as they are wide.
    let inner_width = f64::from(area.width.saturating_sub(2).max(1));
    let inner_height = f64::from(area.height.saturating_sub(2).max(1));
    let aspect = inner_width / (2.0 * inner_height);
    let x_extent = WHEEL_EXTENT * aspect.max(1.0);
    let y_extent = WHEEL_EXTENT * (1.0 / aspect).max(1.0);
    let cell_width = 2.0 * x_extent / inner_width;

    let labels: Vec<WheelLabel> = view
        .slots
        .iter()
        .map(|slot| {
            let (x, y) = wheel.slot_position(slot.index, (0.0, 0.0));
            let text = short_label(&app.slot_label(slot.index));
            let style = if slot.index == view.pointed_slot && !view.spinning {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if slot.revealed {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            let half_text = text.chars().count() as f64 * cell_width / 2.0;
            WheelLabel {
                x: x / config.radius * LABEL_RADIUS - half_text,
                y: -y / config.radius * LABEL_RADIUS,
                text,
                style,
            }
        })
        .collect();

    let spokes: Vec<(f64, f64)> = (0..config.slot_count)
        .map(|slot| {
            let edge = slot_screen_angle(slot, view.rotation, config) + config.slot_width() / 2.0;
            let theta = edge.to_radians();
            (theta.cos(), -theta.sin())
        })
        .collect();

    let pointer = config.pointer_angle.to_radians();
    let (px, py) = (pointer.cos(), -pointer.sin());
    let pointer_glyph = if px <= 0.0 { "▶" } else { "◀" };

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Wheel"))
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: Color::Blue,
            });
            for (x, y) in &spokes {
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: *x,
                    y2: *y,
                    color: Color::DarkGray,
                });
            }
            ctx.draw(&CanvasLine {
                x1: px * 1.05,
                y1: py * 1.05,
                x2: px * 1.3,
                y2: py * 1.3,
                color: Color::Red,
            });
            ctx.layer();
            ctx.print(
                px * 1.35,
                py * 1.35,
                Span::styled(pointer_glyph, Style::default().fg(Color::Red)),
            );
            for label in &labels {
                ctx.print(
                    label.x,
                    label.y,
                    Span::styled(label.text.clone(), label.style),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_slots(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.session.view();
    let items: Vec<ListItem<'_>> = view
        .slots
        .iter()
        .map(|slot| {
            let marker = if slot.revealed { "+" } else { " " };
            ListItem::new(format!(
                "{marker} slot {}: {}",
                slot.index,
                app.slot_label(slot.index)
            ))
        })
        .collect();
    let title = if view.spinning {
        "Slots (spinning)"
    } else {
        "Slots"
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if !view.slots.is_empty() {
        state.select(Some(view.pointed_slot.min(view.slots.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Events");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("space / enter / s  spin the wheel"),
        Line::from("?  toggle this help"),
        Line::from("esc  close help, or quit"),
        Line::from("q / ctrl+c  quit"),
        Line::from(""),
        Line::from("Each slot's card fires once, when the wheel first stops on it."),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn short_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    short.push('.');
    short
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
