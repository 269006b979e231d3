//! UI rendering using ratatui
//!
//! One screen for the whole round:
//! - Header: title, remaining rack, timer
//! - Board: 15x15 grid with bonus squares, laid tiles and the cursor
//! - Side panel: top moves, hints, feedback and score
//! - Once the round ends the side panel becomes the summary

use crate::app::{App, HintReveal};
use crate::game::board::{Axis, Coord, BOARD_SIZE};
use crate::game::layout::{bonus_at, Bonus};
use crate::game::tiles::Tile;
use crate::rush::TopMove;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Columns per board square
const CELL_WIDTH: u16 = 3;
const BOARD_WIDTH: u16 = BOARD_SIZE as u16 * CELL_WIDTH + 2;
const BOARD_HEIGHT: u16 = BOARD_SIZE as u16 + 2;

/// Render the round
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with rack, timer
            Constraint::Min(0),    // Board and side panel
            Constraint::Length(1), // Key help
        ])
        .split(area);

    render_header(frame, layout[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOARD_WIDTH), Constraint::Min(30)])
        .split(layout[1]);

    let board_area = Rect {
        height: content[0].height.min(BOARD_HEIGHT),
        ..content[0]
    };
    render_board(frame, board_area, app);

    if app.is_round_over() {
        render_summary(frame, content[1], app);
    } else {
        render_side(frame, content[1], app);
    }

    let keys = if app.is_round_over() {
        "Esc Quit"
    } else {
        "←↑↓→ Move  Tab Direction  A-Z Place  Bksp Undo  Del Recall  Enter Submit  1-3 Hints  Esc Quit"
    };
    let footer = Paragraph::new(keys)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

/// Render the header: title, rack, timer
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Title
            Constraint::Min(20),    // Rack
            Constraint::Length(10), // Timer
        ])
        .split(inner);

    let title = Paragraph::new("WORDBOARD")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(title, header_layout[0]);

    let rack = Paragraph::new(format_rack(app.rack()))
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(rack, header_layout[1]);

    let timer = Paragraph::new(format_timer(app.time_remaining))
        .style(Style::default().fg(timer_color(app.time_remaining)).bold())
        .alignment(Alignment::Right);
    frame.render_widget(timer, header_layout[2]);
}

fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let hinted = app.hints().iter().find_map(|h| match h {
        HintReveal::Anchor(coord) => Some(*coord),
        _ => None,
    });
    let arrow = match app.direction {
        Axis::Horizontal => "→",
        Axis::Vertical => "↓",
    };

    let lines: Vec<Line> = (0..BOARD_SIZE)
        .map(|row| {
            let spans: Vec<Span> = (0..BOARD_SIZE)
                .map(|col| {
                    let coord = Coord::new(row, col);
                    let mut span = board_cell(app, coord);
                    if hinted == Some(coord) {
                        span = span.bg(Color::Green);
                    }
                    if coord == app.cursor && !app.is_round_over() {
                        span = span.add_modifier(Modifier::REVERSED);
                    }
                    span
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let board = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!("{} {}", app.puzzle().id, arrow)),
    );
    frame.render_widget(board, area);
}

/// A single square: pending tile, board tile or bonus label
fn board_cell(app: &App, coord: Coord) -> Span<'static> {
    if let Some(placed) = app.pending_at(coord) {
        return Span::styled(
            cell_text(&tile_label(&placed.tile)),
            Style::default().fg(Color::Yellow).bold(),
        );
    }
    if let Some(placed) = app.puzzle().board.get(coord) {
        return Span::styled(
            cell_text(&tile_label(&placed.tile)),
            Style::default().fg(Color::White).bold(),
        );
    }
    match bonus_at(coord) {
        Some(bonus) => Span::styled(cell_text(bonus.label()), Style::default().fg(bonus_color(bonus))),
        None => Span::styled(cell_text("·"), Style::default().fg(Color::DarkGray)),
    }
}

/// Top moves, hints, feedback, score
fn render_side(frame: &mut Frame, area: Rect, app: &App) {
    let puzzle = app.puzzle();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(puzzle.top_moves.len().max(1) as u16 + 2), // Top moves
            Constraint::Length(5),                                        // Hints
            Constraint::Min(0),                                           // Feedback, score
        ])
        .split(area);

    let target = app.session().current_target().map(|(i, _)| i);
    let items: Vec<ListItem> = if puzzle.top_moves.is_empty() {
        vec![ListItem::new("No top moves").style(Style::default().fg(Color::DarkGray))]
    } else {
        puzzle
            .top_moves
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let found = app.session().is_found(i);
                let style = if found {
                    Style::default().fg(Color::Green)
                } else if target == Some(i) {
                    Style::default().fg(Color::White).bold()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(top_move_line(i, m, found)).style(style)
            })
            .collect()
    };
    let title = format!(
        "Top moves {}/{}",
        app.session().found_count(),
        puzzle.top_moves.len()
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    );
    frame.render_widget(list, layout[0]);

    let hint_lines: Vec<Line> = if app.hints().is_empty() {
        vec![Line::from("1 anchor  2 length  3 letters").style(Style::default().fg(Color::DarkGray))]
    } else {
        app.hints()
            .iter()
            .map(|h| Line::from(h.label()).style(Style::default().fg(Color::Green)))
            .collect()
    };
    let hints = Paragraph::new(hint_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Hints"),
    );
    frame.render_widget(hints, layout[1]);

    let status_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Feedback
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Score
            Constraint::Min(0),
        ])
        .split(layout[2]);

    let (feedback_text, feedback_color) = format_feedback(&app.feedback);
    let feedback = Paragraph::new(feedback_text).style(Style::default().fg(feedback_color));
    frame.render_widget(feedback, status_layout[0]);

    let score = Paragraph::new(format!("Score: {}", app.score()))
        .style(Style::default().fg(Color::Magenta).bold());
    frame.render_widget(score, status_layout[2]);
}

/// End-of-round summary with every top move revealed
fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let summary = app.round_summary();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(1), // Final score
            Constraint::Length(1), // Moves found
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Reveal
        ])
        .split(area);

    let (title_text, title_color) = format_feedback(&app.feedback);
    let title = Paragraph::new(title_text)
        .style(Style::default().fg(title_color).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let score = Paragraph::new(format!(
        "Final Score: {} / {}",
        summary.total_score, summary.max_score
    ))
    .style(Style::default().fg(Color::Yellow).bold())
    .alignment(Alignment::Center);
    frame.render_widget(score, layout[1]);

    let counts = Paragraph::new(format!(
        "Moves Found: {}/{}  Submissions: {}",
        summary.found.len(),
        summary.found.len() + summary.missed.len(),
        summary.submissions
    ))
    .style(Style::default().fg(Color::Cyan))
    .alignment(Alignment::Center);
    frame.render_widget(counts, layout[2]);

    let items: Vec<ListItem> = app
        .puzzle()
        .top_moves
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let found = app.session().is_found(i);
            let style = if found {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            ListItem::new(reveal_line(i, m, found)).style(style)
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Top moves"),
    );
    frame.render_widget(list, layout[4]);
}

/// Center a label in a board square
fn cell_text(label: &str) -> String {
    format!("{:^width$}", label, width = CELL_WIDTH as usize)
}

/// Blanks show their assigned letter in lower case
fn tile_label(tile: &Tile) -> String {
    let glyph = tile.glyph();
    if tile.is_blank {
        glyph.to_ascii_lowercase().to_string()
    } else {
        glyph.to_string()
    }
}

fn bonus_color(bonus: Bonus) -> Color {
    match bonus {
        Bonus::TripleWord => Color::Red,
        Bonus::DoubleWord | Bonus::Center => Color::Magenta,
        Bonus::TripleLetter => Color::Blue,
        Bonus::DoubleLetter => Color::Cyan,
    }
}

/// Format the remaining rack for display
fn format_rack(tiles: &[Tile]) -> String {
    if tiles.is_empty() {
        return String::from("[ ]");
    }
    let letters: Vec<String> = tiles.iter().map(|t| t.glyph().to_string()).collect();
    format!("[ {} ]", letters.join(" "))
}

/// Unfound moves only show their score
fn top_move_line(index: usize, m: &TopMove, found: bool) -> String {
    if found {
        format!("#{} {} +{}", index + 1, m.words.join(", "), m.score)
    } else {
        format!("#{} ??? {}", index + 1, m.score)
    }
}

fn reveal_line(index: usize, m: &TopMove, found: bool) -> String {
    let mark = if found { "✓" } else { "✗" };
    let direction = Axis::of(&m.tiles).map_or("", Axis::label);
    format!(
        "{} #{} {} {} at {} {}",
        mark,
        index + 1,
        m.words.join(", "),
        m.score,
        m.anchor_cell,
        direction
    )
    .trim_end()
    .to_string()
}

fn timer_color(seconds: u32) -> Color {
    if seconds <= 10 {
        Color::Red
    } else if seconds <= 30 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Format the timer display
fn format_timer(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Format feedback with appropriate color
fn format_feedback(feedback: &str) -> (String, Color) {
    if feedback.is_empty() {
        return (String::new(), Color::White);
    }

    let color = if feedback.starts_with("OK") || feedback.starts_with("ALL FOUND") {
        Color::Green
    } else if feedback.starts_with("NOPE") || feedback.starts_with("No ") {
        Color::Red
    } else if feedback.starts_with("Already found")
        || feedback.starts_with("Round has ended")
        || feedback.starts_with("TIME'S UP")
    {
        Color::Yellow
    } else if feedback.ends_with("not a top move") {
        Color::Cyan
    } else {
        Color::LightRed
    };

    (feedback.to_string(), color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::BotMove;
    use crate::game::board::tests::{lay, placements};
    use crate::game::board::Board;
    use crate::game::tiles::Rack;
    use crate::rush::Puzzle;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);
        let tiles = placements("S", Coord::new(7, 9), Axis::Horizontal);
        let cats = TopMove::from(&BotMove::new(tiles, vec!["CATS".into()], 6));
        let puzzle = Puzzle {
            id: "rush-0000000000000001".to_string(),
            board,
            rack: Rack::from_letters("SATO?"),
            top_moves: vec![cats],
            fallback: false,
        };
        App::new(puzzle, Box::new(|w: &str| w == "CATS"), 90)
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_format_timer() {
        assert_eq!(format_timer(90), "1:30");
        assert_eq!(format_timer(5), "0:05");
        assert_eq!(format_timer(0), "0:00");
    }

    #[test]
    fn test_timer_color() {
        assert_eq!(timer_color(45), Color::Green);
        assert_eq!(timer_color(30), Color::Yellow);
        assert_eq!(timer_color(10), Color::Red);
    }

    #[test]
    fn test_format_feedback() {
        assert_eq!(format_feedback("OK +6 (CATS) move #1").1, Color::Green);
        assert_eq!(format_feedback("NOPE: XQZ").1, Color::Red);
        assert_eq!(format_feedback("Already found move #1").1, Color::Yellow);
        assert_eq!(format_feedback("CA, AT scores 5, not a top move").1, Color::Cyan);
        assert_eq!(format_feedback("").0, "");
    }

    #[test]
    fn test_cell_and_tile_labels() {
        assert_eq!(cell_text("A"), " A ");
        assert_eq!(cell_text("2W"), "2W ");
        assert_eq!(tile_label(&Tile::for_letter('q')), "Q");
        assert_eq!(tile_label(&Tile::blank().assign('E')), "e");
    }

    #[test]
    fn test_rack_and_move_lines() {
        assert_eq!(format_rack(Rack::from_letters("SA?").tiles()), "[ S A ? ]");
        assert_eq!(format_rack(&[]), "[ ]");

        let a = app();
        let m = &a.puzzle().top_moves[0];
        assert_eq!(top_move_line(0, m, false), "#1 ??? 6");
        assert_eq!(top_move_line(0, m, true), "#1 CATS +6");
        assert!(reveal_line(0, m, false).starts_with("✗ #1 CATS 6 at 7,9"));
    }

    #[test]
    fn test_render_round() {
        let a = app();
        let text = screen(&a);
        assert!(text.contains("WORDBOARD"));
        assert!(text.contains("1:30"));
        assert!(text.contains("Top moves 0/1"));
        assert!(text.contains("#1 ??? 6"));
    }

    #[test]
    fn test_render_summary_reveals_moves() {
        let mut a = app();
        a.time_remaining = 1;
        a.tick();
        let text = screen(&a);
        assert!(text.contains("TIME'S UP!"));
        assert!(text.contains("Final Score: 0 / 6"));
        assert!(text.contains("CATS"));
    }
}
