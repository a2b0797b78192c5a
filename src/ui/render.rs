use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use tile_merge::{
    cell_color, Game, CONTROLS_H, GRID_SIZE, INFO_H, MIN_PANE_HEIGHT, MIN_PANE_WIDTH, PLAY_H,
    PLAY_W, TILE_H, TILE_W,
};

const BOARD_BG: Color = Color::Rgb(0xbb, 0xad, 0xa0);

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

pub fn draw_game(frame: &mut Frame, game: &Game) {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH || area.height < MIN_PANE_HEIGHT {
        let msg = Paragraph::new(format!(
            "RESIZE PANE (min {}x{})",
            MIN_PANE_WIDTH, MIN_PANE_HEIGHT
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("2048"));
        frame.render_widget(msg, area);
        return;
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("2048")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    let col_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_W as u16),
            Constraint::Min(0),
        ])
        .split(cabinet_inner)[1];

    let stack = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(INFO_H),
            Constraint::Length(PLAY_H as u16),
            Constraint::Length(CONTROLS_H),
            Constraint::Min(0),
        ])
        .split(col_rect);

    draw_info(frame, game, stack[1]);
    draw_board(frame, game, stack[2]);
    draw_controls(frame, stack[3]);
}

fn tile_rect(board: Rect, x: usize, y: usize) -> Rect {
    Rect {
        x: board.x + 1 + (x * (TILE_W + 1)) as u16,
        y: board.y + 1 + (y * (TILE_H + 1)) as u16,
        width: TILE_W as u16,
        height: TILE_H as u16,
    }
}

fn draw_board(frame: &mut Frame, game: &Game, board: Rect) {
    frame.render_widget(Block::default().style(Style::default().bg(BOARD_BG)), board);

    let cells = &game.state().cells;
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let value = cells.get(x, y);
            let style = cell_color(value);
            let label = if value == 0 { String::new() } else { value.to_string() };
            // Pad above so the value sits on the middle line.
            let mut lines: Vec<Line> = (0..TILE_H / 2).map(|_| Line::raw("")).collect();
            lines.push(Line::raw(label));
            let tile = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(rgb(style.color))
                        .bg(rgb(style.background))
                        .add_modifier(Modifier::BOLD),
                );
            frame.render_widget(tile, tile_rect(board, x, y));
        }
    }

    if game.game_over {
        let overlay_w = (PLAY_W as u16).saturating_sub(6).max(8);
        let overlay_h = 5u16;
        let popup = Rect {
            x: board.x + (board.width.saturating_sub(overlay_w)) / 2,
            y: board.y + (board.height.saturating_sub(overlay_h)) / 2,
            width: overlay_w,
            height: overlay_h,
        };
        let overlay = Paragraph::new("GAME OVER\nr new game / q quit")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(Clear, popup);
        frame.render_widget(overlay, popup);
    }
}

fn draw_info(frame: &mut Frame, game: &Game, area: Rect) {
    let status = if game.game_over { "OVER" } else { "PLAYING" };

    let block = Block::default().title("INFO").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = Paragraph::new(vec![
        Line::raw(format!("{:<8}{}", "SCORE:", game.score())),
        Line::raw(format!("{:<8}{}", "BEST:", game.best_score.max(game.score()))),
        Line::raw(format!("{:<8}{}", "STATUS:", status)),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(left, cols[0]);

    let right = Paragraph::new(vec![
        Line::raw(format!("{:<7}{}", "TILE:", game.state().cells.highest_tile())),
        Line::raw(format!("{:<7}{}", "MOVES:", game.moves)),
        Line::raw(format!("{:<7}{}", "VER:", game.version())),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(right, cols[1]);
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let block = Block::default().title("CONTROLS").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = Paragraph::new(vec![
        Line::raw("←↑↓→/wasd"),
        Line::raw("drag swipe"),
        Line::raw(""),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(left, cols[0]);

    let right = Paragraph::new(vec![
        Line::raw("r new game"),
        Line::raw("q/esc quit"),
        Line::raw(""),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(right, cols[1]);
}
