use std::error::Error;
use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use tile_merge::io::{spawn_socket_listener, RemoteCommand, RemoteRequest};
use tile_merge::{
    swipe_direction, Direction, Game, MoveOutcome, Settings, MIN_SWIPE_CELLS, POLL_MS,
};

use crate::ui::draw_game;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env();
    init_logging(&settings)?;
    let mut tui = TuiGuard::new()?;
    run_loop(tui.terminal_mut(), &settings)
}

fn init_logging(settings: &Settings) -> Result<(), Box<dyn Error>> {
    // The alternate screen owns stdout/stderr, so logs only go to a file.
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_loop(terminal: &mut Term, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let mut game = Game::new(settings.seed);
    info!("starting game (seed {:?})", settings.seed);

    let (tx, rx) = mpsc::channel();
    if let Err(err) = spawn_socket_listener(&settings.socket_path, tx) {
        warn!(
            "remote control disabled, cannot bind {}: {}",
            settings.socket_path.display(),
            err
        );
    }
    let mut drag_start: Option<(u16, u16)> = None;

    loop {
        for RemoteRequest { command, reply } in rx.try_iter() {
            let answer = handle_remote(command, &mut game);
            let _ = reply.send(answer);
        }

        terminal.draw(|frame| draw_game(frame, &game))?;

        if event::poll(Duration::from_millis(POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        break;
                    }
                    handle_input(key.code, &mut game);
                }
                Event::Mouse(mouse) => handle_mouse(mouse, &mut drag_start, &mut game),
                _ => {}
            }
        }
    }
    Ok(())
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

fn handle_input(code: KeyCode, game: &mut Game) {
    if matches!(code, KeyCode::Char('r') | KeyCode::Char('n')) {
        game.restart();
        return;
    }
    if let Some(direction) = key_direction(code) {
        let _ = game.apply(direction);
    }
}

fn handle_mouse(mouse: MouseEvent, drag_start: &mut Option<(u16, u16)>, game: &mut Game) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            *drag_start = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some((x0, y0)) = drag_start.take() {
                let dx = i32::from(mouse.column) - i32::from(x0);
                // Cells are roughly twice as tall as they are wide.
                let dy = (i32::from(mouse.row) - i32::from(y0)) * 2;
                if let Some(direction) = swipe_direction(dx, dy, MIN_SWIPE_CELLS) {
                    let _ = game.apply(direction);
                }
            }
        }
        _ => {}
    }
}

/// Apply one remote command and describe the result as
/// `<TAG> <version> <score>`, so the client learns the version to submit next.
fn handle_remote(cmd: RemoteCommand, game: &mut Game) -> String {
    let tag = match cmd {
        RemoteCommand::NewGame => {
            game.restart();
            "OK"
        }
        RemoteCommand::Status => {
            if game.game_over {
                "OVER"
            } else {
                "OK"
            }
        }
        RemoteCommand::Move { direction, version } => {
            let outcome = match (Direction::from_name(&direction), version) {
                (Some(d), Some(v)) => match game.apply_at(d, v) {
                    Ok(outcome) => Some(outcome),
                    Err(err) => {
                        warn!("remote move dropped: {}", err);
                        None
                    }
                },
                (Some(d), None) => Some(game.apply(d)),
                (None, _) => Some(game.apply_named(&direction)),
            };
            match outcome {
                Some(MoveOutcome::Moved { .. }) => "MOVED",
                Some(MoveOutcome::NoOp) => "NOOP",
                Some(MoveOutcome::Finished) => "OVER",
                None => "STALE",
            }
        }
    };
    format!("{} {} {}", tag, game.version(), game.score())
}
