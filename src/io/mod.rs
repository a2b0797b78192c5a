use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::{REMOTE_IDLE_SECS, REMOTE_REPLY_MS};

/// A line received on the control socket.
///
/// The direction stays raw text so an unknown name reaches the session and is
/// treated as a no-op there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    Move { direction: String, version: Option<u64> },
    NewGame,
    Status,
}

/// A parsed command plus the channel its one-line answer goes back on.
#[derive(Debug)]
pub struct RemoteRequest {
    pub command: RemoteCommand,
    pub reply: mpsc::Sender<String>,
}

/// Bind `path` and forward every parsed line to `tx` from a background thread.
///
/// A stale socket left by a dead instance is replaced. Anything else at
/// `path` (a regular file, a live listener) is an error and left alone.
pub fn spawn_socket_listener(path: &Path, tx: mpsc::Sender<RemoteRequest>) -> io::Result<()> {
    clear_stale_socket(path)?;
    let listener = UnixListener::bind(path)?;
    info!("listening for remote moves on {}", path.display());
    thread::spawn(move || {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let idle = Duration::from_secs(REMOTE_IDLE_SECS);
                    if let Err(err) = handle_stream(stream, &tx, idle) {
                        debug!("remote client closed: {}", err);
                    }
                }
                Err(err) => warn!("socket accept failed: {}", err),
            }
        }
    });
    Ok(())
}

fn clear_stale_socket(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    if !meta.file_type().is_socket() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a socket", path.display()),
        ));
    }
    if UnixStream::connect(path).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AddrInUse,
            format!("another game is listening on {}", path.display()),
        ));
    }
    fs::remove_file(path)
}

fn handle_stream(
    stream: UnixStream,
    tx: &mpsc::Sender<RemoteRequest>,
    idle: Duration,
) -> io::Result<()> {
    stream.set_read_timeout(Some(idle))?;
    let mut writer = stream.try_clone()?;
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = line?;
        let answer = match parse_command_line(&line) {
            Some(command) => {
                debug!("remote command {:?}", command);
                let (reply_tx, reply_rx) = mpsc::channel();
                if tx.send(RemoteRequest { command, reply: reply_tx }).is_err() {
                    return Ok(());
                }
                reply_rx
                    .recv_timeout(Duration::from_millis(REMOTE_REPLY_MS))
                    .unwrap_or_else(|_| "ERR busy".to_string())
            }
            None => {
                warn!("ignoring remote line {:?}", line);
                "ERR unknown command".to_string()
            }
        };
        writeln!(writer, "{}", answer)?;
    }
    Ok(())
}

pub fn parse_command_line(line: &str) -> Option<RemoteCommand> {
    let line = line.trim();
    match line {
        "NEW" => return Some(RemoteCommand::NewGame),
        "STATUS" => return Some(RemoteCommand::Status),
        _ => {}
    }
    if let Some(rest) = line.strip_prefix("MOVE ") {
        let mut parts = rest.split_whitespace();
        let direction = parts.next()?.to_string();
        let version = match parts.next() {
            Some(v) => Some(v.parse().ok()?),
            None => None,
        };
        return Some(RemoteCommand::Move { direction, version });
    }
    None
}
