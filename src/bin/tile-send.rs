use std::env;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::process::ExitCode;

use tile_merge::{Direction, Settings};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: tile-send <up|down|left|right>[@version] | new | status ...");
        return ExitCode::from(2);
    }

    let lines = match args.iter().map(|a| to_line(a)).collect::<Result<Vec<_>, _>>() {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("tile-send: {e}");
            return ExitCode::from(2);
        }
    };

    let settings = Settings::from_env();
    if let Err(err) = send(&settings, &lines) {
        eprintln!(
            "tile-send: cannot reach {}: {err}",
            settings.socket_path.display()
        );
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

/// Send each line and print the game's answer (`<TAG> <version> <score>`).
fn send(settings: &Settings, lines: &[String]) -> std::io::Result<()> {
    let mut stream = UnixStream::connect(&settings.socket_path)?;
    let mut replies = BufReader::new(stream.try_clone()?).lines();
    for line in lines {
        writeln!(stream, "{}", line)?;
        stream.flush()?;
        match replies.next() {
            Some(reply) => println!("{}", reply?),
            None => break,
        }
    }
    Ok(())
}

/// `left` -> `MOVE left`, `up@7` -> `MOVE up 7`, `new` -> `NEW`, `status` -> `STATUS`.
fn to_line(arg: &str) -> Result<String, String> {
    if arg.eq_ignore_ascii_case("new") {
        return Ok("NEW".to_string());
    }
    if arg.eq_ignore_ascii_case("status") {
        return Ok("STATUS".to_string());
    }
    let (name, version) = match arg.split_once('@') {
        Some((name, v)) => {
            let v: u64 = v
                .parse()
                .map_err(|_| format!("bad version in {arg:?}"))?;
            (name, Some(v))
        }
        None => (arg, None),
    };
    let direction =
        Direction::from_name(name).ok_or_else(|| format!("unknown direction {name:?}"))?;
    Ok(match version {
        Some(v) => format!("MOVE {} {}", direction, v),
        None => format!("MOVE {}", direction),
    })
}
