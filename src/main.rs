use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use notequiz::{
    ClefMode, Config, FileSession, KeyIndex, Letter, Outcome, QuizError, ScoreStore, Session,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: notequiz [--config <file.yaml>] [play|stats|restart|settings <treble|bass|both>]";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut config_path: Option<PathBuf> = None;
    let mut rest: Vec<&str> = Vec::new();

    // Parse flags
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("{}", USAGE);
                    process::exit(1);
                };
                config_path = Some(PathBuf::from(path));
                i += 2;
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            other => {
                rest.push(other);
                i += 1;
            }
        }
    }

    let config = match config_path {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut session = match notequiz::open_session(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error opening {}: {}", config.store_path.display(), e);
            process::exit(1);
        }
    };

    let result = match rest.as_slice() {
        [] | ["play"] => play(&mut session),
        ["stats"] => {
            println!("{}", session.stats());
            Ok(())
        }
        ["restart"] => session.restart().map(|board| println!("{}", board)),
        ["settings", mode] => match mode.parse::<ClefMode>() {
            Ok(mode) => {
                session.set_clef_mode(mode);
                println!("Practicing {} clef notes", mode);
                session.suspend()
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        _ => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// A line of player input
enum Input {
    Key(i32),
    Next,
    Restart,
    Stats,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    match line {
        "n" => return Ok(Input::Next),
        "r" => return Ok(Input::Restart),
        "s" => return Ok(Input::Stats),
        "q" => return Ok(Input::Quit),
        _ => {}
    }

    if let Ok(number) = line.parse::<i64>() {
        return KeyIndex::new(number)
            .map(|key| Input::Key(i32::from(key.value())))
            .map_err(|e| e.to_string());
    }

    let mut chars = line.chars();
    match (chars.next().and_then(Letter::from_char), chars.next()) {
        (Some(letter), None) => Ok(Input::Key(i32::from(letter.key_index().value()))),
        _ => Err(format!(
            "'{}' is not a key. Type 0-11 or a letter A-G (n: next, r: restart, s: stats, q: quit)",
            line
        )),
    }
}

fn play(session: &mut FileSession) -> Result<(), QuizError> {
    let stdin = io::stdin();
    run_quiz(session, stdin.lock(), io::stdout())
}

/// Drive the quiz from `input` until `q` or end of input.
///
/// The session is always suspended before returning, even when reading fails.
fn run_quiz<S, R, W>(session: &mut Session<S>, input: R, mut out: W) -> Result<(), QuizError>
where
    S: ScoreStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", session.scoreboard())?;
    writeln!(out, "Keys: 0=C 2=D 4=E 5=F 7=G 9=A 11=B, or type the letter. n: next, r: restart, s: stats, q: quit")?;

    let played = quiz_loop(session, input, &mut out);
    let saved = session.suspend();
    played?;
    saved?;

    writeln!(out, "{}", session.scoreboard())?;
    Ok(())
}

fn quiz_loop<S, R, W>(session: &mut Session<S>, input: R, out: &mut W) -> Result<(), QuizError>
where
    S: ScoreStore,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "Note: {} > ", session.current_note())?;
        out.flush()?;

        let line = match lines.next() {
            None => {
                writeln!(out)?;
                return Ok(());
            }
            Some(Ok(line)) => line,
            Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                eprintln!("Ignoring unreadable input: {}", e);
                continue;
            }
            Some(Err(e)) => return Err(e.into()),
        };

        match parse_input(&line) {
            Ok(Input::Key(key)) => {
                let shown = session.current_note();
                match session.key_pressed(key) {
                    Outcome::Correct { correct, streak } => {
                        writeln!(out, "Correct! ({} correct, streak {})", correct, streak)?;
                    }
                    Outcome::Wrong { wrong, .. } => {
                        writeln!(
                            out,
                            "Wrong, {} is key {} ({} incorrect)",
                            shown,
                            shown.key_index(),
                            wrong
                        )?;
                    }
                }
            }
            Ok(Input::Next) => {
                session.next_note();
            }
            Ok(Input::Restart) => writeln!(out, "{}", session.restart()?)?,
            Ok(Input::Stats) => writeln!(out, "{}", session.stats())?,
            Ok(Input::Quit) => return Ok(()),
            Err(message) => eprintln!("{}", message),
        }
    }
}
