//! Long-running interactive session.
//!
//! Single-threaded: one current-thread runtime multiplexes stdin commands
//! and a one-second poll of the reminder timer. Every command runs to
//! completion before the next line or tick is looked at.

use std::cell::Cell;
use std::io::ErrorKind;
use std::rc::Rc;
use std::time::Duration;

use hydroom_core::{AppController, Config};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::{build_app, CmdResult};
use crate::terminal::{render_line, ArmedConfirm, Output};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

const HELP: &str = "\
Commands:
  add | +            log one glass
  remind [MINUTES]   start reminders (default from config) or stop them
  reset [yes]        reset today's progress
  status             show progress
  sound on|off       enable or mute sounds
  volume PERCENT     set master volume (0-100)
  help               show this help
  quit               leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    Add,
    Remind(Option<String>),
    Reset { confirmed: bool },
    Status,
    Sound(bool),
    Volume(u32),
    Help,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(SessionCommand::Empty);
    };
    let arg = words.next();

    match head.to_ascii_lowercase().as_str() {
        "add" | "a" | "+" => Ok(SessionCommand::Add),
        "remind" | "r" => Ok(SessionCommand::Remind(arg.map(str::to_string))),
        "reset" => Ok(SessionCommand::Reset {
            confirmed: matches!(arg, Some("yes" | "y" | "-y" | "--yes")),
        }),
        "status" | "s" => Ok(SessionCommand::Status),
        "sound" => match arg {
            Some("on") => Ok(SessionCommand::Sound(true)),
            Some("off") => Ok(SessionCommand::Sound(false)),
            _ => Err("usage: sound on|off".to_string()),
        },
        "volume" => arg
            .and_then(|v| v.trim_end_matches('%').parse::<u32>().ok())
            .filter(|v| *v <= 100)
            .map(SessionCommand::Volume)
            .ok_or_else(|| "usage: volume 0-100".to_string()),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
        other => Err(format!("unknown command '{other}' (try `help`)")),
    }
}

pub fn run(interval: Option<String>) -> CmdResult {
    let config = Config::load_or_default();
    let armed = Rc::new(Cell::new(false));
    let out = Output::Stdout;
    let mut app = build_app(out, Box::new(ArmedConfirm::new(armed.clone(), out)), &config);

    app.request_notifications();
    if let Some(raw) = interval {
        // Invalid input is already reported through the gateway.
        let _ = app.toggle_reminder(&raw);
    }
    out.line(HELP);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(event_loop(&mut app, &armed, &config, out))
}

async fn event_loop(
    app: &mut AppController,
    armed: &Cell<bool>,
    config: &Config,
    out: Output,
) -> CmdResult {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(event) = app.tick() {
                    debug!(?event, "reminder tick");
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) if err.kind() == ErrorKind::InvalidData => {
                        out.line("input is not valid UTF-8 (try `help`)");
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };
                match parse_command(&line) {
                    Ok(SessionCommand::Quit) => break,
                    Ok(command) => handle(app, command, armed, config, out),
                    Err(usage) => out.line(&usage),
                }
            }
        }
    }
    Ok(())
}

fn handle(
    app: &mut AppController,
    command: SessionCommand,
    armed: &Cell<bool>,
    config: &Config,
    out: Output,
) {
    let event = match command {
        SessionCommand::Add => Some(app.add_glass()),
        SessionCommand::Remind(raw) => {
            let raw = raw.unwrap_or_else(|| config.reminders.default_interval.to_string());
            app.toggle_reminder(&raw).ok()
        }
        SessionCommand::Reset { confirmed } => {
            armed.set(confirmed);
            let event = app.reset();
            armed.set(false);
            Some(event)
        }
        SessionCommand::Status => {
            out.line(&render_line(&app.snapshot()));
            out.line(&app.scheduler().status_line());
            Some(app.state_snapshot())
        }
        SessionCommand::Sound(enabled) => Some(app.toggle_sound(enabled)),
        SessionCommand::Volume(percent) => {
            let event = app.set_volume(percent as f32 / 100.0);
            out.line(&format!("🔊 Volume {percent}%"));
            Some(event)
        }
        SessionCommand::Help => {
            out.line(HELP);
            None
        }
        SessionCommand::Quit | SessionCommand::Empty => None,
    };
    if let Some(event) = event {
        debug!(?event, "session event");
    }
}
