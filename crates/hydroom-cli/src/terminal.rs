//! Terminal implementations of the core collaborators.
//!
//! One-shot commands print JSON events on stdout, so their collaborators
//! write to stderr. The interactive session uses stdout for everything.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use hydroom_core::{
    Confirm, NotificationError, NotificationGateway, Permission, Renderer, Snapshot, SoundId,
    SoundPlayer, SystemNotificationOptions,
};
use tracing::debug;

const BAR_WIDTH: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Stdout,
    Stderr,
}

impl Output {
    pub fn line(self, text: &str) {
        match self {
            Output::Stdout => println!("{text}"),
            Output::Stderr => eprintln!("{text}"),
        }
    }

    fn bell(self) {
        // Best effort; a closed terminal must not fail the action.
        let _ = match self {
            Output::Stdout => std::io::stdout().write_all(b"\x07"),
            Output::Stderr => std::io::stderr().write_all(b"\x07"),
        };
    }
}

/// Notifications as terminal lines. System notifications additionally ring
/// the bell; permission is answered from configuration.
pub struct TerminalGateway {
    out: Output,
    permission: Permission,
    allow_system: bool,
}

impl TerminalGateway {
    pub fn new(out: Output, allow_system: bool) -> Self {
        Self {
            out,
            permission: Permission::Default,
            allow_system,
        }
    }
}

impl NotificationGateway for TerminalGateway {
    fn notify_in_app(&mut self, title: &str, message: &str) {
        self.out.line(&format!("[{title}] {message}"));
    }

    fn notify_system(&mut self, title: &str, message: &str, options: &SystemNotificationOptions) {
        debug!(tag = ?options.tag, renotify = options.renotify, "system notification");
        self.out.bell();
        self.out.line(&format!("[system] {title}: {message}"));
    }

    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Result<Option<Permission>, NotificationError> {
        self.permission = if self.allow_system {
            Permission::Granted
        } else {
            Permission::Denied
        };
        Ok(Some(self.permission))
    }
}

/// Terminal bell in place of audio.
pub struct TerminalSound {
    out: Output,
}

impl TerminalSound {
    pub fn new(out: Output) -> Self {
        Self { out }
    }
}

impl SoundPlayer for TerminalSound {
    fn play(&mut self, sound: SoundId, volume: f32) {
        debug!(sound = sound.as_str(), volume, "play sound");
        if volume > 0.0 {
            self.out.bell();
        }
    }
}

pub struct TerminalRenderer {
    out: Output,
}

impl TerminalRenderer {
    pub fn new(out: Output) -> Self {
        Self { out }
    }
}

/// `[██████░░░░░░░░░░]`
pub fn progress_bar(snapshot: &Snapshot) -> String {
    let filled = ((snapshot.percentage / 100.0) * f64::from(BAR_WIDTH)).round() as u32;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled as usize),
        "░".repeat((BAR_WIDTH - filled) as usize)
    )
}

pub fn render_line(snapshot: &Snapshot) -> String {
    format!(
        "💧 {}/{} {} {}  ({})",
        snapshot.glasses_consumed,
        snapshot.daily_goal,
        progress_bar(snapshot),
        snapshot.percentage_label(),
        snapshot.action_label()
    )
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        self.out.line(&render_line(snapshot));
    }

    fn show_message(&mut self, message: &str) {
        self.out.line(&format!("  {message}"));
    }

    fn celebrate(&mut self) {
        self.out.line("🎊 🎊 🎊");
    }

    fn reminder_status(&mut self, status: &str) {
        self.out.line(status);
    }
}

/// Ask on stderr, answer from stdin.
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        eprint!("{question} [y/N] ");
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Confirms everything (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

/// Confirmation for the interactive session: the command line itself
/// carries the answer (`reset yes`), so the session arms this before
/// triggering the reset.
pub struct ArmedConfirm {
    armed: Rc<Cell<bool>>,
    out: Output,
}

impl ArmedConfirm {
    pub fn new(armed: Rc<Cell<bool>>, out: Output) -> Self {
        Self { armed, out }
    }
}

impl Confirm for ArmedConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        let confirmed = self.armed.take();
        if !confirmed {
            self.out
                .line(&format!("{question} Type `reset yes` to confirm."));
        }
        confirmed
    }
}
