use hydroom_core::{Config, Confirm, ProgressTracker};

use super::{build_app, print_json, CmdResult};
use crate::terminal::{AssumeYes, Output, PromptConfirm};

/// Log one glass and print the resulting event.
pub fn add() -> CmdResult {
    let config = Config::load_or_default();
    let mut app = build_app(Output::Stderr, Box::new(AssumeYes), &config);
    print_json(&app.add_glass())
}

/// Print today's state as JSON.
pub fn status() -> CmdResult {
    let config = Config::load_or_default();
    let app = build_app(Output::Stderr, Box::new(AssumeYes), &config);
    print_json(&app.state_snapshot())
}

pub fn reset(yes: bool) -> CmdResult {
    let config = Config::load_or_default();
    let confirm: Box<dyn Confirm> = if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm)
    };
    let mut app = build_app(Output::Stderr, confirm, &config);
    print_json(&app.reset())
}

pub fn message(count: u32) -> CmdResult {
    println!("{}", ProgressTracker::new().message_for(count));
    Ok(())
}
