pub mod config;
pub mod progress;
pub mod session;

use hydroom_core::{
    AppController, Collaborators, Config, Confirm, Database, MemoryStore, ProgressStore,
    SoundSettings, SystemClock,
};
use tracing::warn;

use crate::terminal::{Output, TerminalGateway, TerminalRenderer, TerminalSound};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Wire the controller to terminal collaborators and the on-disk store.
///
/// An unopenable database degrades to an in-memory store for this run.
pub fn build_app(out: Output, confirm: Box<dyn Confirm>, config: &Config) -> AppController {
    let store: Box<dyn ProgressStore> = match Database::open() {
        Ok(db) => Box::new(db),
        Err(err) => {
            warn!(error = %err, "progress database unavailable, changes will not be saved");
            Box::new(MemoryStore::new())
        }
    };
    let deps = Collaborators {
        store,
        gateway: Box::new(TerminalGateway::new(
            out,
            config.notifications.system_enabled,
        )),
        sound: Box::new(TerminalSound::new(out)),
        renderer: Box::new(TerminalRenderer::new(out)),
        confirm,
        clock: Box::new(SystemClock),
    };
    AppController::start(deps, SoundSettings::from_config(config))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
