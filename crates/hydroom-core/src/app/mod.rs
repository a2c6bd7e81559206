mod controller;
mod sound;

pub use controller::{reminder_message, AppController, Collaborators};
pub use sound::SoundSettings;
