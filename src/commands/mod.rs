mod check;
mod config_cmd;
mod snooze;
mod version_cmd;

pub use check::CheckCommand;
pub use config_cmd::ConfigCommand;
pub use snooze::SnoozeCommand;
pub use version_cmd::VersionCommand;
