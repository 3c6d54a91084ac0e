//! Application metadata constants

pub const NAME: &str = "tutor";
pub const DISPLAY_NAME: &str = "English Language Teacher";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Practice your English with a friendly AI assistant";

/// Directory name for tutor data (env overrides) within home or a project
pub const DATA_DIR: &str = ".tutor";
/// Log file written by the CLI when file logging is enabled
pub const LOG_FILE: &str = "english_teacher_app.log";
