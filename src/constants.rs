// src/constants.rs
//
// Application-wide defaults and user-facing strings.

/// Backend base URL used when neither the CLI, the environment nor the
/// config file provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// First page index. Pages are 1-based on the wire.
pub const DEFAULT_PAGE: u32 = 1;

/// Notes per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Environment variable read by `--base-url`.
pub const BASE_URL_ENV: &str = "NOTESVIEW_BASE_URL";

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "notesview";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Display format for `created`/`updated` timestamps.
///
/// Used in: `ports/terminal.rs`
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Maximum characters of note content shown in the list table.
///
/// Used in: `ports/terminal.rs`
pub const CONTENT_PREVIEW_CHARS: usize = 40;
