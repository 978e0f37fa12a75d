//! Static prompt serving.
//!
//! One named prompt exists. Its body comes from a file on disk when a path is
//! configured and readable, and otherwise from the copy bundled at compile
//! time. Pure pass-through: no templating, no arguments.

use std::path::Path;

use crate::error::Error;

/// The single prompt's name.
pub const PROMPT_NAME: &str = "board_usage_guide";

/// Short description shown in the prompts/list response.
pub const PROMPT_DESCRIPTION: &str =
    "Guidance for working with whiteboard boards and items through this server";

/// Bundled fallback body, kept in sync with `assets/board-guide.md`.
const BUNDLED_GUIDE: &str = include_str!("../assets/board-guide.md");

/// Loads the prompt body for the named prompt.
///
/// # Errors
///
/// Returns a validation error for an unknown prompt name. A configured but
/// unreadable file falls back to the bundled body rather than failing the
/// invocation.
pub async fn load(name: &str, prompt_file: Option<&Path>) -> Result<String, Error> {
    if name != PROMPT_NAME {
        return Err(Error::validation(format!("unknown prompt: {name}")));
    }

    if let Some(path) = prompt_file {
        match tokio::fs::read_to_string(path).await {
            Ok(body) => return Ok(body),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "prompt file unreadable, using bundled copy");
            }
        }
    }

    Ok(BUNDLED_GUIDE.to_string())
}
