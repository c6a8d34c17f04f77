//! Prompt utilities for the interactive client.

use std::io::Write;

/// The input prompt for `username`.
pub fn prompt(username: &str) -> String {
    format!("{}> ", username)
}

/// Redraw the prompt after output from another task interrupted it.
pub fn redisplay_prompt(username: &str) {
    print!("{}", prompt(username));
    std::io::stdout().flush().ok();
}
