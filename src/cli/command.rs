//! Input line parsing for the interactive client.

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the line as a chat message.
    Say(String),
    /// `/join <channel>`
    Join(String),
    /// `/leave`
    Leave,
    /// `/quit` (or `/exit`)
    Quit,
    /// A slash command that is not recognized (or is missing its argument).
    Unknown(String),
}

/// Parse one input line. Returns `None` for blank lines.
pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Say(line.to_string()));
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    Some(match command {
        "join" if !argument.is_empty() => Command::Join(argument.to_string()),
        "leave" => Command::Leave,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    })
}
