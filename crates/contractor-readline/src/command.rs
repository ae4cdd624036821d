//! REPL input parsing.

/// Slash commands offered for completion.
pub const COMMANDS: &[&str] = &[
    "/start",
    "/type",
    "/cancel",
    "/my",
    "/help",
    "/admin stats",
    "/admin templates",
    "/admin cleanup",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Stats,
    Templates,
    Cleanup,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    SelectType(String),
    Cancel,
    MyContracts,
    Help,
    Admin(AdminAction),
    Quit,
    /// Free text, fed to the current question.
    Answer(String),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Command::Quit;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Answer(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match (name, arg) {
            ("start", _) => Command::Start,
            ("type", tag) if !tag.is_empty() => Command::SelectType(tag.to_string()),
            ("cancel", _) => Command::Cancel,
            ("my", _) => Command::MyContracts,
            ("help", _) => Command::Help,
            ("admin", "stats") => Command::Admin(AdminAction::Stats),
            ("admin", "templates") => Command::Admin(AdminAction::Templates),
            ("admin", "cleanup") => Command::Admin(AdminAction::Cleanup),
            _ => Command::Unknown(line.to_string()),
        }
    }
}
