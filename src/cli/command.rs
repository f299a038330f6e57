/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text for the agent
    Send(String),
    New,
    List,
    Open(String),
    Delete(String),
    History,
    Help,
    Quit,
    /// Slash command that is unknown or missing its argument
    Invalid(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        if matches!(line.to_lowercase().as_str(), "quit" | "exit" | "q") {
            return Command::Quit;
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Command::Send(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match (name.to_lowercase().as_str(), arg) {
            ("new", _) => Command::New,
            ("list" | "ls", _) => Command::List,
            ("history", _) => Command::History,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit" | "q", _) => Command::Quit,
            ("open" | "delete", "") => Command::Invalid(format!("/{} needs a number or id", name)),
            ("open", target) => Command::Open(target.to_string()),
            ("delete", target) => Command::Delete(target.to_string()),
            _ => Command::Invalid(format!("Unknown command /{}", name)),
        }
    }
}

pub const HELP: &str = "\
Commands:
  /new             start a new conversation
  /list            list conversations, most recent first
  /open <n|id>     switch to a conversation
  /delete <n|id>   delete a conversation
  /history         show the active conversation
  /help            show this help
  /quit            exit
Anything else is sent to Pachico.";
