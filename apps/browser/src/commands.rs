//! Line commands typed at the browser prompt.

use shared::domain::CharacterId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCommand {
    /// Next page (the list reached its end).
    More,
    /// Pull-to-refresh.
    Refresh,
    Search(String),
    ClearSearch,
    List,
    Show(CharacterId),
    Help,
    Quit,
    Invalid(String),
}

impl BrowserCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "more" | "m" => Self::More,
            "refresh" | "r" => Self::Refresh,
            "search" | "s" | "/" => {
                if rest.is_empty() {
                    Self::ClearSearch
                } else {
                    Self::Search(rest.to_string())
                }
            }
            "clear" | "c" => Self::ClearSearch,
            "list" | "ls" => Self::List,
            "show" => match rest.parse::<i64>() {
                Ok(id) if id > 0 => Self::Show(CharacterId(id)),
                _ => Self::Invalid(format!("invalid character id '{rest}'")),
            },
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => Self::Invalid(format!("unknown command '{other}'")),
        };
        Some(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::More => "more",
            Self::Refresh => "refresh",
            Self::Search(_) => "search",
            Self::ClearSearch => "clear",
            Self::List => "list",
            Self::Show(_) => "show",
            Self::Help => "help",
            Self::Quit => "quit",
            Self::Invalid(_) => "invalid",
        }
    }
}

pub const HELP: &str = "\
commands:
  more | m            load the next page
  refresh | r         reload from page 1
  search <term> | s   filter loaded characters by name prefix or race
  clear | c           clear the search
  list | ls           print the visible characters
  show <id>           fetch one character with its transformations
  help | ?            this text
  quit | q            exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_and_aliases() {
        assert_eq!(BrowserCommand::parse("more"), Some(BrowserCommand::More));
        assert_eq!(BrowserCommand::parse("  R "), Some(BrowserCommand::Refresh));
        assert_eq!(BrowserCommand::parse("ls"), Some(BrowserCommand::List));
        assert_eq!(BrowserCommand::parse("q"), Some(BrowserCommand::Quit));
        assert_eq!(BrowserCommand::parse(""), None);
    }

    #[test]
    fn search_keeps_the_term_verbatim() {
        assert_eq!(
            BrowserCommand::parse("search  Ángel Blanco "),
            Some(BrowserCommand::Search("Ángel Blanco".to_string()))
        );
        assert_eq!(
            BrowserCommand::parse("s"),
            Some(BrowserCommand::ClearSearch)
        );
    }

    #[test]
    fn show_requires_a_positive_id() {
        assert_eq!(
            BrowserCommand::parse("show 12"),
            Some(BrowserCommand::Show(CharacterId(12)))
        );
        assert!(matches!(
            BrowserCommand::parse("show zero"),
            Some(BrowserCommand::Invalid(_))
        ));
        assert!(matches!(
            BrowserCommand::parse("show -1"),
            Some(BrowserCommand::Invalid(_))
        ));
    }

    #[test]
    fn unknown_verbs_are_reported() {
        let command = BrowserCommand::parse("dance now").expect("command");
        assert_eq!(command.name(), "invalid");
        assert_eq!(
            command,
            BrowserCommand::Invalid("unknown command 'dance'".to_string())
        );
    }
}
