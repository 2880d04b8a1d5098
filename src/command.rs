use model::Topic;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Start(Topic),
    Retake,
    Select(u8),
    Next,
    Previous,
    Finish,
    Show,
    Topics,
    Help,
    Quit,
}

/// Supported topics match regardless of case. Anything else is kept verbatim.
fn resolve_topic(id: &str) -> Topic {
    match Topic::parse(&id.to_ascii_lowercase()) {
        Topic::Other(_) => Topic::parse(id),
        topic => topic,
    }
}

impl Command {
    /// Parses one line of input. Returns `None` for anything unrecognised.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let head = head.to_ascii_lowercase();
        let command = match (head.as_str(), rest) {
            ("start", "") => return None,
            ("start", topic) => Self::Start(resolve_topic(topic)),
            (key, "") => match key.as_bytes() {
                [digit @ b'1'..=b'4'] => Self::Select(digit - b'1'),
                [letter @ b'a'..=b'd'] => Self::Select(letter - b'a'),
                b"n" | b"next" | b">" => Self::Next,
                b"p" | b"prev" | b"previous" | b"<" => Self::Previous,
                b"f" | b"finish" => Self::Finish,
                b"r" | b"retake" => Self::Retake,
                b"s" | b"show" => Self::Show,
                b"t" | b"topics" | b"menu" => Self::Topics,
                b"h" | b"help" | b"?" => Self::Help,
                b"q" | b"quit" | b"exit" => Self::Quit,
                _ => Topic::SUPPORTED.into_iter().find(|topic| topic.id() == key).map(Self::Start)?,
            },
            _ => return None,
        };

        Some(command)
    }
}

/// Leaving while a quiz is running takes a second `quit` in a row.
#[derive(Default)]
pub struct QuitGuard {
    armed: bool,
}

impl QuitGuard {
    /// Returns whether to leave now.
    pub fn confirm(&mut self, active: bool) -> bool {
        if !active || self.armed {
            return true;
        }
        self.armed = true;
        false
    }

    /// Any other command withdraws a pending `quit`.
    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, QuitGuard};
    use model::Topic;

    #[test]
    fn selects_by_number_or_letter() {
        assert_eq!(Command::parse("1"), Some(Command::Select(0)));
        assert_eq!(Command::parse("4"), Some(Command::Select(3)));
        assert_eq!(Command::parse("a"), Some(Command::Select(0)));
        assert_eq!(Command::parse(" D "), Some(Command::Select(3)));
        assert_eq!(Command::parse("5"), None);
        assert_eq!(Command::parse("e"), None);
    }

    #[test]
    fn navigates() {
        assert_eq!(Command::parse("n"), Some(Command::Next));
        assert_eq!(Command::parse("NEXT"), Some(Command::Next));
        assert_eq!(Command::parse("<"), Some(Command::Previous));
        assert_eq!(Command::parse("finish"), Some(Command::Finish));
        assert_eq!(Command::parse("r"), Some(Command::Retake));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
    }

    #[test]
    fn starts_supported_topics_by_id() {
        assert_eq!(Command::parse("java"), Some(Command::Start(Topic::Java)));
        assert_eq!(Command::parse("DBMS"), Some(Command::Start(Topic::Dbms)));
        assert_eq!(Command::parse("start cpp"), Some(Command::Start(Topic::Cpp)));
        assert_eq!(Command::parse("start JavaScript"), Some(Command::Start(Topic::JavaScript)));
    }

    #[test]
    fn passes_other_topics_through_start() {
        assert_eq!(Command::parse("start Operating Systems"), Some(Command::Start(Topic::Other("Operating Systems".into()))));
        assert_eq!(Command::parse("rust"), None);
        assert_eq!(Command::parse("start"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("next please"), None);
        assert_eq!(Command::parse("hello"), None);
    }

    #[test]
    fn quitting_an_active_quiz_needs_confirmation() {
        let mut guard = QuitGuard::default();
        assert!(guard.confirm(false));

        assert!(!guard.confirm(true));
        assert!(guard.confirm(true));

        let mut guard = QuitGuard::default();
        assert!(!guard.confirm(true));
        guard.disarm();
        assert!(!guard.confirm(true));
    }
}
