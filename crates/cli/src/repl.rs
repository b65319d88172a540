//! Interactive prompt: line input and command parsing.

use std::io::{self, BufRead, BufReader, Write};
use tokio::sync::mpsc;

/// One line of interactive input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    Models,
    /// `/model` alone shows the current model; with a name, switches.
    Model(Option<String>),
    Session,
    History,
    Empty,
    Message(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "q" | "quit" | "exit" | "/quit" | "/exit" if rest.is_empty() => Self::Quit,
            "/help" => Self::Help,
            "/models" => Self::Models,
            "/model" if rest.is_empty() => Self::Model(None),
            "/model" => Self::Model(Some(rest.to_string())),
            "/session" => Self::Session,
            "/history" => Self::History,
            _ => Self::Message(line.to_string()),
        }
    }
}

pub const AGENT_HELP: &str = "\
  Commands:
    /models          List available models
    /model [name]    Show or switch the current model
    /session         Show the session id
    /history         Show the stored conversation
    /help            Show this help
    q, quit, exit    Leave";

pub const CHAT_HELP: &str = "\
  Commands:
    /help            Show this help
    q, quit, exit    Leave";

/// Read stdin lines on a background thread until EOF.
pub fn stdin_lines() -> mpsc::Receiver<io::Result<String>> {
    spawn_line_reader(BufReader::new(std::io::stdin()))
}

/// Forward lines from `reader` over a channel.
///
/// The reader runs on a plain thread, not the runtime's blocking pool, so a
/// read still pending when the loop ends never holds up shutdown.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(32);

    std::thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });

    rx
}

pub fn prompt(label: &str) -> std::io::Result<()> {
    print!("{label}");
    std::io::stdout().flush()
}

/// Print a streamed fragment immediately.
pub fn print_fragment(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_words_are_case_insensitive() {
        for word in ["q", "quit", "EXIT", "/quit", "/Exit", "  quit  "] {
            assert_eq!(ReplCommand::parse(word), ReplCommand::Quit, "{word}");
        }
    }

    #[test]
    fn sentences_starting_with_quit_words_are_messages() {
        assert_eq!(
            ReplCommand::parse("quit smoking tips"),
            ReplCommand::Message("quit smoking tips".into())
        );
    }

    #[test]
    fn model_command_with_and_without_name() {
        assert_eq!(ReplCommand::parse("/model"), ReplCommand::Model(None));
        assert_eq!(
            ReplCommand::parse("/model  gpt-4o "),
            ReplCommand::Model(Some("gpt-4o".into()))
        );
        assert_eq!(ReplCommand::parse("/models"), ReplCommand::Models);
    }

    #[test]
    fn other_commands() {
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/SESSION"), ReplCommand::Session);
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    /// Yields one line, then blocks until released.
    struct StallingReader {
        first: Option<&'static [u8]>,
        release: std::sync::mpsc::Receiver<()>,
    }

    impl io::Read for StallingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if let Some(data) = self.first.take() {
                buf[..data.len()].copy_from_slice(data);
                return Ok(data.len());
            }
            let _ = self.release.recv();
            Ok(0)
        }
    }

    #[test]
    fn pending_read_does_not_block_runtime_shutdown() {
        let (hold, release) = std::sync::mpsc::channel::<()>();
        let reader = BufReader::new(StallingReader { first: Some(b"quit\n"), release });

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let first = runtime.block_on(async {
            let mut lines = spawn_line_reader(reader);
            lines.recv().await
        });
        assert_eq!(ReplCommand::parse(&first.unwrap().unwrap()), ReplCommand::Quit);

        let started = std::time::Instant::now();
        drop(runtime);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
        drop(hold);
    }

    #[tokio::test]
    async fn lines_arrive_in_order_until_eof() {
        let mut lines = spawn_line_reader(io::Cursor::new("hello\n/help\n"));
        assert_eq!(lines.recv().await.unwrap().unwrap(), "hello");
        assert_eq!(lines.recv().await.unwrap().unwrap(), "/help");
        assert!(lines.recv().await.is_none());
    }

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            ReplCommand::parse("  What is Rust?  "),
            ReplCommand::Message("What is Rust?".into())
        );
    }
}
