//! Interactive chat REPL

use crate::output::ConsoleFormatter;
use neuroroute_application::{
    CompletionGateway, EmbeddingGateway, HandleTurnInput, HandleTurnUseCase,
};
use neuroroute_domain::Message;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};

/// Interactive chat REPL
///
/// Owns the conversation history; the core never retains it.
pub struct ChatRepl<E: EmbeddingGateway, C: CompletionGateway> {
    use_case: HandleTurnUseCase<E, C>,
    history: Vec<Message>,
}

impl<E: EmbeddingGateway, C: CompletionGateway> ChatRepl<E, C> {
    pub fn new(use_case: HandleTurnUseCase<E, C>) -> Self {
        Self {
            use_case,
            history: Vec::new(),
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = Reedline::create();

        let history_path = dirs::data_dir().map(|p| p.join("neuroroute").join("history.txt"));
        if let Some(path) = &history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(file_history) = FileBackedHistory::with_file(200, path.clone()) {
                editor = editor.with_history(Box::new(file_history));
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("neuroroute".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.process_message(line).await;
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(Signal::CtrlD) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    async fn process_message(&mut self, line: &str) {
        let input = HandleTurnInput::new(line).with_history(self.history.clone());

        match self.use_case.execute(input).await {
            Ok(outcome) => {
                println!("{}", ConsoleFormatter::format(&outcome));
                // Only resolved turns enter the history; ambiguous and empty
                // turns would teach the model its own failure modes
                if outcome.is_decision() {
                    self.history.push(Message::user(line));
                    self.history
                        .push(Message::assistant(ConsoleFormatter::format(&outcome)));
                }
            }
            Err(err) => eprintln!("Error: {}", err),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("neuroroute - chat mode");
        println!();
        println!("Describe an analysis step in plain language, e.g.");
        println!("  \"bandpass filter between 1 and 40 Hz\"");
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /clear    - Clear conversation history");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /clear           - Clear conversation history");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/clear" => {
                self.history.clear();
                println!("History cleared.");
                false
            }
            _ => {
                println!("Unknown command: {}. Try /help", cmd);
                false
            }
        }
    }
}
