//! Prompt composition for one turn.

use crate::session::Message;

/// Composes the full prompt sent to the completion model
pub struct PromptComposer;

impl PromptComposer {
    /// Cue appended after the user message so the model continues with the
    /// assistant's structured reply.
    pub fn generation_cue() -> &'static str {
        "Assistant:"
    }

    /// Assemble history, selected instructions, retrieved context and the
    /// user message into one prompt.
    pub fn compose(
        history: &[Message],
        instructions: &str,
        context_chunks: &[String],
        user_text: &str,
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str(instructions);
        if !prompt.ends_with('\n') {
            prompt.push('\n');
        }

        if !context_chunks.is_empty() {
            prompt.push_str(&Self::context_block(context_chunks));
        }

        for message in history {
            prompt.push_str(message.role.label());
            prompt.push_str(": ");
            prompt.push_str(&message.content);
            prompt.push('\n');
        }

        prompt.push_str("User: ");
        prompt.push_str(user_text);
        prompt.push('\n');
        prompt.push_str(Self::generation_cue());
        prompt
    }

    /// Format retrieved chunks as a reference block.
    fn context_block(chunks: &[String]) -> String {
        let mut block = String::from("Reference material:\n");
        for chunk in chunks {
            block.push_str("---\n");
            block.push_str(chunk);
            block.push('\n');
        }
        block.push_str("---\n");
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_orders_sections() {
        let history = vec![Message::user("hello"), Message::assistant("hi")];
        let chunks = vec!["chunk one".to_string()];
        let prompt = PromptComposer::compose(&history, "INSTRUCTIONS", &chunks, "filter my data");

        let instructions = prompt.find("INSTRUCTIONS").unwrap();
        let context = prompt.find("chunk one").unwrap();
        let past = prompt.find("User: hello").unwrap();
        let current = prompt.find("User: filter my data").unwrap();
        assert!(instructions < context && context < past && past < current);
        assert!(prompt.ends_with(PromptComposer::generation_cue()));
    }

    #[test]
    fn test_compose_without_context_or_history() {
        let prompt = PromptComposer::compose(&[], "BASE", &[], "hi");
        assert!(!prompt.contains("Reference material"));
        assert!(prompt.starts_with("BASE"));
        assert!(prompt.contains("User: hi"));
    }
}
