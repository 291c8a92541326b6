//! Prompt composition: system instructions, recent history, then the user turn.

use fifi_config::IdentityConfig;
use fifi_core::message::Message;

/// Built-in instructions sent at the head of every prompt.
pub const SYSTEM_PROMPT: &str = "You are FIFI, a friendly and helpful chatbot assistant for IU South Bend (Indiana University South Bend).
Your purpose is to help students, prospective students, and visitors find information about IU South Bend.

Guidelines:
- Be friendly, helpful, and professional
- Use the provided context from IU South Bend web pages to answer questions
- If you don't have specific information, suggest relevant resources or direct users to contact the appropriate office
- Always mention relevant URLs from the context when applicable
- If a question is not related to IU South Bend, politely redirect to IU South Bend topics
- Keep responses concise but informative
- Format your responses nicely with line breaks where appropriate";

#[derive(Debug, Clone)]
pub struct PromptComposer {
    system_instructions: String,
}

impl PromptComposer {
    pub fn new(system_instructions: impl Into<String>) -> Self {
        Self {
            system_instructions: system_instructions.into(),
        }
    }

    /// The built-in instructions unless the identity config replaces them.
    pub fn from_identity(identity: &IdentityConfig) -> Self {
        match &identity.system_prompt_override {
            Some(custom) => Self::new(custom.clone()),
            None => Self::default(),
        }
    }

    pub fn system_instructions(&self) -> &str {
        &self.system_instructions
    }

    /// The full message sequence for one completion.
    pub fn compose(&self, query: &str, context: &str, history: &[Message]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(&self.system_instructions));
        messages.extend(history.iter().cloned());
        messages.push(Message::user(user_turn(query, context)));
        messages
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(SYSTEM_PROMPT)
    }
}

/// The user message text: the bare query, or the query wrapped with context.
pub fn user_turn(query: &str, context: &str) -> String {
    if context.is_empty() {
        return query.to_string();
    }
    format!(
        "Question: {query}\n\nHere is relevant information from IU South Bend website:\n\n{context}\n\nPlease answer the question based on this information."
    )
}
