#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Role;
use super::Sender;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn new(sender: Sender, text: &str) -> Message {
        return Message {
            sender,
            text: text.to_string(),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: &str) -> ChatMessage {
        return ChatMessage {
            role,
            content: content.to_string(),
        };
    }
}

/// Replays a client-held transcript as chat completion messages. Length and
/// order are preserved.
pub fn to_role_tagged(history: &[Message]) -> Vec<ChatMessage> {
    return history
        .iter()
        .map(|message| {
            return ChatMessage::new(Role::from(&message.sender), &message.text);
        })
        .collect();
}

/// Zero-based index of the turn the interviewer is about to answer. One turn
/// is a user message plus the AI reply.
pub fn turn_index(history: &[Message]) -> usize {
    return history.len() / 2;
}
