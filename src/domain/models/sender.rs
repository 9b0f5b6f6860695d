use std::fmt;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Who wrote a message in the client-held transcript. Senders the client
/// invents are kept verbatim so the transcript serializes back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    User,
    Ai,
    Other(String),
}

impl Sender {
    pub fn as_str(&self) -> &str {
        match self {
            Sender::User => return "user",
            Sender::Ai => return "ai",
            Sender::Other(name) => return name,
        }
    }
}

impl From<String> for Sender {
    fn from(name: String) -> Sender {
        match name.as_str() {
            "user" => return Sender::User,
            "ai" => return Sender::Ai,
            _ => return Sender::Other(name),
        }
    }
}

impl From<Sender> for String {
    fn from(sender: Sender) -> String {
        return sender.as_str().to_string();
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.as_str());
    }
}

/// Roles understood by OpenAI-compatible chat completion APIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl From<&Sender> for Role {
    fn from(sender: &Sender) -> Role {
        match sender {
            Sender::User => return Role::User,
            _ => return Role::Assistant,
        }
    }
}
