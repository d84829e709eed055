use std::fmt::Display;

/// A notification for a single user. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    pub text: String,
    pub target_user_id: String,
}

impl PushMessage {
    pub fn new<S1: Into<String>, S2: Into<String>>(target_user_id: S1, text: S2) -> Self {
        Self { text: text.into(), target_user_id: target_user_id.into() }
    }
}

impl Display for PushMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.target_user_id, self.text)
    }
}
