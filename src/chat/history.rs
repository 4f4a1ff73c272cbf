use serde::{Deserialize, Serialize};

const USER_MARKER: &str = "User:";
const BOT_MARKER: &str = "Bot:";

/// One exchange: what the user said and what the bot answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub bot: String,
}

/// Conversation turns in the order they happened.
///
/// Only appended to or cleared; never reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatHistory {
    turns: Vec<Turn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, user: impl Into<String>, bot: impl Into<String>) {
        self.turns.push(Turn {
            user: user.into(),
            bot: bot.into(),
        });
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Every turn as `User: …\nBot: …\n` lines.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{USER_MARKER} {}\n{BOT_MARKER} {}\n", turn.user, turn.bot))
            .collect()
    }

    /// The transcript followed by the new message and an open `Bot:` line.
    pub fn prompt_for(&self, input: &str) -> String {
        format!("{}{USER_MARKER} {input}\n{BOT_MARKER}", self.transcript())
    }
}

/// Picks the bot's answer out of generated text: whatever follows the last
/// `Bot:` marker, or the whole text when there is none.
pub fn extract_reply(generated: &str) -> String {
    generated
        .rsplit_once(BOT_MARKER)
        .map_or(generated, |(_, reply)| reply)
        .trim()
        .to_string()
}
