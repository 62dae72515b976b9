//! Conversations with friends' pandas.
//!
//! Everything stays on the device: the friend answers with a canned line
//! after a short delay, and each conversation is saved under its own
//! storage key.

use serde::{Deserialize, Serialize};

use super::friends::Friend;
use super::rng::{next_rng, rng_range};

/// Longest message the input field accepts.
pub const MAX_CHAT_INPUT_LEN: usize = 120;
/// Reply delay is `REPLY_MIN_MS` plus up to `REPLY_SPREAD_MS`.
pub const REPLY_MIN_MS: u64 = 500;
pub const REPLY_SPREAD_MS: u32 = 1500;

const REPLIES: &[&str] = &[
    "Haha, trop bien !",
    "Ah oui ? Raconte-moi tout !",
    "Mon panda te fait un gros câlin !",
    "J'ai mangé trop de bambou aujourd'hui...",
    "On joue au Memory ensemble un de ces jours ?",
    "Hmm, je ne sais pas quoi dire...",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Panda,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

pub fn greeting(friend: &Friend) -> ChatMessage {
    ChatMessage {
        sender: Sender::Panda,
        text: format!("Salut ! Je suis {}. Content de te parler !", friend.name),
    }
}

/// The friend's answer to `text`, the `turn`-th message of the conversation.
pub fn friend_reply(friend: &Friend, text: &str, turn: usize) -> String {
    if text.ends_with('?') {
        return format!("Bonne question ! {}", friend.personality);
    }
    let mut seed = friend
        .code
        .bytes()
        .fold(turn as u64, |h, b| next_rng(h ^ b as u64));
    REPLIES[rng_range(&mut seed, REPLIES.len() as u32) as usize].to_string()
}

pub struct FriendChat {
    pub friend: Friend,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    /// Clock instant at which the pending reply arrives.
    pub reply_at: Option<u64>,
}

impl FriendChat {
    /// Resume a saved conversation, or start one with the friend's greeting.
    pub fn open(friend: Friend, history: Option<Vec<ChatMessage>>) -> Self {
        let messages = match history {
            Some(h) if !h.is_empty() => h,
            _ => vec![greeting(&friend)],
        };
        Self {
            friend,
            messages,
            input: String::new(),
            reply_at: None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.reply_at.is_some()
    }

    pub fn type_char(&mut self, c: char) -> bool {
        if c.is_control() || self.input.chars().count() >= MAX_CHAT_INPUT_LEN {
            return false;
        }
        self.input.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.input.pop().is_some()
    }

    /// Send the typed text. Refused while blank or while the friend is
    /// still answering; the field is kept in both cases.
    pub fn send(&mut self, now_ms: u64, delay_ms: u64) -> bool {
        let text = self.input.trim();
        if text.is_empty() || self.is_waiting() {
            return false;
        }
        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: text.to_string(),
        });
        self.input.clear();
        self.reply_at = Some(now_ms.saturating_add(delay_ms));
        true
    }

    /// Append the friend's reply once it is due. Returns true when the
    /// conversation changed.
    pub fn deliver_reply(&mut self, now_ms: u64) -> bool {
        match self.reply_at {
            Some(at) if now_ms >= at => {
                self.reply_at = None;
                let last = self
                    .messages
                    .iter()
                    .rev()
                    .find(|m| m.sender == Sender::User)
                    .map(|m| m.text.as_str())
                    .unwrap_or("");
                let text = friend_reply(&self.friend, last, self.messages.len());
                self.messages.push(ChatMessage {
                    sender: Sender::Panda,
                    text,
                });
                true
            }
            _ => false,
        }
    }
}

/// Delay before the friend answers.
pub fn reply_delay(seed: &mut u64) -> u64 {
    REPLY_MIN_MS + rng_range(seed, REPLY_SPREAD_MS) as u64
}
