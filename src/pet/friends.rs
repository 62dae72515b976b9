//! Friend codes and the local friends list.
//!
//! There is no server: a friend is just a code typed by the player. The
//! friend's panda name and personality are derived from the code, so the
//! same code always produces the same friend.

use serde::{Deserialize, Serialize};

use super::friend_chat::FriendChat;
use super::rng::{next_rng, rng_range};
use super::state::Message;

pub const CODE_PREFIX: &str = "PANDA-";
pub const CODE_LEN: usize = 6;
/// Longest input accepted in the code field.
pub const MAX_INPUT_LEN: usize = 16;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const NAMES: &[&str] = &[
    "Bambou", "Mochi", "Pompon", "Noisette", "Litchi", "Tofu", "Biscotte", "Câlin",
];

const TRAITS: &[&str] = &[
    "adore faire la sieste au soleil",
    "collectionne les feuilles de bambou rares",
    "raconte des blagues très nulles",
    "ne rate jamais une partie de Memory",
    "rêve de voyager dans l'espace",
    "est toujours le premier à la plage",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub code: String,
    pub name: String,
    pub personality: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddFriendError {
    Empty,
    OwnCode,
    AlreadyAdded,
}

impl AddFriendError {
    pub fn message(&self) -> &'static str {
        match self {
            AddFriendError::Empty => "Entre un code ami.",
            AddFriendError::OwnCode => "Tu ne peux pas t'ajouter toi-même !",
            AddFriendError::AlreadyAdded => "Cet ami est déjà dans ta liste !",
        }
    }
}

/// `PANDA-` followed by six uppercase base-36 characters.
pub fn generate_friend_code(seed: &mut u64) -> String {
    let mut code = String::from(CODE_PREFIX);
    for _ in 0..CODE_LEN {
        let i = rng_range(seed, BASE36.len() as u32) as usize;
        code.push(BASE36[i] as char);
    }
    code
}

pub fn is_valid_friend_code(code: &str) -> bool {
    code.strip_prefix(CODE_PREFIX).is_some_and(|rest| {
        rest.len() == CODE_LEN
            && rest
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
    })
}

pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Build the friend a code stands for.
pub fn friend_from_code(code: &str) -> Friend {
    let mut seed = code
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |h, b| next_rng(h ^ b as u64));
    let name = NAMES[rng_range(&mut seed, NAMES.len() as u32) as usize];
    let trait_ = TRAITS[rng_range(&mut seed, TRAITS.len() as u32) as usize];
    Friend {
        code: code.to_string(),
        name: name.to_string(),
        personality: format!("{} {}.", name, trait_),
    }
}

/// The player's own code, the saved friends, the add-friend form and the
/// conversation currently open, if any.
pub struct Friends {
    pub own_code: String,
    pub list: Vec<Friend>,
    /// Text typed in the code field.
    pub input: String,
    pub error: Option<Message>,
    pub chat: Option<FriendChat>,
}

impl Friends {
    pub fn new(own_code: String, list: Vec<Friend>) -> Self {
        Self {
            own_code,
            list,
            input: String::new(),
            error: None,
            chat: None,
        }
    }

    /// Friend shown on list row `idx` (0-based).
    pub fn get(&self, idx: usize) -> Option<&Friend> {
        self.list.get(idx)
    }

    /// Leave the conversation. A reply still on its way is dropped.
    pub fn close_chat(&mut self) -> bool {
        self.chat.take().is_some()
    }

    /// Validate and append a code. The list is untouched on error.
    pub fn add(&mut self, raw: &str) -> Result<&Friend, AddFriendError> {
        let code = normalize_code(raw);
        if code.is_empty() {
            return Err(AddFriendError::Empty);
        }
        if code == normalize_code(&self.own_code) {
            return Err(AddFriendError::OwnCode);
        }
        if self.list.iter().any(|f| f.code == code) {
            return Err(AddFriendError::AlreadyAdded);
        }
        self.list.push(friend_from_code(&code));
        Ok(&self.list[self.list.len() - 1])
    }

    pub fn type_char(&mut self, c: char) -> bool {
        if self.input.chars().count() >= MAX_INPUT_LEN || !(c.is_ascii_alphanumeric() || c == '-')
        {
            return false;
        }
        self.input.push(c.to_ascii_uppercase());
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.input.pop().is_some()
    }

    /// Submit the typed code. On success the field is cleared; on error the
    /// message is kept until `now_ms + error_ms`.
    pub fn submit(&mut self, now_ms: u64, error_ms: u64) -> bool {
        let input = std::mem::take(&mut self.input);
        match self.add(&input) {
            Ok(_) => {
                self.error = None;
                true
            }
            Err(e) => {
                self.input = input;
                self.error = Some(Message {
                    text: e.message().to_string(),
                    expires_at_ms: Some(now_ms.saturating_add(error_ms)),
                });
                false
            }
        }
    }

    pub fn expire_error(&mut self, now_ms: u64) {
        let expired = self
            .error
            .as_ref()
            .and_then(|m| m.expires_at_ms)
            .is_some_and(|at| now_ms >= at);
        if expired {
            self.error = None;
        }
    }
}
