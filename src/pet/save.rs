//! Device-local storage for the friend code, the friends list and the
//! conversations with friends.
//!
//! The code and the list live in localStorage under fixed keys; each
//! conversation has its own key. Storage problems are never fatal: a missing
//! or failing store yields an ephemeral code and empty data, with a console
//! warning.

use super::friend_chat::ChatMessage;
use super::friends::Friend;
#[cfg(target_arch = "wasm32")]
use super::friends::{generate_friend_code, is_valid_friend_code};

#[cfg(target_arch = "wasm32")]
const FRIEND_CODE_KEY: &str = "pandaFriendCode";

#[cfg(target_arch = "wasm32")]
const FRIENDS_KEY: &str = "pandaFriendsList";

/// Parse a stored friends list. `None` for corrupt data.
#[cfg(any(target_arch = "wasm32", test))]
fn parse_friends(json: &str) -> Option<Vec<Friend>> {
    serde_json::from_str(json).ok()
}

#[cfg(any(target_arch = "wasm32", test))]
fn encode_friends(friends: &[Friend]) -> Result<String, serde_json::Error> {
    serde_json::to_string(friends)
}

/// Storage key of the conversation with the friend holding `code`.
#[cfg(any(target_arch = "wasm32", test))]
fn chat_history_key(code: &str) -> String {
    format!("friendChatHistory_{code}")
}

#[cfg(any(target_arch = "wasm32", test))]
fn parse_chat_history(json: &str) -> Option<Vec<ChatMessage>> {
    serde_json::from_str(json).ok()
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// The player's friend code, created and stored on first use.
#[cfg(target_arch = "wasm32")]
pub fn load_friend_code(seed: &mut u64) -> String {
    let Some(storage) = get_storage() else {
        web_sys::console::warn_1(
            &"Pandagotchi: localStorage indisponible, code ami temporaire".into(),
        );
        return generate_friend_code(seed);
    };

    if let Ok(Some(code)) = storage.get_item(FRIEND_CODE_KEY) {
        if is_valid_friend_code(&code) {
            return code;
        }
        web_sys::console::warn_1(
            &format!("Pandagotchi: code ami invalide ignoré: {code}").into(),
        );
    }

    let code = generate_friend_code(seed);
    if let Err(e) = storage.set_item(FRIEND_CODE_KEY, &code) {
        web_sys::console::warn_1(
            &format!("Pandagotchi: impossible d'enregistrer le code ami: {e:?}").into(),
        );
    }
    code
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_friend_code(seed: &mut u64) -> String {
    super::friends::generate_friend_code(seed)
}

#[cfg(target_arch = "wasm32")]
pub fn load_friends() -> Vec<Friend> {
    let Some(storage) = get_storage() else {
        return Vec::new();
    };
    let json = match storage.get_item(FRIENDS_KEY) {
        Ok(Some(j)) => j,
        _ => return Vec::new(),
    };
    match parse_friends(&json) {
        Some(list) => list,
        None => {
            web_sys::console::warn_1(
                &"Pandagotchi: liste d'amis illisible (supprimée)".into(),
            );
            let _ = storage.remove_item(FRIENDS_KEY);
            Vec::new()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_friends() -> Vec<Friend> {
    Vec::new()
}

#[cfg(target_arch = "wasm32")]
pub fn save_friends(friends: &[Friend]) {
    let json = match encode_friends(friends) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Pandagotchi: sérialisation de la liste d'amis impossible: {e}").into(),
            );
            return;
        }
    };
    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(FRIENDS_KEY, &json) {
            web_sys::console::warn_1(
                &format!("Pandagotchi: enregistrement de la liste d'amis impossible: {e:?}")
                    .into(),
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_friends(_friends: &[Friend]) {}

/// Saved conversation with a friend. `None` when there is none yet; corrupt
/// data is removed with a warning.
#[cfg(target_arch = "wasm32")]
pub fn load_chat_history(code: &str) -> Option<Vec<ChatMessage>> {
    let storage = get_storage()?;
    let key = chat_history_key(code);
    let json = storage.get_item(&key).ok()??;
    match parse_chat_history(&json) {
        Some(history) => Some(history),
        None => {
            web_sys::console::warn_1(
                &format!("Pandagotchi: historique de discussion illisible (supprimé): {key}")
                    .into(),
            );
            let _ = storage.remove_item(&key);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_chat_history(_code: &str) -> Option<Vec<ChatMessage>> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn save_chat_history(code: &str, messages: &[ChatMessage]) {
    let json = match serde_json::to_string(messages) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Pandagotchi: sérialisation de la discussion impossible: {e}").into(),
            );
            return;
        }
    };
    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(&chat_history_key(code), &json) {
            web_sys::console::warn_1(
                &format!("Pandagotchi: enregistrement de la discussion impossible: {e:?}").into(),
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_chat_history(_code: &str, _messages: &[ChatMessage]) {}
