/// Pandagotchi: a virtual panda with decaying needs, a day/night cycle and
/// an in-game phone.
pub mod actions;
pub mod chat;
pub mod config;
pub mod friend_chat;
pub mod friends;
pub mod logic;
pub mod minigames;
pub mod phone;
pub mod render;
pub mod rng;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use config::PetConfig;
use friend_chat::FriendChat;
use friends::Friends;
use minigames::MiniGameKind;
use phone::{App, Background, Phone, Screen};
use state::{Accessory, PetState};

pub struct PetGame {
    pub state: PetState,
    pub phone: Phone,
    pub friends: Friends,
    seed: u64,
}

impl PetGame {
    pub fn new(cfg: PetConfig, seed: u64) -> Self {
        let mut seed = seed;
        let own_code = save::load_friend_code(&mut seed);
        Self {
            state: PetState::new(cfg),
            phone: Phone::new(),
            friends: Friends::new(own_code, save::load_friends()),
            seed,
        }
    }

    fn next_seed(&mut self) -> u64 {
        self.seed = rng::next_rng(self.seed);
        self.seed
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.state.game_over {
            return match event {
                InputEvent::Key('r') | InputEvent::Click(RESTART) => self.restart(),
                _ => false,
            };
        }
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Back if self.phone.open => {
                self.back();
                true
            }
            InputEvent::Backspace if self.on_friends_screen() => match self.friends.chat.as_mut() {
                Some(chat) => chat.backspace(),
                None => self.friends.backspace(),
            },
            InputEvent::Submit if self.on_friends_screen() => {
                if self.friends.chat.is_some() {
                    self.send_chat()
                } else {
                    self.add_friend();
                    true
                }
            }
            _ => false,
        }
    }

    /// Advance the simulation by `delta_ticks` ticks.
    pub fn tick(&mut self, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            logic::tick(&mut self.state);
        }
    }

    /// Advance real-time timers: bath, messages, errors, friend replies and
    /// mini-games. Mini-games stand still once the panda is gone.
    pub fn advance_clock(&mut self, ms: u64) {
        logic::advance_clock(&mut self.state, ms);
        let now = self.state.clock_ms;
        self.friends.expire_error(now);
        if let Some(chat) = self.friends.chat.as_mut() {
            if chat.deliver_reply(now) {
                save::save_chat_history(&chat.friend.code, &chat.messages);
            }
        }

        if self.state.game_over {
            return;
        }

        let payout = self.phone.game.as_mut().and_then(|session| {
            session.game.advance(ms);
            session.take_payout()
        });
        if let Some(coins) = payout {
            logic::grant_coins(&mut self.state, coins);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }

    fn on_friends_screen(&self) -> bool {
        self.phone.open && self.phone.screen == Screen::App(App::Friends)
    }

    fn restart(&mut self) -> bool {
        let restarted = logic::restart(&mut self.state);
        if restarted {
            self.phone.close();
            self.friends.close_chat();
        }
        restarted
    }

    fn add_friend(&mut self) {
        if self
            .friends
            .submit(self.state.clock_ms, self.state.cfg.error_message_ms)
        {
            save::save_friends(&self.friends.list);
        }
    }

    /// Leave a conversation first, otherwise go one phone level up.
    fn back(&mut self) {
        if !(self.on_friends_screen() && self.friends.close_chat()) {
            self.phone.back();
        }
    }

    fn open_friend_chat(&mut self, idx: usize) -> bool {
        let Some(friend) = self.friends.get(idx).cloned() else {
            return false;
        };
        let history = save::load_chat_history(&friend.code);
        self.friends.chat = Some(FriendChat::open(friend, history));
        true
    }

    fn send_chat(&mut self) -> bool {
        let delay = friend_chat::reply_delay(&mut self.seed);
        let now = self.state.clock_ms;
        let Some(chat) = self.friends.chat.as_mut() else {
            return false;
        };
        if !chat.send(now, delay) {
            return false;
        }
        save::save_chat_history(&chat.friend.code, &chat.messages);
        true
    }

    /// Shop rows buy an item, or toggle it once owned.
    fn shop_select(&mut self, item: Accessory) -> bool {
        if self.state.owned.contains(&item) {
            logic::equip(&mut self.state, item)
        } else {
            logic::buy(&mut self.state, item)
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        let phone_open = self.phone.open;
        match action_id {
            FEED if !phone_open => logic::feed(&mut self.state),
            PLAY if !phone_open => logic::play(&mut self.state),
            TOILET if !phone_open => logic::toilet(&mut self.state),
            BATHE if !phone_open => logic::bathe(&mut self.state),
            OPEN_PHONE if !phone_open => {
                self.phone.open();
                true
            }
            PHONE_BACK if phone_open => {
                self.back();
                true
            }
            id if phone_open && (OPEN_APP_BASE..OPEN_APP_BASE + 6).contains(&id) => {
                match App::from_index((id - OPEN_APP_BASE) as usize) {
                    Some(app) => {
                        self.phone.open_app(app);
                        true
                    }
                    None => false,
                }
            }
            id if phone_open && (BUY_BASE..BUY_BASE + 4).contains(&id) => {
                let item = Accessory::all()[(id - BUY_BASE) as usize];
                logic::buy(&mut self.state, item)
            }
            id if phone_open && (EQUIP_BASE..EQUIP_BASE + 4).contains(&id) => {
                let item = Accessory::all()[(id - EQUIP_BASE) as usize];
                logic::equip(&mut self.state, item)
            }
            id if phone_open && (PICK_GAME_BASE..PICK_GAME_BASE + 3).contains(&id) => {
                let kind = MiniGameKind::all()[(id - PICK_GAME_BASE) as usize];
                let seed = self.next_seed();
                self.phone.start_game(kind, seed);
                true
            }
            id if phone_open && (BACKGROUND_BASE..BACKGROUND_BASE + 4).contains(&id) => {
                self.phone.background = Background::all()[(id - BACKGROUND_BASE) as usize];
                true
            }
            SNAP if phone_open => {
                self.phone.snap(&self.state);
                true
            }
            ADD_FRIEND if self.on_friends_screen() && self.friends.chat.is_none() => {
                self.add_friend();
                true
            }
            SEND_CHAT if self.on_friends_screen() => self.send_chat(),
            id if self.on_friends_screen() && (SELECT_FRIEND_BASE..MINIGAME_KEY_BASE).contains(&id) => {
                self.open_friend_chat((id - SELECT_FRIEND_BASE) as usize)
            }
            id if phone_open => match (minigame_key_of(id), self.phone.game.as_mut()) {
                (Some(key), Some(session)) => session.handle_key(key),
                _ => false,
            },
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        if !self.phone.open {
            return match key {
                '1' => logic::feed(&mut self.state),
                '2' => logic::play(&mut self.state),
                '3' => logic::toilet(&mut self.state),
                '4' => logic::bathe(&mut self.state),
                'p' => {
                    self.phone.open();
                    true
                }
                _ => false,
            };
        }

        // Text fields take every key, including '-'. Codes start with a
        // letter, so a digit in an empty code field picks a friend instead.
        if self.on_friends_screen() {
            if let Some(chat) = self.friends.chat.as_mut() {
                return chat.type_char(key);
            }
            if self.friends.input.is_empty() {
                if let Some(d) = key.to_digit(10).filter(|d| *d >= 1) {
                    return self.open_friend_chat(d as usize - 1);
                }
            }
            return self.friends.type_char(key);
        }
        if key == '-' {
            self.phone.back();
            return true;
        }
        if let Some(session) = self.phone.game.as_mut() {
            return session.handle_key(key);
        }

        let digit = key.to_digit(10).map(|d| d as usize);
        match (self.phone.screen, digit) {
            (Screen::Home, Some(d)) if d >= 1 => match App::from_index(d - 1) {
                Some(app) => {
                    self.phone.open_app(app);
                    true
                }
                None => false,
            },
            (Screen::App(App::Shop), Some(d)) if (1..=4).contains(&d) => {
                self.shop_select(Accessory::all()[d - 1])
            }
            (Screen::App(App::Games), Some(d)) if (1..=3).contains(&d) => {
                let seed = self.next_seed();
                self.phone.start_game(MiniGameKind::all()[d - 1], seed);
                true
            }
            (Screen::App(App::Camera), Some(d)) if (1..=4).contains(&d) => {
                self.phone.background = Background::all()[d - 1];
                true
            }
            (Screen::App(App::Camera), None) if key == 'c' => {
                self.phone.snap(&self.state);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::{Mood, Phase};

    fn game() -> PetGame {
        let mut g = PetGame::new(PetConfig::default(), 42);
        g.state.mood = Mood::Happy;
        g.state.phase = Phase::Day;
        g
    }

    fn key(g: &mut PetGame, c: char) -> bool {
        g.handle_input(&InputEvent::Key(c))
    }

    #[test]
    fn care_keys_on_main_screen() {
        let mut g = game();
        g.state.stats.hunger = 50;
        g.state.stats.happiness = 50;
        assert!(key(&mut g, '1'));
        assert!(key(&mut g, '2'));
        assert_eq!(g.state.stats.hunger, 75);
        assert_eq!(g.state.stats.happiness, 70);
        assert!(key(&mut g, '4'));
        assert!(g.state.is_bathing());
    }

    #[test]
    fn care_clicks_match_keys() {
        let mut g = game();
        g.state.stats.cleanliness = 10;
        assert!(g.handle_input(&InputEvent::Click(TOILET)));
        assert_eq!(g.state.stats.cleanliness, 40);
    }

    #[test]
    fn sleeping_panda_ignores_care_keys() {
        let mut g = PetGame::new(PetConfig::default(), 1);
        g.state.stats.hunger = 50;
        assert!(!key(&mut g, '1'));
        assert_eq!(g.state.stats.hunger, 50);
    }

    #[test]
    fn phone_navigation() {
        let mut g = game();
        key(&mut g, 'p');
        assert!(g.phone.open);
        key(&mut g, '1');
        assert_eq!(g.phone.screen, Screen::App(App::Shop));
        // care keys are shop keys while the phone is open
        g.state.stats.hunger = 50;
        key(&mut g, '1');
        assert_eq!(g.state.stats.hunger, 50);

        key(&mut g, '-');
        assert_eq!(g.phone.screen, Screen::Home);
        g.handle_input(&InputEvent::Back);
        assert!(!g.phone.open);
    }

    #[test]
    fn shop_buys_then_toggles() {
        let mut g = game();
        g.state.coins = 30;
        key(&mut g, 'p');
        key(&mut g, '1');
        assert!(key(&mut g, '3'));
        assert_eq!(g.state.coins, 20);
        assert!(g.state.owned.contains(&Accessory::PartyHat));

        assert!(key(&mut g, '3'));
        assert_eq!(g.state.equipped, Some(Accessory::PartyHat));
        assert!(key(&mut g, '3'));
        assert_eq!(g.state.equipped, None);
        assert_eq!(g.state.coins, 20);
    }

    #[test]
    fn shop_refuses_when_broke() {
        let mut g = game();
        g.state.coins = 20;
        g.handle_input(&InputEvent::Key('p'));
        g.handle_input(&InputEvent::Click(OPEN_APP_BASE));
        assert!(!g.handle_input(&InputEvent::Click(BUY_BASE)));
        assert_eq!(g.state.coins, 20);
        assert!(g.state.owned.is_empty());
    }

    #[test]
    fn minigame_pays_out_once() {
        let mut g = game();
        key(&mut g, 'p');
        key(&mut g, '2');
        key(&mut g, '3'); // rock-paper-scissors
        assert!(g.phone.game.is_some());

        for _ in 0..5 {
            key(&mut g, '1');
            g.advance_clock(1000);
        }
        let earned = g.state.coins;
        assert!((5..=25).contains(&earned));
        g.advance_clock(1000);
        assert_eq!(g.state.coins, earned);

        // replay and finish again: a second payout
        key(&mut g, 's');
        for _ in 0..5 {
            key(&mut g, '2');
            g.advance_clock(1000);
        }
        assert!(g.state.coins > earned);
    }

    #[test]
    fn minigame_click_keys_reach_the_game() {
        let mut g = game();
        key(&mut g, 'p');
        g.handle_input(&InputEvent::Click(OPEN_APP_BASE + 1));
        g.handle_input(&InputEvent::Click(PICK_GAME_BASE));
        assert!(g.handle_input(&InputEvent::Click(minigame_key('s'))));
        g.advance_clock(30_000);
        // coin rush finished with score 0: nothing to pay
        assert_eq!(g.state.coins, 0);
    }

    #[test]
    fn camera_snaps_into_gallery() {
        let mut g = game();
        key(&mut g, 'p');
        key(&mut g, '3');
        key(&mut g, '2');
        assert!(key(&mut g, 'c'));
        assert_eq!(g.phone.gallery.len(), 1);
        assert_eq!(g.phone.gallery[0].background, Background::Park);
        assert_eq!(g.phone.gallery[0].mood, Mood::Happy);
    }

    #[test]
    fn friend_code_entry() {
        let mut g = game();
        key(&mut g, 'p');
        key(&mut g, '6');
        for c in "panda-abcdef".chars() {
            key(&mut g, c);
        }
        assert_eq!(g.friends.input, "PANDA-ABCDEF");
        g.handle_input(&InputEvent::Backspace);
        g.handle_input(&InputEvent::Key('G'));
        g.handle_input(&InputEvent::Submit);
        assert_eq!(g.friends.list.len(), 1);
        assert_eq!(g.friends.list[0].code, "PANDA-ABCDEG");

        // Esc still leaves the screen
        g.handle_input(&InputEvent::Back);
        assert_eq!(g.phone.screen, Screen::Home);
    }

    #[test]
    fn own_code_is_rejected_with_a_timed_error() {
        let mut g = game();
        key(&mut g, 'p');
        key(&mut g, '6');
        let own = g.friends.own_code.clone();
        for c in own.chars() {
            key(&mut g, c);
        }
        g.handle_input(&InputEvent::Click(ADD_FRIEND));
        assert!(g.friends.list.is_empty());
        assert!(g.friends.error.is_some());
        g.advance_clock(3000);
        assert!(g.friends.error.is_none());
    }

    #[test]
    fn game_over_only_accepts_restart() {
        let mut g = game();
        g.state.coins = 12;
        g.phone.open();
        g.phone.snap(&g.state);
        g.state.stats.hunger = 0;
        g.tick(1);
        assert!(g.state.game_over);

        assert!(!key(&mut g, '1'));
        assert!(!g.handle_input(&InputEvent::Back));
        assert!(g.handle_input(&InputEvent::Click(RESTART)));
        assert!(!g.state.game_over);
        assert_eq!(g.state.coins, 0);
        assert!(!g.phone.open);
        assert_eq!(g.phone.gallery.len(), 1);
    }

    #[test]
    fn restart_key_ignored_while_alive() {
        let mut g = game();
        g.state.coins = 5;
        assert!(!key(&mut g, 'r'));
        assert_eq!(g.state.coins, 5);
    }

    #[test]
    fn game_over_freezes_a_running_minigame() {
        let mut g = game();
        key(&mut g, 'p');
        key(&mut g, '2');
        key(&mut g, '3');
        for _ in 0..4 {
            key(&mut g, '1');
            g.advance_clock(1000);
        }
        key(&mut g, '1'); // last round waiting for its reveal
        g.state.stats.hunger = 0;
        g.tick(1);
        assert!(g.state.game_over);

        g.advance_clock(1000);
        assert_eq!(g.state.coins, 0);
        assert_eq!(
            g.state.message_text(),
            Some("Oh non ! Ton panda est parti...")
        );
        g.advance_clock(10_000);
        assert!(g.state.message_text().is_some());
    }

    fn with_friend() -> PetGame {
        let mut g = game();
        key(&mut g, 'p');
        key(&mut g, '6');
        for c in "PANDA-MOCHI1".chars() {
            key(&mut g, c);
        }
        g.handle_input(&InputEvent::Submit);
        assert_eq!(g.friends.list.len(), 1);
        g
    }

    #[test]
    fn friend_chat_round_trip() {
        let mut g = with_friend();
        assert!(key(&mut g, '1'));
        let name = g.friends.list[0].name.clone();
        let chat = g.friends.chat.as_ref().unwrap();
        assert_eq!(chat.friend.name, name);
        assert_eq!(chat.messages.len(), 1);

        // '-' and digits are message text here
        for c in "Salut -1".chars() {
            key(&mut g, c);
        }
        assert_eq!(g.friends.chat.as_ref().unwrap().input, "Salut -1");
        assert!(g.handle_input(&InputEvent::Submit));
        assert_eq!(g.friends.chat.as_ref().unwrap().messages.len(), 2);

        g.advance_clock(2000);
        let chat = g.friends.chat.as_ref().unwrap();
        assert_eq!(chat.messages.len(), 3);
        assert!(!chat.is_waiting());

        g.handle_input(&InputEvent::Back);
        assert!(g.friends.chat.is_none());
        assert_eq!(g.phone.screen, Screen::App(App::Friends));
        g.handle_input(&InputEvent::Click(PHONE_BACK));
        assert_eq!(g.phone.screen, Screen::Home);
    }

    #[test]
    fn friend_rows_are_clickable() {
        let mut g = with_friend();
        assert!(!g.handle_input(&InputEvent::Click(SELECT_FRIEND_BASE + 1)));
        assert!(g.handle_input(&InputEvent::Click(SELECT_FRIEND_BASE)));
        assert!(g.friends.chat.is_some());

        key(&mut g, 'o');
        key(&mut g, 'k');
        assert!(g.handle_input(&InputEvent::Click(SEND_CHAT)));
        // a second message waits for the answer
        key(&mut g, '!');
        assert!(!g.handle_input(&InputEvent::Click(SEND_CHAT)));
    }

    #[test]
    fn digits_inside_a_code_are_typed() {
        let mut g = with_friend();
        key(&mut g, 'p');
        assert!(key(&mut g, '1'));
        assert_eq!(g.friends.input, "P1");
        assert!(g.friends.chat.is_none());
    }

    #[test]
    fn restart_closes_the_conversation() {
        let mut g = with_friend();
        key(&mut g, '1');
        g.state.stats.hunger = 0;
        g.tick(1);
        assert!(g.handle_input(&InputEvent::Key('r')));
        assert!(g.friends.chat.is_none());
        assert_eq!(g.friends.list.len(), 1);
    }

    #[test]
    fn tick_advances_age() {
        let mut g = game();
        g.tick(3);
        assert_eq!(g.state.ticks, 3);
    }
}
