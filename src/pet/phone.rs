/// In-game phone: app navigation, camera backgrounds and the photo gallery.
use super::minigames::{MiniGameKind, MiniGameSession};
use super::state::{Accessory, Mood, PetState, Stage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum App {
    Shop,
    Games,
    Camera,
    Gallery,
    Chat,
    Friends,
}

impl App {
    /// Home screen order.
    pub fn all() -> &'static [App] {
        &[
            App::Shop,
            App::Games,
            App::Camera,
            App::Gallery,
            App::Chat,
            App::Friends,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            App::Shop => "Boutique",
            App::Games => "Jeux",
            App::Camera => "Photo",
            App::Gallery => "Galerie",
            App::Chat => "Chat",
            App::Friends => "Portail",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            App::Shop => "🛍",
            App::Games => "🎮",
            App::Camera => "📸",
            App::Gallery => "🖼",
            App::Chat => "💬",
            App::Friends => "🌀",
        }
    }

    pub fn key(&self) -> char {
        match self {
            App::Shop => '1',
            App::Games => '2',
            App::Camera => '3',
            App::Gallery => '4',
            App::Chat => '5',
            App::Friends => '6',
        }
    }

    pub fn from_index(idx: usize) -> Option<App> {
        App::all().get(idx).copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    None,
    Park,
    Beach,
    Space,
}

impl Background {
    pub fn all() -> &'static [Background] {
        &[
            Background::None,
            Background::Park,
            Background::Beach,
            Background::Space,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Background::None => "Aucun",
            Background::Park => "Parc",
            Background::Beach => "Plage",
            Background::Space => "Espace",
        }
    }

    pub fn key(&self) -> char {
        match self {
            Background::None => '1',
            Background::Park => '2',
            Background::Beach => '3',
            Background::Space => '4',
        }
    }
}

/// A snapshot of the panda as it looked when the photo was taken.
#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pub id: u32,
    pub mood: Mood,
    pub stage: Stage,
    pub accessory: Option<Accessory>,
    pub background: Background,
    /// Age of the panda, in days.
    pub day: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    App(App),
}

pub struct Phone {
    pub open: bool,
    pub screen: Screen,
    /// Mini-game being played inside the Games app.
    pub game: Option<MiniGameSession>,
    pub background: Background,
    /// Newest first.
    pub gallery: Vec<Photo>,
    next_photo_id: u32,
}

impl Phone {
    pub fn new() -> Self {
        Self {
            open: false,
            screen: Screen::Home,
            game: None,
            background: Background::None,
            gallery: Vec::new(),
            next_photo_id: 1,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.screen = Screen::Home;
    }

    /// Close the phone and drop any running game. The gallery is kept.
    pub fn close(&mut self) {
        self.open = false;
        self.screen = Screen::Home;
        self.game = None;
    }

    pub fn open_app(&mut self, app: App) {
        self.screen = Screen::App(app);
        self.game = None;
    }

    pub fn start_game(&mut self, kind: MiniGameKind, seed: u64) {
        self.screen = Screen::App(App::Games);
        self.game = Some(MiniGameSession::new(kind, seed));
    }

    /// One level up: game → games menu → home → closed.
    pub fn back(&mut self) {
        if self.game.take().is_some() {
            return;
        }
        match self.screen {
            Screen::App(_) => self.screen = Screen::Home,
            Screen::Home => self.open = false,
        }
    }

    pub fn title(&self) -> &'static str {
        match (self.screen, &self.game) {
            (_, Some(session)) => session.kind.name(),
            (Screen::Home, None) => "Applications",
            (Screen::App(app), None) => app.name(),
        }
    }

    /// Capture the panda on the selected background.
    pub fn snap(&mut self, pet: &PetState) -> &Photo {
        let photo = Photo {
            id: self.next_photo_id,
            mood: pet.display_mood(),
            stage: pet.stage,
            accessory: pet.equipped,
            background: self.background,
            day: pet.day(),
        };
        self.next_photo_id += 1;
        self.gallery.insert(0, photo);
        &self.gallery[0]
    }
}
