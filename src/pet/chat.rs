//! Panda chat. The real conversation feature is not available yet; the
//! screen shows a notice and a line that depends on how the panda feels.

use super::state::Mood;

pub const NOTICE_TITLE: &str = "Fonctionnalité en construction";
pub const NOTICE_BODY: &str = "Le chat avec ton panda sera bientôt disponible !";

/// What the panda would say right now.
pub fn panda_line(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "Coucou ! Je suis de super bonne humeur aujourd'hui !",
        Mood::Sad => "Je me sens un peu seul... tu veux jouer avec moi ?",
        Mood::Hungry => "J'ai faim... un peu de bambou, s'il te plaît ?",
        Mood::Dirty => "Beurk, je suis tout sale. Un petit bain ?",
        Mood::Sleeping => "Zzz... (ton panda parle dans son sommeil)",
        Mood::Bathing => "Splash ! Je ne peux pas écrire, j'ai les pattes mouillées !",
    }
}
