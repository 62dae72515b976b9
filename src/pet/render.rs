//! Pandagotchi rendering: status bar, panda art, stat gauges, care actions,
//! the phone overlay and the game-over panel.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::chat::{panda_line, NOTICE_BODY, NOTICE_TITLE};
use super::friend_chat::{FriendChat, Sender};
use super::minigames::MiniGameKind;
use super::phone::{App, Background, Screen};
use super::state::{Accessory, Mood, Phase, PetState, Stage, Stat};
use super::PetGame;

const PINK: Color = Color::Rgb(229, 131, 160);
const ROSE: Color = Color::Rgb(167, 107, 121);

fn key_span(key: &str, style: Style) -> Span<'static> {
    Span::styled(format!("[{}] ", key), style)
}

fn key_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn render(game: &PetGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let s = &game.state;
    let narrow = is_narrow_layout(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // status bar
            Constraint::Min(8),    // panda + stats
            Constraint::Length(3), // message line
        ])
        .split(area);

    render_status_bar(s, &game.friends.own_code, f, chunks[0]);

    if narrow {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(7), Constraint::Length(5), Constraint::Length(7)])
            .split(chunks[1]);
        render_panda(s, f, body[0]);
        render_stats(s, f, body[1]);
        render_actions(s, f, body[2], click_state);
    } else {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(7)])
            .split(body[1]);
        render_panda(s, f, body[0]);
        render_stats(s, f, side[0]);
        render_actions(s, f, side[1], click_state);
    }

    render_message(s, f, chunks[2]);

    if game.phone.open && !s.game_over {
        render_phone(game, f, area, click_state);
    }
    if s.game_over {
        render_game_over(f, area, click_state);
    }
}

// ── Status bar ────────────────────────────────────────────────

pub fn friend_code_label(code: &str) -> String {
    format!(" Code Ami : {} ", code)
}

fn render_status_bar(s: &PetState, friend_code: &str, f: &mut Frame, area: Rect) {
    let (phase_icon, phase_style) = match s.phase {
        Phase::Day => ("☀ Jour", Style::default().fg(Color::Yellow)),
        Phase::Night => ("🌙 Nuit", Style::default().fg(Color::LightBlue)),
    };
    let line = Line::from(vec![
        Span::styled(
            format!("Âge : {} j  ", s.day()),
            Style::default().fg(Color::White),
        ),
        Span::styled(phase_icon, phase_style),
        Span::raw("  "),
        Span::styled(s.stage.label(), Style::default().fg(PINK)),
        Span::raw("  "),
        Span::styled(
            format!("💰 {}", s.coins),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);
    let widget = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PINK))
            .title(" 🐼 Pandagotchi ")
            .title_bottom(
                Line::from(Span::styled(friend_code_label(friend_code), dim()))
                    .right_aligned(),
            ),
    );
    f.render_widget(widget, area);
}

// ── Panda ─────────────────────────────────────────────────────

/// Face parts (eyes, mouth, extra line) for a mood.
fn face(mood: Mood) -> (&'static str, &'static str, &'static str) {
    match mood {
        Mood::Happy => ("^   ^", "ω", ""),
        Mood::Sad => ("T   T", "︵", ""),
        Mood::Hungry => ("o   o", "○", "  🎋 ?"),
        Mood::Dirty => ("-   -", "~", " ∴  ∴ "),
        Mood::Sleeping => ("-   -", ".", "  z Z z"),
        Mood::Bathing => ("^   ^", "o", " ° o ° o °"),
    }
}

fn hat(accessory: Option<Accessory>) -> &'static str {
    match accessory {
        Some(Accessory::TopHat) => "▄███▄",
        Some(Accessory::PartyHat) => "  ▲  ",
        _ => "",
    }
}

/// ASCII panda for a mood, stage and accessory. Every variant of a stage has
/// the same height so the panel never jumps.
pub fn panda_art(mood: Mood, stage: Stage, accessory: Option<Accessory>) -> Vec<String> {
    let (mut eyes, mouth, extra) = face(mood);
    if accessory == Some(Accessory::Sunglasses) && mood != Mood::Sleeping {
        eyes = "■-■-■";
    }
    let chin = if accessory == Some(Accessory::BowTie) {
        "▶◀"
    } else {
        "──"
    };

    let mut art = vec![hat(accessory).to_string()];
    match stage {
        Stage::Baby => {
            art.push("●▁▁▁▁▁●".to_string());
            art.push(format!("( {} )", eyes));
            art.push(format!("(   {}   )", mouth));
            art.push(format!("╰──{}──╯", chin));
        }
        Stage::Adult => {
            art.push("●▁▁▁▁▁▁▁●".to_string());
            art.push(format!("(  {}  )", eyes));
            art.push(format!("(    {}    )", mouth));
            art.push(format!("╰───{}───╯", chin));
            art.push("╱▐█████▌╲".to_string());
            art.push("▐█▌   ▐█▌".to_string());
        }
    }
    art.push(extra.to_string());
    art
}

fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Happy => Color::Green,
        Mood::Sad => Color::LightBlue,
        Mood::Hungry => Color::Yellow,
        Mood::Dirty => Color::Rgb(160, 120, 80),
        Mood::Sleeping => Color::Magenta,
        Mood::Bathing => Color::Cyan,
    }
}

fn render_panda(s: &PetState, f: &mut Frame, area: Rect) {
    let mood = if s.game_over { Mood::Sad } else { s.display_mood() };
    let style = Style::default().fg(Color::White);
    let mut lines: Vec<Line> = panda_art(mood, s.stage, s.equipped)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    lines.push(Line::from(Span::styled(
        mood.label(),
        Style::default()
            .fg(mood_color(mood))
            .add_modifier(Modifier::BOLD),
    )));

    let border = match s.phase {
        Phase::Day => PINK,
        Phase::Night => Color::Blue,
    };
    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(widget, area);
}

// ── Stats ─────────────────────────────────────────────────────

/// Filled/empty gauge of `width` cells.
pub fn stat_bar(value: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value.min(max) as usize * width) + max as usize / 2) / max as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn stat_color(value: u32, low: u32) -> Color {
    if value < low {
        Color::Red
    } else if value < low * 2 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn render_stats(s: &PetState, f: &mut Frame, area: Rect) {
    let bar_w = (area.width.saturating_sub(22) as usize).clamp(5, 20);
    let lines: Vec<Line> = Stat::all()
        .iter()
        .map(|&stat| {
            let v = s.stats.get(stat);
            let low = stat.of(&s.cfg.low_threshold);
            Line::from(vec![
                Span::styled(format!("{:<9}", stat.label()), Style::default().fg(ROSE)),
                Span::styled(
                    stat_bar(v, s.cfg.max_stat, bar_w),
                    Style::default().fg(stat_color(v, low)),
                ),
                Span::raw(format!(" {:>3}", v)),
            ])
        })
        .collect();
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PINK))
            .title(" Besoins "),
    );
    f.render_widget(widget, area);
}

// ── Actions ───────────────────────────────────────────────────

fn render_actions(
    s: &PetState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let care: [(&str, &str, &str, u16); 4] = [
        ("1", "🎋", "Nourrir", FEED),
        ("2", "🎾", "Jouer", PLAY),
        ("3", "🚽", "Toilettes", TOILET),
        ("4", "🛁", "Bain", BATHE),
    ];
    let enabled = s.can_act();

    let mut cl = ClickableList::new();
    for (key, icon, label, id) in care {
        if enabled {
            cl.push_clickable(
                Line::from(vec![
                    key_span(key, key_style()),
                    Span::raw(format!("{} {}", icon, label)),
                ]),
                id,
            );
        } else {
            cl.push_disabled(Line::from(Span::styled(
                format!("    {} {}", icon, label),
                dim(),
            )));
        }
    }
    cl.push_clickable(
        Line::from(vec![
            key_span("p", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("📱 Téléphone"),
        ]),
        OPEN_PHONE,
    );

    let title = if s.is_sleeping() {
        " Actions (chut, il dort) "
    } else if s.is_bathing() {
        " Actions (au bain) "
    } else {
        " Actions "
    };

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PINK))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn render_message(s: &PetState, f: &mut Frame, area: Rect) {
    let text = s.message_text().unwrap_or("");
    let widget = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(ROSE).add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).border_style(dim()));
    f.render_widget(widget, area);
}

// ── Overlays ──────────────────────────────────────────────────

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

fn render_game_over(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let panel = centered(area, 44, 8);
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "Partie terminée",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from("Oh non ! Ton panda est parti..."));
    cl.push(Line::from(Span::styled(
        "Prends mieux soin du prochain !",
        dim(),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(vec![
            key_span("r", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("Recommencer"),
        ]),
        RESTART,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(panel, &mut cs, 1, 1);
    }
    f.render_widget(Clear, panel);
    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(widget, panel);
}

// ── Phone ─────────────────────────────────────────────────────

fn render_phone(game: &PetGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let panel = centered(area, 60, 24);
    f.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PINK))
        .title(format!(" 📱 {} ", phone_title(game)))
        .title_bottom(Line::from(format!(" 💰 {} ", game.state.coins)).right_aligned());
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(inner);

    let back_label = if game.phone.screen == Screen::App(App::Friends) {
        "Esc"
    } else {
        "-"
    };
    let back = Paragraph::new(Line::from(vec![
        key_span(back_label, Style::default().fg(Color::Cyan)),
        Span::raw(if game.phone.game.is_none() && game.phone.screen == Screen::Home {
            "Fermer"
        } else {
            "Retour"
        }),
    ]));
    f.render_widget(back, rows[0]);
    click_state
        .borrow_mut()
        .add_row_target(rows[0], rows[0].y, PHONE_BACK);

    let content = rows[1];
    if let Some(session) = &game.phone.game {
        session.game.render(f, content, click_state);
        return;
    }
    match game.phone.screen {
        Screen::Home => render_home(f, content, click_state),
        Screen::App(App::Shop) => render_shop(&game.state, f, content, click_state),
        Screen::App(App::Games) => render_games_menu(f, content, click_state),
        Screen::App(App::Camera) => render_camera(game, f, content, click_state),
        Screen::App(App::Gallery) => render_gallery(game, f, content),
        Screen::App(App::Chat) => render_chat(&game.state, f, content),
        Screen::App(App::Friends) => render_friends(game, f, content, click_state),
    }
}

fn phone_title(game: &PetGame) -> String {
    match &game.friends.chat {
        Some(chat) if game.phone.screen == Screen::App(App::Friends) => {
            format!("{} 💬", chat.friend.name)
        }
        _ => game.phone.title().to_string(),
    }
}

/// Lines without borders: targets start on the first row of `area`.
fn render_list(
    cl: ClickableList<'static>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 0, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()), area);
}

fn render_home(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    for (i, app) in App::all().iter().enumerate() {
        cl.push_clickable(
            Line::from(vec![
                key_span(&app.key().to_string(), key_style()),
                Span::raw(format!("{} {}", app.icon(), app.name())),
            ]),
            OPEN_APP_BASE + i as u16,
        );
    }
    render_list(cl, f, area, click_state);
}

fn render_shop(s: &PetState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "Accessoires pour ton panda",
        Style::default().fg(ROSE),
    )));
    cl.push(Line::from(""));

    for (i, item) in Accessory::all().iter().enumerate() {
        let key = (i + 1).to_string();
        let owned = s.owned.contains(item);
        let label = format!("{} {:<20}", item.icon(), item.name());
        if owned {
            let worn = s.equipped == Some(*item);
            let status = if worn {
                Span::styled("✔ Porté (retirer)", Style::default().fg(Color::Green))
            } else {
                Span::styled("Porter", Style::default().fg(Color::Cyan))
            };
            cl.push_clickable(
                Line::from(vec![key_span(&key, key_style()), Span::raw(label), status]),
                EQUIP_BASE + i as u16,
            );
        } else if s.coins >= item.price() {
            cl.push_clickable(
                Line::from(vec![
                    key_span(&key, key_style()),
                    Span::raw(label),
                    Span::styled(format!("{} 💰", item.price()), Style::default().fg(Color::Yellow)),
                ]),
                BUY_BASE + i as u16,
            );
        } else {
            cl.push_disabled(Line::from(Span::styled(
                format!("    {}{} 💰", label, item.price()),
                dim(),
            )));
        }
    }
    render_list(cl, f, area, click_state);
}

fn render_games_menu(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "Gagne des pièces en jouant !",
        Style::default().fg(ROSE),
    )));
    cl.push(Line::from(""));
    for (i, kind) in MiniGameKind::all().iter().enumerate() {
        let icon = match kind {
            MiniGameKind::CoinRush => "💰",
            MiniGameKind::Memory => "🧠",
            MiniGameKind::Rps => "✌",
        };
        cl.push_clickable(
            Line::from(vec![
                key_span(&kind.key().to_string(), key_style()),
                Span::raw(format!("{} {}", icon, kind.name())),
            ]),
            PICK_GAME_BASE + i as u16,
        );
    }
    render_list(cl, f, area, click_state);
}

fn backdrop(bg: Background) -> (&'static str, Color) {
    match bg {
        Background::None => ("", Color::White),
        Background::Park => ("🌳  🌷  🌳  🌷  🌳", Color::Green),
        Background::Beach => ("🌴  🌊  ☀  🌊  🌴", Color::Yellow),
        Background::Space => ("✦  🪐  ✦  ★  ✦", Color::Magenta),
    }
}

fn render_camera(
    game: &PetGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let s = &game.state;
    let (scenery, color) = backdrop(game.phone.background);
    let art = panda_art(s.display_mood(), s.stage, s.equipped);
    let preview_h = (art.len() as u16 + 3).min(area.height);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(preview_h), Constraint::Min(3)])
        .split(area);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(scenery, Style::default().fg(color)))];
    lines.extend(art.into_iter().map(Line::from));
    let preview = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(" Panda Snap "),
    );
    f.render_widget(preview, rows[0]);

    let mut cl = ClickableList::new();
    for (i, bg) in Background::all().iter().enumerate() {
        let marker = if *bg == game.phone.background { "●" } else { "○" };
        cl.push_clickable(
            Line::from(vec![
                key_span(&bg.key().to_string(), key_style()),
                Span::raw(format!("{} {}", marker, bg.name())),
            ]),
            BACKGROUND_BASE + i as u16,
        );
    }
    cl.push_clickable(
        Line::from(vec![
            key_span("c", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("📸 Prendre une photo"),
        ]),
        SNAP,
    );
    render_list(cl, f, rows[1], click_state);
}

fn render_gallery(game: &PetGame, f: &mut Frame, area: Rect) {
    let gallery = &game.phone.gallery;
    let lines: Vec<Line> = if gallery.is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Votre galerie est vide. Prenez une photo avec Panda Snap !",
                dim(),
            )),
        ]
    } else {
        gallery
            .iter()
            .map(|p| {
                let accessory = p.accessory.map(|a| a.icon()).unwrap_or("");
                Line::from(vec![
                    Span::styled(format!("#{:<3}", p.id), dim()),
                    Span::styled(
                        format!("Jour {:<3}", p.day),
                        Style::default().fg(ROSE),
                    ),
                    Span::styled(
                        format!("{:<8}", p.mood.label()),
                        Style::default().fg(mood_color(p.mood)),
                    ),
                    Span::raw(format!("{:<7} {} ", p.stage.label(), accessory)),
                    Span::styled(p.background.name(), Style::default().fg(backdrop(p.background).1)),
                ])
            })
            .collect()
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_chat(s: &PetState, f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            NOTICE_TITLE,
            Style::default().fg(PINK).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(NOTICE_BODY, Style::default().fg(ROSE))),
        Line::from(""),
        Line::from(Span::styled(
            format!("🐼 « {} »", panda_line(s.display_mood())),
            Style::default().fg(Color::White),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_friends(
    game: &PetGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let fr = &game.friends;
    if let Some(chat) = &fr.chat {
        render_friend_chat(chat, f, area, click_state);
        return;
    }
    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled("Ton code ami : ", Style::default().fg(ROSE)),
        Span::styled(
            fr.own_code.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]));
    cl.push(Line::from(Span::styled(
        "Ouvre un portail vers un autre panda !",
        dim(),
    )));
    cl.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(fr.input.clone(), Style::default().fg(Color::White)),
        Span::styled("▌", Style::default().fg(PINK)),
    ]));
    cl.push_clickable(
        Line::from(vec![
            key_span("Entrée", key_style()),
            Span::raw("Ouvrir"),
        ]),
        ADD_FRIEND,
    );
    match &fr.error {
        Some(err) => cl.push(Line::from(Span::styled(
            err.text.clone(),
            Style::default().fg(Color::Red),
        ))),
        None => cl.push(Line::from("")),
    }

    if fr.list.is_empty() {
        cl.push(Line::from(Span::styled("Aucun portail ouvert.", dim())));
        cl.push(Line::from(Span::styled(
            "Partage ton code et ajoute d'autres joueurs !",
            dim(),
        )));
    } else {
        cl.push(Line::from(Span::styled("Choisis un ami pour discuter :", dim())));
        for (i, friend) in fr.list.iter().enumerate() {
            // Only the first nine rows have a key.
            let lead = if i < 9 {
                key_span(&(i + 1).to_string(), key_style())
            } else {
                Span::raw("    ")
            };
            cl.push_clickable(
                Line::from(vec![
                    lead,
                    Span::raw("🐼 "),
                    Span::styled(
                        friend.name.clone(),
                        Style::default().fg(PINK).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", friend.code), dim()),
                ]),
                SELECT_FRIEND_BASE + i as u16,
            );
            cl.push(Line::from(Span::styled(
                format!("      {}", friend.personality),
                Style::default().fg(ROSE),
            )));
        }
    }
    render_list(cl, f, area, click_state);
}

fn render_friend_chat(
    chat: &FriendChat,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for m in &chat.messages {
        let line = match m.sender {
            Sender::User => Line::from(Span::styled(
                m.text.clone(),
                Style::default().fg(Color::LightBlue),
            ))
            .right_aligned(),
            Sender::Panda => Line::from(vec![
                Span::raw("🐼 "),
                Span::styled(m.text.clone(), Style::default().fg(ROSE)),
            ]),
        };
        lines.push(line);
    }
    if chat.is_waiting() {
        lines.push(Line::from(Span::styled("🐼 ...", dim())));
    }
    // Keep the newest messages in view.
    let visible = rows[0].height as usize;
    let start = lines.len().saturating_sub(visible);
    f.render_widget(Paragraph::new(lines.split_off(start)), rows[0]);

    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(chat.input.clone(), Style::default().fg(Color::White)),
        Span::styled("▌", Style::default().fg(PINK)),
    ]));
    if chat.is_waiting() || chat.input.trim().is_empty() {
        cl.push_disabled(Line::from(Span::styled("        Envoyer", dim())));
    } else {
        cl.push_clickable(
            Line::from(vec![key_span("Entrée", key_style()), Span::raw("Envoyer")]),
            SEND_CHAT,
        );
    }
    render_list(cl, f, rows[1], click_state);
}
