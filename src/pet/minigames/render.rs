//! Mini-game screens drawn inside the phone.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::pet::actions::minigame_key;
use crate::widgets::ClickableList;

use super::coin_rush::{CoinRush, RushPhase, CELLS, DURATION_MS};
use super::memory::{card_key, Memory, CARD_COUNT, SYMBOLS};
use super::rps::{Hand, Rps, ROUNDS};
use super::MiniGame;

const PINK: Color = Color::Rgb(229, 131, 160);

fn key_span(key: char, style: Style) -> Span<'static> {
    Span::styled(format!("[{}] ", key), style)
}

fn title_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(PINK).add_modifier(Modifier::BOLD),
    ))
}

fn replay_line() -> Line<'static> {
    Line::from(vec![
        key_span('s', Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("Rejouer"),
    ])
}

/// Text panel with clickable lines, centered, inside a bordered block.
fn render_panel(
    cl: ClickableList<'static>,
    title: &str,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(PINK))
                .title(format!(" {} ", title)),
        );
    f.render_widget(widget, area);
}

// ── Coin Rush ─────────────────────────────────────────────────

pub fn render_coin_rush(
    g: &CoinRush,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    match g.phase {
        RushPhase::Idle => {
            cl.push(title_line("Instructions"));
            cl.push(Line::from(format!(
                "Touche la pièce autant de fois que possible en {} secondes !",
                DURATION_MS / 1000
            )));
            cl.push(Line::from("Les touches 1-9 correspondent aux cases."));
            cl.push(Line::from(""));
            cl.push_clickable(
                Line::from(vec![
                    key_span('s', Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("Démarrer le jeu"),
                ]),
                minigame_key('s'),
            );
        }
        RushPhase::Finished => {
            cl.push(title_line("Partie Terminée !"));
            cl.push(Line::from(vec![
                Span::raw("Tu as collecté "),
                Span::styled(g.score.to_string(), Style::default().fg(Color::Yellow)),
                Span::raw(" pièces !"),
            ]));
            cl.push(Line::from(""));
            cl.push_clickable(replay_line(), minigame_key('s'));
        }
        RushPhase::Playing => {
            render_coin_field(g, f, area, click_state);
            return;
        }
    }
    render_panel(cl, "Chasse aux pièces", f, area, click_state);
}

fn render_coin_field(
    g: &CoinRush,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PINK))
        .title(format!(" Score : {}   Temps : {} ", g.score, g.seconds_left()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bordered = inner.height >= 9;
    let cell_h: u16 = if bordered { 3 } else { 1 };
    let cell_w = (inner.width / 3).min(12);
    let grid_w = cell_w * 3;
    let left = inner.x + inner.width.saturating_sub(grid_w) / 2;

    let mut cs = click_state.borrow_mut();
    for i in 0..CELLS {
        let rect = Rect::new(
            left + (i % 3) as u16 * cell_w,
            inner.y + (i / 3) as u16 * cell_h,
            cell_w,
            cell_h,
        );
        if rect.y + rect.height > inner.y + inner.height {
            continue;
        }
        let key = char::from(b'1' + i as u8);
        let (text, style) = if i == g.coin {
            ("💰", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("·", Style::default().fg(Color::DarkGray))
        };
        let line = Line::from(vec![
            Span::styled(format!("{} ", key), Style::default().fg(Color::DarkGray)),
            Span::styled(text, style),
        ]);
        let mut widget = Paragraph::new(line).alignment(Alignment::Center);
        if bordered {
            widget = widget.block(Block::default().borders(Borders::ALL));
        }
        f.render_widget(widget, rect);
        cs.add_click_target(rect, minigame_key(key));
    }
}

// ── Memory ────────────────────────────────────────────────────

pub fn render_memory(
    g: &Memory,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    if g.is_finished() {
        let mut cl = ClickableList::new();
        cl.push(title_line("Bravo !"));
        cl.push(Line::from(format!("Terminé en {} coups.", g.moves)));
        cl.push(Line::from(vec![
            Span::raw("Tu gagnes "),
            Span::styled(g.reward().to_string(), Style::default().fg(Color::Yellow)),
            Span::raw(" pièces !"),
        ]));
        cl.push(Line::from(""));
        cl.push_clickable(replay_line(), minigame_key('s'));
        render_panel(cl, "Memory", f, area, click_state);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PINK))
        .title(format!(
            " Memory  Coups : {}  Paires : {}/{} ",
            g.moves,
            g.matched_pairs(),
            CARD_COUNT / 2
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols: u16 = 4;
    let cell_w = (inner.width / cols).min(10);
    let cell_h: u16 = if inner.height >= 9 { 3 } else { 1 };
    let left = inner.x + inner.width.saturating_sub(cell_w * cols) / 2;

    let mut cs = click_state.borrow_mut();
    for (i, card) in g.cards.iter().enumerate() {
        let rect = Rect::new(
            left + (i as u16 % cols) * cell_w,
            inner.y + (i as u16 / cols) * cell_h,
            cell_w,
            cell_h,
        );
        if rect.y + rect.height > inner.y + inner.height {
            continue;
        }
        let face = if card.face_up || card.matched {
            SYMBOLS[card.symbol]
        } else {
            "??"
        };
        let style = if card.matched {
            Style::default().fg(Color::Green)
        } else if card.face_up {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let key = card_key(i);
        let line = Line::from(vec![
            Span::styled(format!("{} ", key), Style::default().fg(Color::DarkGray)),
            Span::styled(face, style),
        ]);
        let mut widget = Paragraph::new(line).alignment(Alignment::Center);
        if cell_h == 3 {
            widget = widget.block(Block::default().borders(Borders::ALL).border_style(style));
        }
        f.render_widget(widget, rect);
        if !card.matched && !card.face_up {
            cs.add_click_target(rect, minigame_key(key));
        }
    }
}

// ── Rock-Paper-Scissors ───────────────────────────────────────

pub fn render_rps(g: &Rps, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();

    if g.is_finished() {
        cl.push(title_line("Partie Terminée !"));
        cl.push(Line::from(vec![
            Span::raw("Tu as gagné un total de "),
            Span::styled(g.score.to_string(), Style::default().fg(Color::Yellow)),
            Span::raw(" pièces !"),
        ]));
        cl.push(Line::from(""));
        cl.push_clickable(replay_line(), minigame_key('s'));
        render_panel(cl, "Pierre-Feuille-Ciseaux", f, area, click_state);
        return;
    }

    let revealing = g.revealing_ms.is_some();
    let mine = g.player.map(|h| h.icon()).unwrap_or("🤔");
    let theirs = match g.panda {
        Some(_) if revealing => "❓",
        Some(h) => h.icon(),
        None => "🤔",
    };
    let result = match (revealing, g.last) {
        (true, _) => "...",
        (false, Some(o)) => o.text(),
        (false, None) => "Fais ton choix !",
    };

    cl.push(Line::from(format!(
        "Manche {}/{}   Score : {}",
        (g.round + 1).min(ROUNDS),
        ROUNDS,
        g.score
    )));
    cl.push(Line::from(format!("Toi {}   vs   {} Panda", mine, theirs)));
    cl.push(Line::from(Span::styled(
        result,
        Style::default().fg(Color::Yellow),
    )));
    cl.push(Line::from(""));

    for hand in Hand::all() {
        let line = Line::from(vec![
            key_span(hand.key(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{} {}", hand.icon(), hand.name())),
        ]);
        if revealing {
            cl.push_disabled(line);
        } else {
            cl.push_clickable(line, minigame_key(hand.key()));
        }
    }

    render_panel(cl, "Pierre-Feuille-Ciseaux", f, area, click_state);
}
