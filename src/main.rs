mod input;
mod pet;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use pet::PetGame;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::Ticker;

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_y = mouse_y as f64 - rect.top();
    let click_x = mouse_x as f64 - rect.left();

    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    Some((col, row))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn initial_seed() -> u64 {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (js_sys::Date::now() as u64) ^ (noise << 16)
}

/// Replace the page with a reload prompt when the game panics.
fn show_crash_panel() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    body.set_inner_html(
        "<div style=\"font-family:monospace;text-align:center;margin-top:20vh;color:#e583a0\">\
         <h2>Oups ! Erreur !</h2>\
         <p>Ton panda a eu un petit souci.</p>\
         <button onclick=\"location.reload()\">Rafraîchir</button>\
         </div>",
    );
}

fn main() -> io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        console_error_panic_hook::hook(info);
        show_crash_panel();
    }));

    let cfg = pet::config::load_config();
    let mut ticker = Ticker::new(cfg.tick_interval_ms, cfg.max_frame_ms);
    let game = Rc::new(RefCell::new(PetGame::new(cfg, initial_seed())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));

    ticker.set_callback({
        let game = game.clone();
        move || game.borrow_mut().tick(1)
    });

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let hit = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = hit {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Backspace => InputEvent::Backspace,
                KeyCode::Enter => InputEvent::Submit,
                KeyCode::Esc => InputEvent::Back,
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        let ticker = RefCell::new(ticker);
        move |f| {
            // Ticks borrow the game mutably, so run them before rendering.
            let frame_ms = {
                let mut ticker = ticker.borrow_mut();
                ticker.update(now_ms());
                ticker.last_frame_ms()
            };
            game.borrow_mut().advance_clock(frame_ms as u64);

            let size = f.area();
            click_state.borrow_mut().reset(size.width, size.height);

            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
