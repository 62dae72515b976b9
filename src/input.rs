//! Input normalization and click hit-testing.
//!
//! Keyboard, mouse and touch all end up as an [`InputEvent`]. Click targets
//! are registered during rendering and looked up when a tap arrives, so the
//! game logic never deals with pixels.

use ratzilla::ratatui::layout::Rect;

/// Input events as seen by the pet game.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key.
    Key(char),
    /// A tap on a registered target, identified by its action ID
    /// (see `pet::actions`).
    Click(u16),
    /// Delete the last typed character (friend code entry).
    Backspace,
    /// Confirm typed text.
    Submit,
    /// Esc: leave the current screen.
    Back,
}

/// A tappable region in terminal cell coordinates.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Targets registered by the last frame plus the terminal size they were
/// laid out for. Shared between the render loop and the mouse handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Forget last frame's targets; called at the start of every draw.
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.targets.clear();
        self.terminal_cols = cols;
        self.terminal_rows = rows;
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Make one full row of `area` tappable. Rows outside `area` are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action under the given cell. Later targets are drawn on top, so they win.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Narrow layout drops side borders and stacks panels.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel offset from the top of the grid into a terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Convert a pixel offset from the left of the grid into a terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_finds_row_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 40, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 40, 1), 2);

        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
        assert_eq!(cs.hit_test(40, 10), None);
    }

    #[test]
    fn later_target_wins_on_overlap() {
        let mut cs = ClickState::new();
        // the whole phone panel closes the phone...
        cs.add_click_target(Rect::new(0, 0, 40, 20), 1);
        // ...except the shop row drawn on top of it
        cs.add_click_target(Rect::new(2, 5, 30, 1), 2);

        assert_eq!(cs.hit_test(10, 5), Some(2));
        assert_eq!(cs.hit_test(35, 5), Some(1));
        assert_eq!(cs.hit_test(10, 6), Some(1));
    }

    #[test]
    fn grid_cells_are_column_precise() {
        let mut cs = ClickState::new();
        for i in 0..3u16 {
            cs.add_click_target(Rect::new(i * 6, 4, 6, 2), 100 + i);
        }
        assert_eq!(cs.hit_test(0, 4), Some(100));
        assert_eq!(cs.hit_test(6, 5), Some(101));
        assert_eq!(cs.hit_test(17, 4), Some(102));
        assert_eq!(cs.hit_test(18, 4), None);
        assert_eq!(cs.hit_test(7, 6), None);
    }

    #[test]
    fn row_target_outside_area_is_dropped() {
        let mut cs = ClickState::new();
        let area = Rect::new(2, 10, 30, 4);
        cs.add_row_target(area, 9, 7);
        cs.add_row_target(area, 14, 8);
        cs.add_row_target(area, 12, 9);

        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(2, 12), Some(9));
        assert_eq!(cs.hit_test(1, 12), None);
    }

    #[test]
    fn reset_clears_targets_and_records_size() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 10, 1), 1);
        cs.reset(80, 30);
        assert!(cs.targets.is_empty());
        assert_eq!((cs.terminal_cols, cs.terminal_rows), (80, 30));
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(37));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_row_maps_cells() {
        // 30 rows over 450px → 15px per row
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.9, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
    }

    #[test]
    fn pixel_to_row_rejects_outside_and_degenerate_input() {
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
    }

    #[test]
    fn pixel_to_col_maps_cells() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
    }

    #[test]
    fn tap_pipeline_reaches_action() {
        let mut cs = ClickState::new();
        cs.reset(40, 50);
        cs.add_click_target(Rect::new(0, 20, 40, 1), 3);

        // DomBackend rows are 15px tall
        let grid_h = 50.0 * 15.0;
        let grid_w = 40.0 * 9.0;
        let row = pixel_y_to_row(20.0 * 15.0 + 7.0, grid_h, cs.terminal_rows).unwrap();
        let col = pixel_x_to_col(100.0, grid_w, cs.terminal_cols).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(3));
    }
}
