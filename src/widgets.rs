//! Clickable line lists.
//!
//! Render code builds a [`ClickableList`] line by line, marking the lines that
//! act as buttons. After the list is placed, `register_targets` turns those
//! marks into click targets on the rows the lines actually landed on.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` for every clickable line.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a plain line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that triggers `action_id` when tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    /// Add a line that looks like a button but is currently unavailable
    /// (e.g. actions while the panda sleeps). No target is registered.
    pub fn push_disabled(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for each clickable line.
    ///
    /// `top_offset` is the number of rows before content (1 for a top
    /// border); `bottom_offset` likewise for the bottom border. Lines that
    /// fall outside the visible content rows get no target.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(idx, action_id) in &self.actions {
            let row = content_y + idx;
            if row < content_end {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_lines_land_on_their_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Actions"));
        cl.push_clickable(Line::from("Bambou"), 10);
        cl.push_clickable(Line::from("Jouer"), 11);
        cl.push(Line::from(""));

        let area = Rect::new(0, 5, 40, 8);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(3, 7), Some(10));
        assert_eq!(cs.hit_test(3, 8), Some(11));
        assert_eq!(cs.hit_test(3, 6), None);
    }

    #[test]
    fn disabled_lines_take_a_row_but_no_target() {
        let mut cl = ClickableList::new();
        cl.push_disabled(Line::from("Bambou (dort)"));
        cl.push_clickable(Line::from("Téléphone"), 20);

        let area = Rect::new(0, 0, 40, 6);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(0, 1), None);
        assert_eq!(cs.hit_test(0, 2), Some(20));
    }

    #[test]
    fn lines_below_the_border_are_clipped() {
        let mut cl = ClickableList::new();
        for i in 0..10u16 {
            cl.push_clickable(Line::from(format!("photo {}", i)), 50 + i);
        }
        // height 5 with borders → 3 content rows
        let area = Rect::new(0, 0, 40, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(0, 3), Some(52));
        assert_eq!(cs.hit_test(0, 4), None);
    }

    #[test]
    fn into_lines_keeps_everything() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("a"));
        cl.push_clickable(Line::from("b"), 1);
        cl.push_disabled(Line::from("c"));
        assert_eq!(cl.into_lines().len(), 3);
    }
}
