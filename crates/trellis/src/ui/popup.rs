//! The popup stack.
//!
//! Popups are widgets drawn and dispatched above the main tree. While any
//! popup is up the UI is in popup mode: Escape, or releasing the left
//! button outside every popup, closes them all.

use trellis_core::Vec2;

use super::Ui;
use crate::logging::targets;
use crate::widget::WidgetId;

impl Ui {
    /// Pushes `id` on the popup stack. A widget already on the stack is
    /// left where it is.
    ///
    /// # Panics
    ///
    /// Panics if `id` was closed.
    pub fn pop_up(&mut self, id: WidgetId) {
        assert!(self.tree.contains(id), "pop_up called with closed widget {id:?}");
        if self.popups.contains(&id) {
            tracing::debug!(target: targets::POPUP, ?id, "popup already up");
            return;
        }
        self.popups.push(id);
        tracing::debug!(target: targets::POPUP, ?id, depth = self.popups.len(), "popup pushed");
    }

    /// Closes popups from the top of the stack down to `anchor`, which
    /// stays up. `None` closes every popup. An anchor that is not on the
    /// stack changes nothing.
    pub fn pop_down_to(&mut self, anchor: Option<WidgetId>) {
        let keep = match anchor {
            Some(anchor) => match self.popups.iter().position(|&p| p == anchor) {
                Some(index) => index + 1,
                None => {
                    tracing::trace!(target: targets::POPUP, ?anchor, "anchor not on popup stack");
                    return;
                }
            },
            None => 0,
        };
        let closing = self.popups.split_off(keep);
        tracing::debug!(
            target: targets::POPUP,
            ?anchor,
            closed = closing.len(),
            depth = self.popups.len(),
            "popups unwound"
        );
        for popup in closing.into_iter().rev() {
            self.close(popup);
        }
    }

    /// The popup stack, bottom first.
    pub fn popups(&self) -> &[WidgetId] {
        &self.popups
    }

    pub fn is_popup_mode(&self) -> bool {
        !self.popups.is_empty()
    }

    /// The topmost popup widget at `pos`, searching the stack from the
    /// top.
    pub fn popup_under(&self, pos: Vec2) -> Option<WidgetId> {
        self.popups
            .iter()
            .rev()
            .find_map(|&popup| self.widget_under(popup, pos))
    }

    /// Whether `id` is a popup or inside one.
    ///
    /// At most `popup_ancestor_limit` ancestors are inspected.
    pub fn is_popup(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        for _ in 0..=self.config.popup_ancestor_limit {
            let Some(widget) = current else {
                return false;
            };
            if self.popups.contains(&widget) {
                return true;
            }
            current = self.tree.parent(widget);
        }
        false
    }

    /// Popups without a parent, bottom first. Popups nested in another
    /// tree are drawn and dispatched with that tree.
    pub(crate) fn top_level_popups(&self) -> Vec<WidgetId> {
        self.popups
            .iter()
            .copied()
            .filter(|&p| self.tree.parent(p).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Panel, WidgetBase};
    use trellis_core::{Rect, vec2};
    use trellis_style::themes;

    fn setup() -> (Ui, [WidgetId; 3]) {
        let mut ui = Ui::new(Rect::from_size(400.0, 300.0), themes::plain());
        let ids = [0.0, 50.0, 100.0].map(|x| {
            ui.add_top_level(WidgetBase::new(Rect::new(x, 0.0, x + 80.0, 80.0)), Panel)
                .unwrap()
        });
        for id in ids {
            ui.pop_up(id);
        }
        (ui, ids)
    }

    #[test]
    fn test_push_twice_is_ignored() {
        let (mut ui, [a, b, c]) = setup();
        ui.pop_up(a);
        assert_eq!(ui.popups(), &[a, b, c]);
    }

    #[test]
    #[should_panic(expected = "closed widget")]
    fn test_push_closed_panics() {
        let (mut ui, [a, ..]) = setup();
        ui.pop_down_to(None);
        ui.pop_up(a);
    }

    #[test]
    fn test_unknown_anchor_is_noop() {
        let (mut ui, [a, b, c]) = setup();
        let other = ui.add_panel(None, WidgetBase::default()).unwrap();
        ui.pop_down_to(Some(other));
        assert_eq!(ui.popups(), &[a, b, c]);
    }

    #[test]
    fn test_popup_under_prefers_top() {
        let (ui, [a, b, c]) = setup();
        assert_eq!(ui.popup_under(vec2(110.0, 10.0)), Some(c));
        assert_eq!(ui.popup_under(vec2(60.0, 10.0)), Some(b));
        assert_eq!(ui.popup_under(vec2(10.0, 10.0)), Some(a));
        assert_eq!(ui.popup_under(vec2(10.0, 100.0)), None);
    }

    #[test]
    fn test_is_popup_walks_ancestors() {
        let (mut ui, [a, ..]) = setup();
        let child = ui.add_button(a, WidgetBase::default()).unwrap();
        let grandchild = ui.add_panel(child, WidgetBase::default()).unwrap();
        assert!(ui.is_popup(grandchild));
        assert!(!ui.is_popup(ui.root()));

        let mut limited = {
            let config = crate::config::UiConfig {
                popup_ancestor_limit: 1,
                ..Default::default()
            };
            Ui::new(Rect::from_size(10.0, 10.0), themes::plain()).with_config(config)
        };
        let top = limited.add_top_level(WidgetBase::default(), Panel).unwrap();
        let mid = limited.add_panel(top, WidgetBase::default()).unwrap();
        let deep = limited.add_panel(mid, WidgetBase::default()).unwrap();
        limited.pop_up(top);
        assert!(limited.is_popup(mid));
        assert!(!limited.is_popup(deep));
    }
}
