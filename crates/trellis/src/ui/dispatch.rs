//! Per-frame input dispatch.

use trellis_core::{Rect, Vec2};
use trellis_render::TextMetrics;

use super::Ui;
use crate::input::{Key, MouseButton};
use crate::logging::targets;
use crate::widget::interactive::{self, Interactive};
use crate::widget::{Effect, EventContext, WidgetEvent, WidgetId};

impl Ui {
    /// Routes this frame's input to the widgets.
    ///
    /// In popup mode, Escape or a left release outside every popup closes
    /// all popups and the input goes no further. Otherwise mouse events
    /// walk the main tree and then each popup; keys visit the popups from
    /// the top and then the main tree until one is handled.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn update(&mut self, metrics: &dyn TextMetrics) {
        self.tooltip = None;
        let pos = self.input.mouse_pos();
        let target = self
            .popup_under(pos)
            .or_else(|| self.widget_under(self.root, pos));

        if self.is_popup_mode() {
            let outside = target.is_none_or(|t| !self.is_popup(t));
            let escape = self.input.just_pressed(Key::Escape);
            if escape || (outside && self.input.just_released(MouseButton::Left)) {
                tracing::debug!(target: targets::POPUP, escape, "closing popups");
                self.pop_down_to(None);
                return;
            }
        }

        if self.input.just_pressed(MouseButton::Left)
            && let Some(focus) = self.focus
            && target != Some(focus)
        {
            self.set_focus(None);
        }

        tracing::trace!(target: targets::DISPATCH, ?pos, ?target, "dispatching mouse");
        let popups = self.top_level_popups();
        self.process_mouse(self.root, Vec2::ZERO, target, metrics);
        for &popup in &popups {
            self.process_mouse(popup, Vec2::ZERO, target, metrics);
        }

        let popups = self.top_level_popups();
        for &popup in popups.iter().rev() {
            if self.process_keys(popup, Vec2::ZERO, metrics) {
                return;
            }
        }
        self.process_keys(self.root, Vec2::ZERO, metrics);
    }

    fn process_mouse(
        &mut self,
        id: WidgetId,
        origin: Vec2,
        target: Option<WidgetId>,
        metrics: &dyn TextMetrics,
    ) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        let rect = node.base.rect.moved(origin);
        let pos = self.input.mouse_pos();
        let inside = rect.contains(pos);
        let was_inside = rect.contains(self.input.prev_mouse_pos());
        if !inside && !was_inside {
            return;
        }

        if inside && !was_inside {
            self.deliver(id, rect, WidgetEvent::MouseIn, metrics);
        } else if !inside && was_inside {
            self.deliver(id, rect, WidgetEvent::MouseOut, metrics);
        }

        if inside {
            if let Some(node) = self.tree.get(id) {
                let tooltip = &node.base.tooltip;
                self.tooltip = (!tooltip.is_empty()).then(|| tooltip.clone());
            }
            let disabled = self.tree.get(id).is_none_or(|n| n.base.disabled);
            if target == Some(id) && !disabled {
                self.process_buttons(id, rect, metrics);
            }
            let scroll = self.input.scroll();
            if !scroll.is_zero() {
                self.deliver(id, rect, WidgetEvent::MouseWheel(scroll), metrics);
            }
            if self.input.mouse_moved() {
                self.deliver(id, rect, WidgetEvent::MouseMove, metrics);
            }
        }

        let children = self.tree.children(id).to_vec();
        for child in children {
            if !self.tree.contains(id) {
                return;
            }
            self.process_mouse(child, rect.min, target, metrics);
        }
    }

    fn process_buttons(&mut self, id: WidgetId, rect: Rect, metrics: &dyn TextMetrics) {
        let pos = self.input.mouse_pos();
        for button in MouseButton::ALL {
            if self.input.just_pressed(button) {
                self.deliver(id, rect, WidgetEvent::MouseDown(button), metrics);
            }
            if self.input.just_released(button) {
                self.deliver(id, rect, WidgetEvent::MouseUp(button), metrics);
                let distance = (pos - self.input.click_pos()).len();
                if distance <= self.config.click_distance {
                    self.deliver(id, rect, WidgetEvent::MouseClick(button), metrics);
                }
            }
        }
    }

    /// Offers keys to `id` and its subtree, self before children. Returns
    /// `true` once a widget handled them.
    fn process_keys(&mut self, id: WidgetId, origin: Vec2, metrics: &dyn TextMetrics) -> bool {
        let Some(node) = self.tree.get(id) else {
            return false;
        };
        let rect = node.base.rect.moved(origin);
        if !node.base.disabled && self.deliver(id, rect, WidgetEvent::Keys, metrics) {
            tracing::trace!(target: targets::DISPATCH, ?id, "keys handled");
            return true;
        }
        let children = self.tree.children(id).to_vec();
        for child in children {
            if self.process_keys(child, rect.min, metrics) {
                return true;
            }
        }
        false
    }

    /// Hands an event to the widget, applies the effects it requested and
    /// then runs the matching user callback.
    ///
    /// Returns whether the event was handled. Only key events skip the
    /// user callback when the widget handled them.
    fn deliver(
        &mut self,
        id: WidgetId,
        rect: Rect,
        event: WidgetEvent,
        metrics: &dyn TextMetrics,
    ) -> bool {
        let theme = self.theme_for(id);
        let focused = self.focus == Some(id);
        let mut effects = Vec::new();
        let Some(node) = self.tree.get_mut(id) else {
            return false;
        };
        let mut ctx = EventContext {
            id,
            base: &mut node.base,
            input: &self.input,
            metrics,
            theme: &theme,
            rect,
            focused,
            effects: &mut effects,
        };
        let handled = node.widget.event(&event, &mut ctx);
        self.apply_effects(effects);

        match event {
            WidgetEvent::MouseIn => self.run_slot(id, interactive::mouse_in, |f, ui| f(ui, id)),
            WidgetEvent::MouseOut => self.run_slot(id, interactive::mouse_out, |f, ui| f(ui, id)),
            WidgetEvent::MouseMove => self.run_slot(id, interactive::mouse_move, |f, ui| f(ui, id)),
            WidgetEvent::MouseDown(b) => {
                self.run_slot(id, interactive::mouse_down, |f, ui| f(ui, id, b))
            }
            WidgetEvent::MouseUp(b) => self.run_slot(id, interactive::mouse_up, |f, ui| f(ui, id, b)),
            WidgetEvent::MouseClick(b) => {
                self.run_slot(id, interactive::mouse_click, |f, ui| f(ui, id, b))
            }
            WidgetEvent::MouseWheel(delta) => {
                self.run_slot(id, interactive::mouse_wheel, |f, ui| f(ui, id, delta))
            }
            WidgetEvent::Keys => {
                return handled
                    || self
                        .run_slot(id, interactive::keys, |f, ui| f(ui, id))
                        .unwrap_or(false);
            }
        };
        handled
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Focus(focus) => self.set_focus(focus),
                Effect::Notify(id, notification) => self.notify(id, notification),
            }
        }
    }

    /// Takes a callback out of its slot, runs it and puts it back unless
    /// the callback installed a replacement or closed the widget.
    fn run_slot<F: ?Sized, R>(
        &mut self,
        id: WidgetId,
        slot: fn(&mut Interactive) -> &mut Option<Box<F>>,
        call: impl FnOnce(&mut Box<F>, &mut Ui) -> R,
    ) -> Option<R> {
        let node = self.tree.get_mut(id)?;
        let mut callback = slot(&mut node.interactive).take()?;
        let result = call(&mut callback, self);
        if let Some(node) = self.tree.get_mut(id) {
            let slot = slot(&mut node.interactive);
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use trellis_core::vec2;
    use trellis_render::RecordingSurface;
    use trellis_style::themes;

    use crate::widget::WidgetBase;

    fn setup() -> (Ui, RecordingSurface) {
        let ui = Ui::new(Rect::from_size(400.0, 300.0), themes::plain());
        (ui, RecordingSurface::new())
    }

    fn log_events(ui: &mut Ui, id: WidgetId, log: &Rc<RefCell<Vec<String>>>) {
        let interactive = ui.interactive_mut(id).unwrap();
        let l = Rc::clone(log);
        interactive.on_mouse_in = Some(Box::new(move |_, _| l.borrow_mut().push("in".into())));
        let l = Rc::clone(log);
        interactive.on_mouse_out = Some(Box::new(move |_, _| l.borrow_mut().push("out".into())));
        let l = Rc::clone(log);
        interactive.on_mouse_down =
            Some(Box::new(move |_, _, b| l.borrow_mut().push(format!("down {b:?}"))));
        let l = Rc::clone(log);
        interactive.on_mouse_up =
            Some(Box::new(move |_, _, b| l.borrow_mut().push(format!("up {b:?}"))));
        let l = Rc::clone(log);
        interactive.on_mouse_click =
            Some(Box::new(move |_, _, b| l.borrow_mut().push(format!("click {b:?}"))));
        let l = Rc::clone(log);
        interactive.on_mouse_wheel =
            Some(Box::new(move |_, _, d| l.borrow_mut().push(format!("wheel {}", d.y))));
    }

    #[test]
    fn test_enter_leave() {
        let (mut ui, surface) = setup();
        let panel = ui.add_panel(None, WidgetBase::new(Rect::new(10.0, 10.0, 50.0, 50.0))).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        log_events(&mut ui, panel, &log);

        ui.begin_frame(vec2(0.0, 0.0));
        ui.update(&surface);
        ui.begin_frame(vec2(20.0, 20.0));
        ui.update(&surface);
        ui.begin_frame(vec2(25.0, 20.0));
        ui.update(&surface);
        ui.begin_frame(vec2(100.0, 20.0));
        ui.update(&surface);
        assert_eq!(*log.borrow(), vec!["in", "out"]);
    }

    #[test]
    fn test_click_within_distance() {
        let (mut ui, surface) = setup();
        let panel = ui.add_panel(None, WidgetBase::new(Rect::new(10.0, 10.0, 90.0, 90.0))).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        log_events(&mut ui, panel, &log);

        ui.begin_frame(vec2(20.0, 20.0));
        ui.input_mut().press(MouseButton::Left);
        ui.update(&surface);
        ui.begin_frame(vec2(25.0, 20.0));
        ui.input_mut().release(MouseButton::Left);
        ui.update(&surface);
        assert_eq!(*log.borrow(), vec!["in", "down Left", "up Left", "click Left"]);

        log.borrow_mut().clear();
        ui.begin_frame(vec2(20.0, 20.0));
        ui.input_mut().press(MouseButton::Right);
        ui.update(&surface);
        ui.begin_frame(vec2(60.0, 20.0));
        ui.input_mut().release(MouseButton::Right);
        ui.update(&surface);
        assert_eq!(*log.borrow(), vec!["down Right", "up Right"]);
    }

    #[test]
    fn test_buttons_go_to_topmost_only() {
        let (mut ui, surface) = setup();
        let outer = ui.add_panel(None, WidgetBase::new(Rect::new(5.0, 5.0, 100.0, 100.0))).unwrap();
        let inner = ui.add_panel(outer, WidgetBase::new(Rect::new(10.0, 10.0, 50.0, 50.0))).unwrap();
        let outer_log = Rc::new(RefCell::new(Vec::new()));
        let inner_log = Rc::new(RefCell::new(Vec::new()));
        log_events(&mut ui, outer, &outer_log);
        log_events(&mut ui, inner, &inner_log);

        ui.begin_frame(vec2(20.0, 20.0));
        ui.input_mut().press(MouseButton::Left);
        ui.input_mut().scroll_by(vec2(0.0, -1.0));
        ui.update(&surface);
        assert_eq!(*outer_log.borrow(), vec!["in", "wheel -1"]);
        assert_eq!(*inner_log.borrow(), vec!["in", "down Left", "wheel -1"]);
    }

    #[test]
    fn test_disabled_gets_no_buttons() {
        let (mut ui, surface) = setup();
        let panel = ui
            .add_panel(None, WidgetBase::new(Rect::new(5.0, 5.0, 100.0, 100.0)).disabled(true))
            .unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        log_events(&mut ui, panel, &log);

        ui.begin_frame(vec2(20.0, 20.0));
        ui.input_mut().press(MouseButton::Left);
        ui.update(&surface);
        assert_eq!(*log.borrow(), vec!["in"]);
    }

    #[test]
    fn test_deepest_tooltip_wins() {
        let (mut ui, surface) = setup();
        let outer = ui
            .add_panel(None, WidgetBase::new(Rect::new(0.0, 0.0, 100.0, 100.0)).with_tooltip("outer"))
            .unwrap();
        ui.add_panel(outer, WidgetBase::new(Rect::new(10.0, 10.0, 50.0, 50.0)).with_tooltip("inner"))
            .unwrap();

        ui.begin_frame(vec2(20.0, 20.0));
        ui.update(&surface);
        assert_eq!(ui.tooltip(), Some("inner"));
        ui.begin_frame(vec2(80.0, 80.0));
        ui.update(&surface);
        assert_eq!(ui.tooltip(), Some("outer"));
        ui.begin_frame(vec2(300.0, 200.0));
        ui.update(&surface);
        assert_eq!(ui.tooltip(), None);
    }

    #[test]
    fn test_key_callback_stops_propagation() {
        let (mut ui, surface) = setup();
        let first = ui.add_panel(None, WidgetBase::default()).unwrap();
        let second = ui.add_panel(None, WidgetBase::default()).unwrap();
        let hits = Rc::new(RefCell::new(Vec::new()));
        for (id, handled) in [(first, true), (second, true)] {
            let hits = Rc::clone(&hits);
            ui.interactive_mut(id).unwrap().on_keys = Some(Box::new(move |_, id| {
                hits.borrow_mut().push(id);
                handled
            }));
        }
        ui.begin_frame(Vec2::ZERO);
        ui.update(&surface);
        assert_eq!(*hits.borrow(), vec![first]);
    }

    #[test]
    fn test_escape_closes_popups_and_is_consumed() {
        let (mut ui, surface) = setup();
        let popup = ui
            .add_top_level(WidgetBase::new(Rect::new(0.0, 0.0, 50.0, 50.0)), crate::widget::Panel)
            .unwrap();
        ui.pop_up(popup);
        let keys = Rc::new(RefCell::new(0));
        let k = Rc::clone(&keys);
        let root = ui.root();
        ui.interactive_mut(root).unwrap().on_keys = Some(Box::new(move |_, _| {
            *k.borrow_mut() += 1;
            false
        }));

        ui.begin_frame(vec2(200.0, 200.0));
        ui.input_mut().press(Key::Escape);
        ui.update(&surface);
        assert!(!ui.is_popup_mode());
        assert!(!ui.contains(popup));
        assert_eq!(*keys.borrow(), 0);

        ui.begin_frame(vec2(200.0, 200.0));
        ui.update(&surface);
        assert_eq!(*keys.borrow(), 1);
    }

    #[test]
    fn test_left_press_elsewhere_clears_focus() {
        let (mut ui, surface) = setup();
        let edit = ui
            .add_line_edit(None, WidgetBase::new(Rect::new(0.0, 0.0, 100.0, 20.0)))
            .unwrap();
        ui.begin_frame(vec2(10.0, 10.0));
        ui.input_mut().press(MouseButton::Left);
        ui.update(&surface);
        assert_eq!(ui.focus(), Some(edit));

        ui.begin_frame(vec2(200.0, 200.0));
        ui.input_mut().press(MouseButton::Left);
        ui.update(&surface);
        assert_eq!(ui.focus(), None);
    }
}
