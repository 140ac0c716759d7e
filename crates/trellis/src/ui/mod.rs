//! The UI context.
//!
//! [`Ui`] owns the widget tree, the popup stack, keyboard focus, the
//! active theme, the frame's input and the frame clock. Everything the
//! widgets and callbacks touch goes through it; there is no global state.
//!
//! A frame is driven by the host:
//!
//! 1. [`Ui::begin_frame`] with the pointer position, then button and key
//!    edges through [`Ui::input_mut`];
//! 2. [`Ui::frame`], which dispatches input, renders, drains queued tasks
//!    and runs the events hook.
//!
//! ```
//! use trellis::ui::Ui;
//! use trellis::widget::WidgetBase;
//! use trellis_core::{Rect, vec2};
//! use trellis_render::RecordingSurface;
//! use trellis_style::themes;
//!
//! let mut ui = Ui::new(Rect::from_size(320.0, 240.0), themes::plain());
//! let button = ui
//!     .add_button(None, WidgetBase::new(Rect::new(10.0, 10.0, 90.0, 40.0)).with_text("OK"))
//!     .unwrap();
//! ui.place(button, vec2(-1.0, -1.0));
//! assert_eq!(ui.global_rect(button), Some(Rect::new(240.0, 210.0, 320.0, 240.0)));
//!
//! let mut surface = RecordingSurface::new();
//! ui.begin_frame(vec2(250.0, 220.0));
//! ui.frame(&mut surface);
//! assert_eq!(surface.texts(), vec!["OK"]);
//! ```

mod dispatch;
mod popup;
mod render;

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use trellis_core::{Rect, Tree, TreeDebug, Vec2};
use trellis_style::Theme;

use crate::clock::FrameClock;
use crate::config::UiConfig;
use crate::error::Result;
use crate::input::InputState;
use crate::logging::targets;
use crate::widget::interactive::Interactive;
use crate::widget::{
    Callback, DrawHook, LineEdit, Notification, Panel, PushButton, Widget, WidgetBase, WidgetId,
    WidgetNode,
};

/// Work handed back to the frame thread, run once per frame.
pub type Task = Box<dyn FnOnce(&mut Ui) + Send>;

/// Host callback run at the end of every frame.
pub type EventsHook = Box<dyn FnMut(&mut Ui)>;

/// The widget tree and everything needed to dispatch and render it.
pub struct Ui {
    tree: Tree<WidgetNode>,
    root: WidgetId,
    popups: Vec<WidgetId>,
    focus: Option<WidgetId>,
    tooltip: Option<String>,
    theme: Arc<Theme>,
    input: InputState,
    clock: FrameClock,
    config: UiConfig,
    task_tx: Sender<Task>,
    task_rx: Receiver<Task>,
    events: Option<EventsHook>,
}

impl Ui {
    /// Creates a UI covering `rect` in surface coordinates.
    ///
    /// The root is a phantom panel: it draws nothing itself, but its
    /// children and draw hook render.
    pub fn new(rect: Rect, theme: impl Into<Arc<Theme>>) -> Self {
        let mut tree = Tree::new();
        let root_base = WidgetBase::new(rect).phantom(true);
        let root = tree.insert(WidgetNode::new(root_base, Box::new(Panel)));
        let (task_tx, task_rx) = crossbeam_channel::unbounded();
        Self {
            tree,
            root,
            popups: Vec::new(),
            focus: None,
            tooltip: None,
            theme: theme.into(),
            input: InputState::new(),
            clock: FrameClock::new(),
            config: UiConfig::default(),
            task_tx,
            task_rx,
            events: None,
        }
    }

    pub fn with_config(mut self, config: UiConfig) -> Self {
        self.config = config;
        self
    }

    /// The root panel. Widgets inserted without a parent are attached to it.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: impl Into<Arc<Theme>>) {
        self.theme = theme.into();
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// The tooltip set by the last dispatch, if any.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Starts a frame with the host pointer position, converted to logical
    /// pixels.
    pub fn begin_frame(&mut self, pointer: Vec2) {
        let pos = self.config.logical_pos(pointer);
        self.input.begin_frame(pos);
    }

    // Tree

    /// Adds a widget under `parent`, or under the root when `parent` is
    /// `None`.
    pub fn add_widget(
        &mut self,
        parent: impl Into<Option<WidgetId>>,
        base: WidgetBase,
        widget: impl Widget,
    ) -> Result<WidgetId> {
        let parent = parent.into().unwrap_or(self.root);
        self.insert_node(Some(parent), base, Box::new(widget))
    }

    /// Adds a widget with no parent. Its rectangle is in surface
    /// coordinates. Top-level widgets are only rendered and dispatched
    /// while they are on the popup stack.
    pub fn add_top_level(&mut self, base: WidgetBase, widget: impl Widget) -> Result<WidgetId> {
        self.insert_node(None, base, Box::new(widget))
    }

    pub fn add_panel(&mut self, parent: impl Into<Option<WidgetId>>, base: WidgetBase) -> Result<WidgetId> {
        self.add_widget(parent, base, Panel)
    }

    pub fn add_button(&mut self, parent: impl Into<Option<WidgetId>>, base: WidgetBase) -> Result<WidgetId> {
        self.add_widget(parent, base, PushButton::new())
    }

    pub fn add_line_edit(
        &mut self,
        parent: impl Into<Option<WidgetId>>,
        base: WidgetBase,
    ) -> Result<WidgetId> {
        self.add_widget(parent, base, LineEdit::new())
    }

    fn insert_node(
        &mut self,
        parent: Option<WidgetId>,
        base: WidgetBase,
        widget: Box<dyn Widget>,
    ) -> Result<WidgetId> {
        let node = WidgetNode::new(base, widget);
        let kind = node.kind();
        let id = match parent {
            Some(parent) => self.tree.insert_child(parent, node)?,
            None => self.tree.insert(node),
        };
        tracing::trace!(target: targets::WIDGET, ?id, ?parent, ?kind, "widget created");
        Ok(id)
    }

    /// Moves `child` under `parent`. Fails for stale handles and cycles.
    pub fn foster(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.tree.foster(parent, child)?;
        tracing::trace!(target: targets::WIDGET, ?parent, ?child, "widget fostered");
        Ok(())
    }

    /// Closes a widget and all its descendants. Stale handles are ignored.
    ///
    /// Closed widgets lose focus and leave the popup stack.
    pub fn close(&mut self, id: WidgetId) {
        if id == self.root {
            tracing::warn!(target: targets::WIDGET, "ignoring request to close the root");
            return;
        }
        let closed = self.tree.close(id);
        if closed.is_empty() {
            return;
        }
        if let Some(focus) = self.focus
            && !self.tree.contains(focus)
        {
            self.focus = None;
        }
        let tree = &self.tree;
        self.popups.retain(|&p| tree.contains(p));
        tracing::trace!(target: targets::WIDGET, ?id, count = closed.len(), "widgets closed");
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.tree.contains(id)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.tree.parent(id)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.tree.children(id)
    }

    pub fn node(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.tree.get(id)
    }

    pub fn node_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.tree.get_mut(id)
    }

    pub fn base(&self, id: WidgetId) -> Option<&WidgetBase> {
        self.tree.get(id).map(|n| &n.base)
    }

    pub fn base_mut(&mut self, id: WidgetId) -> Option<&mut WidgetBase> {
        self.tree.get_mut(id).map(|n| &mut n.base)
    }

    /// The concrete widget behind `id`, if it is a `T`.
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.tree.get(id)?.downcast_ref()
    }

    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.tree.get_mut(id)?.downcast_mut()
    }

    /// Text of a widget, or `None` for stale handles.
    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.base(id).map(|b| b.text.as_str())
    }

    pub fn set_text(&mut self, id: WidgetId, text: impl Into<String>) {
        if let Some(base) = self.base_mut(id) {
            base.text = text.into();
        }
    }

    // Geometry

    /// The widget's rectangle in surface coordinates.
    pub fn global_rect(&self, id: WidgetId) -> Option<Rect> {
        let mut rect = self.tree.get(id)?.base.rect;
        for ancestor in self.tree.ancestors(id) {
            if let Some(node) = self.tree.get(ancestor) {
                rect = rect.moved(node.base.rect.min);
            }
        }
        Some(rect)
    }

    /// Moves the widget to `rel` inside its parent, keeping its size.
    ///
    /// A negative component counts from the far edge as
    /// `parent - child - (rel + 1)`: `-1` puts the widget flush with the
    /// parent's right (or top) edge and `-11` ten pixels further out.
    /// Parentless widgets are left alone.
    pub fn place(&mut self, id: WidgetId, rel: Vec2) {
        let Some(parent_size) = self
            .tree
            .parent(id)
            .and_then(|p| self.tree.get(p))
            .map(|p| p.base.rect.size())
        else {
            return;
        };
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        let size = node.base.rect.size();
        let from_far = |rel: f32, parent: f32, child: f32| {
            if rel < 0.0 { parent - child - (rel + 1.0) } else { rel }
        };
        let min = Vec2::new(
            from_far(rel.x, parent_size.x, size.x),
            from_far(rel.y, parent_size.y, size.y),
        );
        node.base.rect = Rect::from_min_size(min, size);
    }

    /// The topmost widget at `pos` in the subtree of `id`.
    ///
    /// Later children are tested first, so where siblings overlap the last
    /// added one wins.
    pub fn widget_under(&self, id: WidgetId, pos: Vec2) -> Option<WidgetId> {
        let origin = self
            .tree
            .parent(id)
            .and_then(|p| self.global_rect(p))
            .map_or(Vec2::ZERO, |r| r.min);
        self.widget_under_at(id, origin, pos)
    }

    fn widget_under_at(&self, id: WidgetId, origin: Vec2, pos: Vec2) -> Option<WidgetId> {
        let rect = self.tree.get(id)?.base.rect.moved(origin);
        for &child in self.tree.children(id).iter().rev() {
            if let Some(hit) = self.widget_under_at(child, rect.min, pos) {
                return Some(hit);
            }
        }
        rect.contains(pos).then_some(id)
    }

    // Callbacks

    /// Sets the handler for a widget notification, replacing any previous
    /// one.
    pub fn connect(
        &mut self,
        id: WidgetId,
        notification: Notification,
        handler: impl FnMut(&mut Ui, WidgetId) + 'static,
    ) {
        if let Some(node) = self.tree.get_mut(id) {
            node.handlers.insert(notification, Box::new(handler) as Callback);
        }
    }

    pub fn on_press(&mut self, id: WidgetId, handler: impl FnMut(&mut Ui, WidgetId) + 'static) {
        self.connect(id, Notification::Pressed, handler);
    }

    pub fn on_text_changed(&mut self, id: WidgetId, handler: impl FnMut(&mut Ui, WidgetId) + 'static) {
        self.connect(id, Notification::TextChanged, handler);
    }

    pub fn on_editing_finished(
        &mut self,
        id: WidgetId,
        handler: impl FnMut(&mut Ui, WidgetId) + 'static,
    ) {
        self.connect(id, Notification::EditingFinished, handler);
    }

    /// The raw input callbacks of a widget.
    pub fn interactive_mut(&mut self, id: WidgetId) -> Option<&mut Interactive> {
        self.tree.get_mut(id).map(|n| &mut n.interactive)
    }

    /// Sets custom drawing run after the widget's own visuals.
    pub fn set_on_draw(&mut self, id: WidgetId, hook: impl FnMut(&mut dyn trellis_render::Surface, Rect) + 'static) {
        if let Some(node) = self.tree.get_mut(id) {
            node.on_draw = Some(Box::new(hook) as DrawHook);
        }
    }

    /// Runs the handler connected to `notification` on `id`.
    pub fn notify(&mut self, id: WidgetId, notification: Notification) {
        let Some(mut handler) = self
            .tree
            .get_mut(id)
            .and_then(|n| n.handlers.remove(&notification))
        else {
            return;
        };
        handler(self, id);
        if let Some(node) = self.tree.get_mut(id) {
            node.handlers.entry(notification).or_insert(handler);
        }
    }

    // Focus

    pub fn focus(&self) -> Option<WidgetId> {
        self.focus
    }

    pub fn has_focus(&self, id: WidgetId) -> bool {
        self.focus == Some(id)
    }

    /// Gives keyboard focus to `id`, or drops it with `None`.
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        let id = id.filter(|&id| self.tree.contains(id));
        if self.focus != id {
            tracing::trace!(target: targets::FOCUS, from = ?self.focus, to = ?id, "focus changed");
            self.focus = id;
        }
    }

    // Host integration

    /// A sender for work to run on the frame thread. Tasks run once per
    /// frame, before the events hook.
    pub fn task_sender(&self) -> Sender<Task> {
        self.task_tx.clone()
    }

    /// Runs every queued task.
    pub fn run_tasks(&mut self) -> usize {
        let mut count = 0;
        while let Ok(task) = self.task_rx.try_recv() {
            task(self);
            count += 1;
        }
        count
    }

    /// Sets the callback run at the end of every frame.
    pub fn set_events(&mut self, hook: impl FnMut(&mut Ui) + 'static) {
        self.events = Some(Box::new(hook));
    }

    fn run_events(&mut self) {
        let Some(mut hook) = self.events.take() else {
            return;
        };
        hook(self);
        if self.events.is_none() {
            self.events = Some(hook);
        }
    }

    /// Indented dump of the tree below `id`, one widget per line.
    pub fn dump_tree(&self, id: WidgetId) -> String {
        TreeDebug::new(&self.tree, |_, node: &WidgetNode| {
            let rect = node.base.rect;
            format!(
                "{:?} {:?} ({}, {})-({}, {})",
                node.kind(),
                node.base.text,
                rect.min.x,
                rect.min.y,
                rect.max.x,
                rect.max.y
            )
        })
        .format_tree(id)
    }

    /// The theme a widget is drawn with.
    fn theme_for(&self, id: WidgetId) -> Arc<Theme> {
        self.tree
            .get(id)
            .and_then(|n| n.base.theme.clone())
            .unwrap_or_else(|| Arc::clone(&self.theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::vec2;
    use trellis_style::themes;

    fn setup() -> Ui {
        Ui::new(Rect::from_size(400.0, 300.0), themes::plain())
    }

    #[test]
    fn test_parentless_insert_goes_under_root() {
        let mut ui = setup();
        let panel = ui.add_panel(None, WidgetBase::new(Rect::from_size(10.0, 10.0))).unwrap();
        assert_eq!(ui.parent(panel), Some(ui.root()));
        let top = ui.add_top_level(WidgetBase::default(), Panel).unwrap();
        assert_eq!(ui.parent(top), None);
    }

    #[test]
    fn test_close_drops_focus() {
        let mut ui = setup();
        let panel = ui.add_panel(None, WidgetBase::new(Rect::from_size(50.0, 50.0))).unwrap();
        let edit = ui.add_line_edit(panel, WidgetBase::new(Rect::from_size(40.0, 20.0))).unwrap();
        ui.set_focus(Some(edit));
        ui.close(panel);
        assert!(!ui.contains(edit));
        assert_eq!(ui.focus(), None);
        // Closing again is a no-op.
        ui.close(panel);
    }

    #[test]
    fn test_root_cannot_be_closed() {
        let mut ui = setup();
        ui.close(ui.root());
        assert!(ui.contains(ui.root()));
    }

    #[test]
    fn test_place_keeps_size() {
        let mut ui = setup();
        let parent = ui.add_panel(None, WidgetBase::new(Rect::new(10.0, 10.0, 210.0, 210.0))).unwrap();
        let child = ui.add_panel(parent, WidgetBase::new(Rect::from_size(50.0, 50.0))).unwrap();
        ui.place(child, vec2(-11.0, 20.0));
        assert_eq!(ui.base(child).unwrap().rect, Rect::new(160.0, 20.0, 210.0, 70.0));
        assert_eq!(ui.global_rect(child), Some(Rect::new(170.0, 30.0, 220.0, 80.0)));

        ui.place(child, vec2(-11.0, -2.0));
        assert_eq!(ui.base(child).unwrap().rect.min, vec2(160.0, 151.0));
    }

    #[test]
    fn test_place_without_parent_is_noop() {
        let mut ui = setup();
        let top = ui.add_top_level(WidgetBase::new(Rect::from_size(5.0, 5.0)), Panel).unwrap();
        ui.place(top, vec2(-1.0, -1.0));
        assert_eq!(ui.base(top).unwrap().rect, Rect::from_size(5.0, 5.0));
    }

    #[test]
    fn test_widget_under_nested() {
        let mut ui = setup();
        let outer = ui.add_panel(None, WidgetBase::new(Rect::new(100.0, 100.0, 200.0, 200.0))).unwrap();
        let inner = ui.add_panel(outer, WidgetBase::new(Rect::new(10.0, 10.0, 20.0, 20.0))).unwrap();
        assert_eq!(ui.widget_under(ui.root(), vec2(115.0, 115.0)), Some(inner));
        assert_eq!(ui.widget_under(ui.root(), vec2(150.0, 150.0)), Some(outer));
        assert_eq!(ui.widget_under(ui.root(), vec2(5.0, 5.0)), Some(ui.root()));
        assert_eq!(ui.widget_under(outer, vec2(5.0, 5.0)), None);
        assert_eq!(ui.widget_under(inner, vec2(115.0, 115.0)), Some(inner));
    }

    #[test]
    fn test_notify_handler_may_replace_itself() {
        let mut ui = setup();
        let button = ui.add_button(None, WidgetBase::default()).unwrap();
        ui.on_press(button, |ui, id| {
            ui.set_text(id, "first");
            ui.on_press(id, |ui, id| ui.set_text(id, "second"));
        });
        ui.notify(button, Notification::Pressed);
        assert_eq!(ui.text(button), Some("first"));
        ui.notify(button, Notification::Pressed);
        assert_eq!(ui.text(button), Some("second"));
    }

    #[test]
    fn test_tasks_run_on_frame_thread() {
        let mut ui = setup();
        let label = ui.add_panel(None, WidgetBase::default()).unwrap();
        let sender = ui.task_sender();
        std::thread::spawn(move || {
            sender
                .send(Box::new(move |ui: &mut Ui| ui.set_text(label, "loaded")))
                .unwrap();
        })
        .join()
        .unwrap();
        assert_eq!(ui.run_tasks(), 1);
        assert_eq!(ui.text(label), Some("loaded"));
        assert_eq!(ui.run_tasks(), 0);
    }

    #[test]
    fn test_dump_tree() {
        let mut ui = setup();
        let panel = ui.add_panel(None, WidgetBase::new(Rect::from_size(10.0, 10.0)).with_text("p")).unwrap();
        ui.add_button(panel, WidgetBase::default().with_text("b")).unwrap();
        let dump = ui.dump_tree(ui.root());
        assert_eq!(dump.lines().count(), 3);
        assert!(dump.contains("Button \"b\""));
    }
}
