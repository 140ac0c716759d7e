//! Rendering and the per-frame tick.

use trellis_core::{Align, Vec2, vec2};
use trellis_render::Surface;
use trellis_style::{DrawExtras, DrawState, WidgetKind};

use super::Ui;
use crate::widget::{PaintContext, WidgetId};

impl Ui {
    /// Runs one frame: dispatch, render, queued tasks and the events hook,
    /// then advances the clock.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn frame(&mut self, surface: &mut dyn Surface) {
        self.update(&*surface);
        self.render(surface);
        self.run_tasks();
        self.run_events();
        self.clock.tick();
    }

    /// Draws the main tree, then the tooltip, then each popup in stack
    /// order.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        self.render_widget(self.root, Vec2::ZERO, surface);
        self.render_tooltip(surface);
        for popup in self.top_level_popups() {
            self.render_widget(popup, Vec2::ZERO, surface);
        }
    }

    /// Paints `id` and then its children in order, later children on top.
    fn render_widget(&mut self, id: WidgetId, origin: Vec2, surface: &mut dyn Surface) {
        let theme = self.theme_for(id);
        let focused = self.focus == Some(id);
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        let rect = node.base.rect.moved(origin);
        if !node.base.phantom {
            let mut ctx = PaintContext {
                surface: &mut *surface,
                base: &mut node.base,
                rect,
                theme: &theme,
                focused,
                clock: &self.clock,
            };
            node.widget.paint(&mut ctx);
        }
        if let Some(hook) = node.on_draw.as_mut() {
            hook(&mut *surface, rect);
        }

        let children = self.tree.children(id).to_vec();
        for child in children {
            self.render_widget(child, rect.min, surface);
        }
    }

    fn render_tooltip(&self, surface: &mut dyn Surface) {
        let Some(text) = &self.tooltip else {
            return;
        };
        let theme = &self.theme;
        let pad = theme.pad;
        let rect = surface
            .text_rect(text, &theme.tooltip_font)
            .moved(self.input.mouse_pos())
            .expanded(pad)
            .moved(vec2(pad, pad));
        if let Some(drawer) = theme.drawer(WidgetKind::Tooltip, DrawState::Normal) {
            drawer.draw(surface, rect, &mut DrawExtras::at(self.clock.total_time()));
        }
        surface.draw_text(text, &theme.tooltip_font, rect, theme.tooltip_color, Align::Center);
    }
}
