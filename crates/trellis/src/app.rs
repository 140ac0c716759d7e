//! The frame loop.
//!
//! [`App`] owns no window itself. A host backend implements
//! [`InputSource`] to feed its events into the [`Ui`] and a
//! [`Surface`] to draw on, and [`App::run`] drives them at the configured
//! rate.

use std::sync::Arc;

use trellis_core::Rect;
use trellis_render::Surface;
use trellis_style::Theme;

use crate::clock::FrameLimiter;
use crate::config::{SurfaceConfig, UiConfig, WindowConfig};
use crate::logging::targets;
use crate::ui::Ui;

/// Feeds host input into the UI once per frame.
pub trait InputSource {
    /// Starts the frame on `ui` and records this frame's input.
    ///
    /// Returns `false` once the window was closed, which ends the loop.
    fn poll(&mut self, ui: &mut Ui) -> bool;
}

/// Window and surface settings plus the loop that drives a [`Ui`].
#[derive(Debug, Clone, Default)]
pub struct App {
    window: WindowConfig,
    surface: SurfaceConfig,
}

impl App {
    pub fn new(window: WindowConfig, surface: SurfaceConfig) -> Self {
        Self { window, surface }
    }

    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }

    /// A UI covering the window in logical pixels.
    pub fn create_ui(&self, theme: impl Into<Arc<Theme>>) -> Ui {
        let scale = if self.surface.pixel_size > 0.0 {
            self.surface.pixel_size
        } else {
            1.0
        };
        let size = self.window.geometry.size();
        let config = UiConfig {
            pixel_size: scale,
            ..UiConfig::default()
        };
        Ui::new(Rect::from_size(size.x / scale, size.y / scale), theme).with_config(config)
    }

    /// Runs frames until `source` reports the window closed. Returns the
    /// number of frames drawn.
    pub fn run(&self, ui: &mut Ui, surface: &mut dyn Surface, source: &mut dyn InputSource) -> usize {
        tracing::info!(
            target: targets::APP,
            title = %self.window.title,
            fps = self.window.fps,
            "starting frame loop"
        );
        let mut limiter = FrameLimiter::new(self.window.fps);
        let mut frames = 0;
        while source.poll(ui) {
            if let Some(color) = self.surface.back_color {
                surface.clear(color);
            }
            ui.frame(surface);
            surface.present();
            frames += 1;
            limiter.wait();
        }
        tracing::info!(target: targets::APP, frames, "frame loop finished");
        frames
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use trellis_core::{Vec2, vec2};
    use trellis_render::{Color, DrawCommand, RecordingSurface};
    use trellis_style::themes;

    use super::*;
    use crate::input::MouseButton;
    use crate::widget::{Notification, WidgetBase};

    /// Replays one pointer position and an optional left button edge per
    /// frame, `true` for a press.
    struct Script(VecDeque<(Vec2, Option<bool>)>);

    impl InputSource for Script {
        fn poll(&mut self, ui: &mut Ui) -> bool {
            let Some((pos, edge)) = self.0.pop_front() else {
                return false;
            };
            ui.begin_frame(pos);
            match edge {
                Some(true) => ui.input_mut().press(MouseButton::Left),
                Some(false) => ui.input_mut().release(MouseButton::Left),
                None => {}
            }
            true
        }
    }

    fn setup() -> App {
        App::new(
            WindowConfig {
                geometry: Rect::from_size(200.0, 100.0),
                fps: 0,
                ..Default::default()
            },
            SurfaceConfig {
                pixel_size: 2.0,
                back_color: Some(Color::WHITE),
            },
        )
    }

    #[test]
    fn test_create_ui_uses_logical_pixels() {
        let app = setup();
        let ui = app.create_ui(themes::plain());
        assert_eq!(ui.base(ui.root()).map(|b| b.rect), Some(Rect::from_size(100.0, 50.0)));
        assert_eq!(ui.config().pixel_size, 2.0);
    }

    #[test]
    fn test_run_until_source_closes() {
        let app = setup();
        let mut ui = app.create_ui(themes::plain());
        let button = ui
            .add_button(None, WidgetBase::new(Rect::new(10.0, 10.0, 40.0, 30.0)))
            .unwrap();
        let pressed = std::rc::Rc::new(std::cell::Cell::new(0));
        let p = pressed.clone();
        ui.connect(button, Notification::Pressed, move |_, _| p.set(p.get() + 1));

        // Host coordinates are twice the logical ones.
        let mut source = Script(VecDeque::from([
            (vec2(40.0, 40.0), Some(true)),
            (vec2(40.0, 40.0), Some(false)),
            (vec2(0.0, 0.0), None),
        ]));
        let mut surface = RecordingSurface::new();
        let frames = app.run(&mut ui, &mut surface, &mut source);

        assert_eq!(frames, 3);
        assert_eq!(pressed.get(), 1);
        let commands = surface.commands();
        assert_eq!(commands.first(), Some(&DrawCommand::Clear(Color::WHITE)));
        let presents = commands.iter().filter(|c| **c == DrawCommand::Present).count();
        assert_eq!(presents, 3);
    }
}
