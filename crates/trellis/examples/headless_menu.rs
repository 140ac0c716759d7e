//! Drives a small UI without a window and prints what was drawn.
//!
//! Run with `RUST_LOG=trellis=debug` to watch dispatch and the popup stack.

use std::collections::VecDeque;

use trellis::render::{DrawCommand, RecordingSurface};
use trellis::style::themes;
use trellis::{
    App, InputSource, MenuOption, MouseButton, PopupMenu, Rect, SurfaceConfig, Ui, Vec2,
    WidgetBase, WindowConfig, vec2,
};

/// Pointer positions to replay, one per frame, each clicked once.
struct Clicks {
    queue: VecDeque<Vec2>,
    down: bool,
}

impl InputSource for Clicks {
    fn poll(&mut self, ui: &mut Ui) -> bool {
        let Some(&pos) = self.queue.front() else {
            return false;
        };
        ui.begin_frame(pos);
        if self.down {
            ui.input_mut().release(MouseButton::Left);
            self.queue.pop_front();
        } else {
            ui.input_mut().press(MouseButton::Left);
        }
        self.down = !self.down;
        true
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let app = App::new(
        WindowConfig {
            title: "Headless menu".to_string(),
            geometry: Rect::from_size(320.0, 240.0),
            fps: 0,
            ..Default::default()
        },
        SurfaceConfig::default(),
    );
    let mut ui = app.create_ui(themes::plain());

    let button = ui
        .add_button(None, WidgetBase::new(Rect::new(10.0, 200.0, 110.0, 230.0)).with_text("File"))
        .expect("root exists");
    ui.on_press(button, |ui, id| {
        let Some(rect) = ui.global_rect(id) else {
            return;
        };
        let anchor = Rect::new(rect.min.x, rect.min.y - 30.0, rect.max.x, rect.min.y);
        let options = vec![
            MenuOption::new("Open").on_select(|_, _| {
                println!("open chosen");
                true
            }),
            MenuOption::new("Save").disabled(true),
        ];
        if let Err(err) = PopupMenu::open(ui, WidgetBase::new(anchor), options) {
            eprintln!("could not open menu: {err}");
        }
    });

    // Open the menu, then pick its first option.
    let mut source = Clicks {
        queue: VecDeque::from([vec2(50.0, 215.0), vec2(50.0, 183.0)]),
        down: false,
    };
    let mut surface = RecordingSurface::new();
    let frames = app.run(&mut ui, &mut surface, &mut source);

    let texts = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Text { .. }))
        .count();
    println!("{frames} frames, {texts} text draws");
    println!("{}", ui.dump_tree(ui.root()));
}
