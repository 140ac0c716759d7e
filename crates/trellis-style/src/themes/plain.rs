use trellis_render::Color;

use crate::cursor::RectCursor;
use crate::drawer::PlainRect;
use crate::theme::{DrawState, Theme, WidgetKind};

/// A flat grey theme that needs no fonts or images.
pub fn plain() -> Theme {
    let border = Color::rgb(0.4, 0.4, 0.4);
    let panel = PlainRect::filled(Color::rgb(0.7, 0.7, 0.7)).with_border(border, 1.0);
    let button = PlainRect::filled(Color::rgb(0.8, 0.8, 0.8)).with_border(border, 1.0);
    let edit = PlainRect::filled(Color::WHITE).with_border(border, 1.0);

    Theme {
        text_color: Color::BLACK,
        panel_text_color: Color::BLACK,
        edit_text_color: Color::BLACK,
        disabled_text_color: Color::rgb(0.5, 0.5, 0.5),
        placeholder_color: Color::rgb(0.6, 0.6, 0.6),
        tooltip_color: Color::BLACK,
        pad: 4.0,
        cursor: RectCursor {
            color1: Color::BLACK,
            color2: Color::TRANSPARENT,
            width: 2.0,
            pulse_interval: 1.0,
        },
        ..Theme::default()
    }
    .with_drawer(WidgetKind::Panel, DrawState::Normal, panel)
    .with_drawer(WidgetKind::Button, DrawState::Normal, button)
    .with_drawer(
        WidgetKind::Button,
        DrawState::Hover,
        PlainRect::filled(Color::rgb(0.9, 0.9, 0.9)).with_border(border, 1.0),
    )
    .with_drawer(
        WidgetKind::Button,
        DrawState::Active,
        PlainRect::filled(Color::rgb(0.6, 0.6, 0.6)).with_border(border, 1.0),
    )
    .with_drawer(
        WidgetKind::Button,
        DrawState::Disabled,
        PlainRect::filled(Color::rgb(0.75, 0.75, 0.75)).with_border(Color::rgb(0.6, 0.6, 0.6), 1.0),
    )
    .with_drawer(WidgetKind::LineEdit, DrawState::Normal, edit)
    .with_drawer(
        WidgetKind::Tooltip,
        DrawState::Normal,
        PlainRect::filled(Color::rgb(1.0, 1.0, 0.85)).with_border(Color::BLACK, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_complete() {
        let theme = plain();
        theme.validate().unwrap();
        assert!(theme.drawer(WidgetKind::LineEdit, DrawState::Hover).is_some());
    }
}
