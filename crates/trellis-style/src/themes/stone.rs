use std::path::Path;

use trellis_render::{Color, Surface};

use crate::cursor::RectCursor;
use crate::drawer::{MultiDrawer, ParticleDrawer, PlainRect};
use crate::error::Result;
use crate::logging::targets;
use crate::textured::TexturedPanel;
use crate::theme::{DrawState, Theme, WidgetKind};

/// Font name the stone theme registers its title font under.
pub const STONE_FONT: &str = "stone-title";

/// Images the stone theme expects its sheet to define.
pub const STONE_IMAGES: [&str; 5] = ["stone-pn", "stone-bt", "stone-le", "stone-orn2", "stone-orn3"];

/// Builds the stone theme, registering its font and image sheet with
/// `surface`.
///
/// Hover states include a [`ParticleDrawer`], so widgets that carry a
/// particle group glitter while hovered.
pub fn stone(
    surface: &mut dyn Surface,
    font_file: impl AsRef<Path>,
    font_size: f32,
    sheet_file: impl AsRef<Path>,
) -> Result<Theme> {
    surface.register_font(STONE_FONT, font_file.as_ref(), font_size)?;
    surface.load_images(sheet_file.as_ref())?;
    for name in STONE_IMAGES {
        if surface.image_size(name).is_none() {
            tracing::warn!(target: targets::THEME, name, "stone theme image missing from sheet");
        }
    }

    let theme = stone_theme();
    theme.validate()?;
    tracing::debug!(target: targets::THEME, font_size, "stone theme ready");
    Ok(theme)
}

/// The stone theme's drawers, fonts and colors, without registering any
/// assets. The surface must already know [`STONE_FONT`] and
/// [`STONE_IMAGES`] for it to draw as intended.
pub fn stone_theme() -> Theme {
    let dim = Color::rgb(0.7, 0.7, 0.7);

    let panel = MultiDrawer::new([
        TexturedPanel::new("stone-pn").tiled().into(),
        TexturedPanel::new("stone-orn3").with_margins(10.0).into(),
    ]);
    let button = MultiDrawer::new([
        TexturedPanel::new("stone-bt").tiled().into(),
        TexturedPanel::new("stone-orn2").with_margins(4.0).into(),
    ]);
    let button_active = MultiDrawer::new([
        TexturedPanel::new("stone-bt").tiled().with_tint(dim).into(),
        TexturedPanel::new("stone-orn2")
            .with_margins(4.0)
            .with_tint(dim)
            .into(),
    ]);
    let edit = MultiDrawer::new([
        TexturedPanel::new("stone-le").tiled().with_margins(6.0).into(),
        TexturedPanel::new("stone-orn2").with_margins(6.0).into(),
    ]);

    Theme {
        title_font: STONE_FONT.to_string(),
        tooltip_font: STONE_FONT.to_string(),
        text_color: Color::rgb(0.9, 0.7, 0.55),
        panel_text_color: Color::BLACK,
        edit_text_color: Color::WHITE,
        disabled_text_color: Color::rgb(0.8, 0.5, 0.5),
        placeholder_color: Color::rgb(0.7, 0.7, 0.7),
        tooltip_color: Color::BLACK,
        pad: 8.0,
        cursor: RectCursor {
            color1: Color::WHITE,
            color2: Color::TRANSPARENT,
            width: 3.0,
            pulse_interval: 1.0,
        },
        ..Theme::default()
    }
    .with_drawer(WidgetKind::Panel, DrawState::Normal, panel)
    .with_drawer(WidgetKind::Button, DrawState::Hover, button.and(ParticleDrawer))
    .with_drawer(WidgetKind::Button, DrawState::Normal, button)
    .with_drawer(WidgetKind::Button, DrawState::Active, button_active)
    .with_drawer(WidgetKind::LineEdit, DrawState::Hover, edit.and(ParticleDrawer))
    .with_drawer(WidgetKind::LineEdit, DrawState::Normal, edit)
    .with_drawer(
        WidgetKind::Tooltip,
        DrawState::Normal,
        PlainRect::filled(Color::rgb(1.0, 0.95, 0.8)).with_border(Color::BLACK, 1.0),
    )
}
