//! Themes: fonts, colors and drawers keyed by widget state.
//!
//! A [`Theme`] does not know about widgets. Widgets ask it for the
//! [`Drawer`] matching their [`WidgetKind`] and current [`DrawState`], and
//! for the fonts and colors to put text on top of it.
//!
//! # Drawer lookup
//!
//! ```
//! use trellis_style::{DrawState, Theme, WidgetKind};
//!
//! let theme = trellis_style::themes::plain();
//!
//! // Precedence is disabled > active > hover > normal.
//! let state = DrawState::resolve(false, true, true);
//! assert_eq!(state, DrawState::Active);
//!
//! // Panels have no hover drawer in the plain theme, so the normal one is used.
//! assert!(theme.drawer(WidgetKind::Panel, DrawState::Hover).is_some());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use trellis_render::Color;

use crate::cursor::RectCursor;
use crate::drawer::Drawer;
use crate::error::{Error, Result};
use crate::logging::targets;

/// The kinds of widgets a theme knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Panel,
    Button,
    LineEdit,
    Tooltip,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 4] = [Self::Panel, Self::Button, Self::LineEdit, Self::Tooltip];
}

/// The visual state a widget is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawState {
    #[default]
    Normal,
    Disabled,
    Hover,
    Active,
}

impl DrawState {
    /// Picks the state to draw from widget flags.
    pub fn resolve(disabled: bool, active: bool, hover: bool) -> Self {
        if disabled {
            Self::Disabled
        } else if active {
            Self::Active
        } else if hover {
            Self::Hover
        } else {
            Self::Normal
        }
    }
}

/// Key of a drawer in a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawerKey {
    pub kind: WidgetKind,
    pub state: DrawState,
}

impl DrawerKey {
    pub const fn new(kind: WidgetKind, state: DrawState) -> Self {
        Self { kind, state }
    }
}

/// Everything needed to draw widgets in a consistent look.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Font for panel, button and menu titles.
    pub title_font: String,
    pub tooltip_font: String,

    /// Text on buttons.
    pub text_color: Color,
    /// Text on plain panels.
    pub panel_text_color: Color,
    /// Text typed into line edits.
    pub edit_text_color: Color,
    pub disabled_text_color: Color,
    pub placeholder_color: Color,
    pub tooltip_color: Color,

    /// Space between a widget's border and its content.
    pub pad: f32,

    pub drawers: HashMap<DrawerKey, Drawer>,
    pub cursor: RectCursor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title_font: String::new(),
            tooltip_font: String::new(),
            text_color: Color::BLACK,
            panel_text_color: Color::BLACK,
            edit_text_color: Color::BLACK,
            disabled_text_color: Color::rgb(0.5, 0.5, 0.5),
            placeholder_color: Color::rgb(0.6, 0.6, 0.6),
            tooltip_color: Color::BLACK,
            pad: 4.0,
            drawers: HashMap::new(),
            cursor: RectCursor::default(),
        }
    }
}

impl Theme {
    /// Sets the drawer for a kind and state, replacing any previous one.
    pub fn set_drawer(&mut self, kind: WidgetKind, state: DrawState, drawer: impl Into<Drawer>) {
        self.drawers
            .insert(DrawerKey::new(kind, state), drawer.into());
    }

    /// Builder form of [`set_drawer`](Self::set_drawer).
    pub fn with_drawer(
        mut self,
        kind: WidgetKind,
        state: DrawState,
        drawer: impl Into<Drawer>,
    ) -> Self {
        self.set_drawer(kind, state, drawer);
        self
    }

    /// The drawer for `kind` in `state`, falling back to the kind's normal
    /// drawer.
    pub fn drawer(&self, kind: WidgetKind, state: DrawState) -> Option<&Drawer> {
        self.drawers
            .get(&DrawerKey::new(kind, state))
            .or_else(|| {
                tracing::trace!(target: targets::THEME, ?kind, ?state, "falling back to normal drawer");
                self.drawers.get(&DrawerKey::new(kind, DrawState::Normal))
            })
    }

    /// Text color for a widget of `kind` drawn in `state`.
    pub fn text_color_for(&self, kind: WidgetKind, state: DrawState) -> Color {
        if state == DrawState::Disabled {
            return self.disabled_text_color;
        }
        match kind {
            WidgetKind::Panel => self.panel_text_color,
            WidgetKind::Button => self.text_color,
            WidgetKind::LineEdit => self.edit_text_color,
            WidgetKind::Tooltip => self.tooltip_color,
        }
    }

    /// Checks that every widget kind has a normal drawer.
    pub fn validate(&self) -> Result<()> {
        for kind in WidgetKind::ALL {
            if !self
                .drawers
                .contains_key(&DrawerKey::new(kind, DrawState::Normal))
            {
                return Err(Error::missing_drawer(kind, DrawState::Normal));
            }
        }
        Ok(())
    }
}
