//! Popup menus.
//!
//! A popup menu is a top-level panel holding one push button per option,
//! stacked from the top down. Pressing an option unwinds any submenus
//! opened above the menu and runs the option's handler; the handler
//! returns `true` to close every popup.
//!
//! Submenus are opened from a handler by calling [`PopupMenu::open`]
//! again and returning `false`.

use std::fmt;

use trellis_core::Rect;
use trellis_style::WidgetKind;

use super::{PushButton, Widget, WidgetBase, WidgetId};
use crate::error::Result;
use crate::logging::targets;
use crate::ui::Ui;

/// Runs when an option is chosen, given the menu's id. Returning `true`
/// closes all popups.
pub type MenuHandler = Box<dyn FnMut(&mut Ui, WidgetId) -> bool>;

/// One option of a popup menu.
pub struct MenuOption {
    /// Identifier to look the option's button up with.
    pub id: Option<String>,
    pub text: String,
    pub image: Option<String>,
    pub disabled: bool,
    pub handler: Option<MenuHandler>,
}

impl MenuOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            image: None,
            disabled: false,
            handler: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_select(mut self, handler: impl FnMut(&mut Ui, WidgetId) -> bool + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }
}

impl fmt::Debug for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOption")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("image", &self.image)
            .field("disabled", &self.disabled)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

struct MenuEntry {
    id: Option<String>,
    button: WidgetId,
    handler: Option<MenuHandler>,
}

/// A popup column of option buttons.
#[derive(Default)]
pub struct PopupMenu {
    entries: Vec<MenuEntry>,
}

impl fmt::Debug for PopupMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.id, e.button)))
            .finish()
    }
}

impl Widget for PopupMenu {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Panel
    }
}

impl PopupMenu {
    /// Creates a menu and pushes it on the popup stack.
    ///
    /// `base.rect` gives the menu's top-left corner, its width and the
    /// vertical step between options, button height included. The menu
    /// grows downwards from the top edge of that rect.
    pub fn open(ui: &mut Ui, mut base: WidgetBase, options: Vec<MenuOption>) -> Result<WidgetId> {
        let pad = base.theme.as_ref().unwrap_or(ui.theme()).pad;
        let step = base.rect.height();
        let button_height = step - pad;
        let button_width = base.rect.width() - pad * 2.0;
        let count = options.len() as f32;

        base.rect = Rect::new(
            base.rect.min.x,
            base.rect.max.y - step * count - pad,
            base.rect.max.x,
            base.rect.max.y,
        );
        let menu_height = base.rect.height();
        let menu = ui.add_top_level(base, PopupMenu::default())?;

        let mut y = menu_height - pad;
        let mut entries = Vec::with_capacity(options.len());
        for (index, option) in options.into_iter().enumerate() {
            let rect = Rect::new(pad, y - button_height, pad + button_width, y);
            let mut button_base = WidgetBase::new(rect)
                .with_text(option.text)
                .disabled(option.disabled);
            button_base.image = option.image;
            let button = ui.add_widget(menu, button_base, PushButton::new())?;
            ui.on_press(button, move |ui, _| PopupMenu::activate(ui, menu, index));
            entries.push(MenuEntry {
                id: option.id,
                button,
                handler: option.handler,
            });
            y -= step;
        }
        if let Some(widget) = ui.widget_mut::<PopupMenu>(menu) {
            widget.entries = entries;
        }

        tracing::debug!(target: targets::POPUP, ?menu, options = count, "popup menu opened");
        ui.pop_up(menu);
        Ok(menu)
    }

    /// The button of the option with identifier `id`.
    pub fn button(&self, id: &str) -> Option<WidgetId> {
        self.entries
            .iter()
            .find(|e| e.id.as_deref() == Some(id))
            .map(|e| e.button)
    }

    /// Buttons of all options, top first.
    pub fn buttons(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.entries.iter().map(|e| e.button)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn activate(ui: &mut Ui, menu: WidgetId, index: usize) {
        ui.pop_down_to(Some(menu));
        let Some(mut handler) = ui
            .widget_mut::<PopupMenu>(menu)
            .and_then(|m| m.entries.get_mut(index))
            .and_then(|e| e.handler.take())
        else {
            return;
        };
        let close = handler(ui, menu);
        if let Some(entry) = ui
            .widget_mut::<PopupMenu>(menu)
            .and_then(|m| m.entries.get_mut(index))
            && entry.handler.is_none()
        {
            entry.handler = Some(handler);
        }
        if close {
            ui.pop_down_to(None);
        }
    }
}
