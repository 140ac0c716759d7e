//! Single line text input.
//!
//! A line edit keeps two positions into its text: the cursor and the
//! scroll offset of the first visible character. Both are byte indices on
//! grapheme cluster boundaries, so editing never splits a character.
//!
//! Keys are only handled while the line edit has focus. A left press
//! focuses it and moves the cursor to the end. Enter raises
//! [`Notification::EditingFinished`] and drops focus.

use trellis_core::{Align, vec2};
use trellis_render::TextMetrics;
use trellis_style::{DrawState, Theme, WidgetKind};
use unicode_segmentation::UnicodeSegmentation;

use super::{EventContext, Notification, PaintContext, Widget, WidgetEvent};
use crate::input::{Key, MouseButton};

/// Default maximum number of characters a line edit accepts.
pub const DEFAULT_TEXT_LIMIT: usize = 1000;

/// A single line text editor.
#[derive(Debug, Clone)]
pub struct LineEdit {
    cursor: usize,
    offset: usize,
    text_limit: usize,
    hovered: bool,
}

impl Default for LineEdit {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            text_limit: DEFAULT_TEXT_LIMIT,
            hovered: false,
        }
    }
}

impl LineEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of characters.
    ///
    /// Typed input is cut at the limit: characters that still fit are
    /// inserted and the rest of that frame's input is dropped. Once the text
    /// is full, further typing is ignored.
    pub fn with_text_limit(mut self, limit: usize) -> Self {
        self.text_limit = limit;
        self
    }

    /// Cursor position as a byte index into the text.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Byte index of the first visible character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn text_limit(&self) -> usize {
        self.text_limit
    }

    fn on_keys(&mut self, ctx: &mut EventContext<'_>) {
        let input = ctx.input;
        if input.just_pressed(Key::Enter) {
            ctx.notify(Notification::EditingFinished);
            ctx.clear_focus();
            self.offset = 0;
            self.update_offset(ctx);
            return;
        }

        let text = &mut ctx.base.text;
        self.cursor = snap_boundary(text, self.cursor);
        let mut changed = false;
        if input.pressed_or_repeated(Key::Backspace) {
            if self.cursor > 0 {
                let start = prev_boundary(text, self.cursor);
                text.replace_range(start..self.cursor, "");
                self.cursor = start;
                changed = true;
            }
        } else if input.pressed_or_repeated(Key::Delete) {
            if self.cursor < text.len() {
                let end = next_boundary(text, self.cursor);
                text.replace_range(self.cursor..end, "");
                changed = true;
            }
        } else if input.pressed_or_repeated(Key::Left) {
            self.cursor = prev_boundary(text, self.cursor);
            self.offset = self.offset.min(self.cursor);
        } else if input.pressed_or_repeated(Key::Right) {
            self.cursor = next_boundary(text, self.cursor);
        } else if input.just_pressed(Key::Home) {
            self.cursor = 0;
        } else if input.just_pressed(Key::End) {
            self.cursor = text.len();
        } else {
            let room = self.text_limit.saturating_sub(text.chars().count());
            let typed: String = input
                .typed()
                .chars()
                .filter(|c| !c.is_control())
                .take(room)
                .collect();
            if !typed.is_empty() {
                text.insert_str(self.cursor, &typed);
                self.cursor += typed.len();
                changed = true;
            }
        }

        if changed {
            ctx.notify(Notification::TextChanged);
        }
        self.update_offset(ctx);
    }

    /// Horizontal cursor position relative to the widget's left edge.
    fn cursor_x(&self, text: &str, metrics: &dyn TextMetrics, theme: &Theme) -> f32 {
        let pad = theme.pad;
        let offset = snap_boundary(text, self.offset);
        let cursor = snap_boundary(text, self.cursor);
        if text.is_empty() || cursor == offset {
            pad
        } else if cursor > offset {
            pad + metrics.text_width(&text[offset..cursor], &theme.title_font)
        } else {
            pad - metrics.text_width(&text[cursor..offset], &theme.title_font)
        }
    }

    /// Slides the scroll offset until the cursor is inside the visible
    /// width.
    fn update_offset(&mut self, ctx: &EventContext<'_>) {
        let text = &ctx.base.text;
        let pad = ctx.theme.pad;
        let width = ctx.rect.width();
        self.cursor = snap_boundary(text, self.cursor);
        self.offset = snap_boundary(text, self.offset);

        let mut x = self.cursor_x(text, ctx.metrics, ctx.theme);
        while x < width / 2.0 + pad && self.offset > 0 {
            self.offset = prev_boundary(text, self.offset);
            x = self.cursor_x(text, ctx.metrics, ctx.theme);
        }
        while x >= width - pad && self.offset < text.len() {
            self.offset = next_boundary(text, self.offset);
            x = self.cursor_x(text, ctx.metrics, ctx.theme);
        }
    }
}

impl Widget for LineEdit {
    fn kind(&self) -> WidgetKind {
        WidgetKind::LineEdit
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let state = ctx.state(false, self.hovered);
        ctx.draw_background(WidgetKind::LineEdit, state);

        let theme = ctx.theme;
        let pad = theme.pad;
        let (text, offset, color) = if ctx.base.text.is_empty() {
            (ctx.base.placeholder.as_str(), 0, theme.placeholder_color)
        } else {
            let offset = snap_boundary(&ctx.base.text, self.offset);
            let color = theme.text_color_for(WidgetKind::LineEdit, state);
            (ctx.base.text.as_str(), offset, color)
        };
        let max_width = ctx.rect.width() - pad * 2.0;
        let visible = visible_slice(text, offset, max_width, &*ctx.surface, &theme.title_font);
        if !visible.is_empty() {
            let area = ctx.rect.expanded(-pad);
            ctx.surface
                .draw_text(visible, &theme.title_font, area, color, Align::Left);
        }

        if ctx.focused && state != DrawState::Disabled {
            let x = self.cursor_x(&ctx.base.text, &*ctx.surface, theme);
            let height = ctx.rect.height() - pad * 2.0;
            ctx.draw_cursor(vec2(x, pad), height);
        }
    }

    fn event(&mut self, event: &WidgetEvent, ctx: &mut EventContext<'_>) -> bool {
        match *event {
            WidgetEvent::MouseIn => {
                self.hovered = true;
                false
            }
            WidgetEvent::MouseOut => {
                self.hovered = false;
                false
            }
            WidgetEvent::MouseDown(MouseButton::Left) => {
                ctx.request_focus();
                self.cursor = ctx.base.text.len();
                self.offset = 0;
                self.update_offset(ctx);
                true
            }
            WidgetEvent::Keys if ctx.focused => {
                self.on_keys(ctx);
                true
            }
            _ => false,
        }
    }
}

/// The grapheme boundary at or before `index`. The text may have been
/// replaced since the index was taken.
fn snap_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    text.grapheme_indices(true)
        .map(|(i, _)| i)
        .take_while(|&i| i <= index)
        .last()
        .unwrap_or(0)
}

fn prev_boundary(text: &str, index: usize) -> usize {
    text[..index]
        .grapheme_indices(true)
        .next_back()
        .map_or(0, |(i, _)| i)
}

fn next_boundary(text: &str, index: usize) -> usize {
    text[index..]
        .graphemes(true)
        .next()
        .map_or(index, |g| index + g.len())
}

/// The longest run of whole graphemes from `offset` that fits in
/// `max_width`.
fn visible_slice<'t>(
    text: &'t str,
    offset: usize,
    max_width: f32,
    metrics: &dyn TextMetrics,
    font: &str,
) -> &'t str {
    let mut end = offset;
    for (i, grapheme) in text[offset..].grapheme_indices(true) {
        let next = offset + i + grapheme.len();
        if metrics.text_width(&text[offset..next], font) > max_width {
            break;
        }
        end = next;
    }
    &text[offset..end]
}
