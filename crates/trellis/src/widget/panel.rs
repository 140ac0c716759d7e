//! Plain panel widget.

use trellis_style::WidgetKind;

use super::Widget;

/// A panel draws its background, image and text and has no behaviour of
/// its own. It is also the usual container for other widgets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panel;

impl Widget for Panel {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Panel
    }
}
