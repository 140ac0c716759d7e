//! Log targets for the widget toolkit.
//!
//! Nothing here installs a subscriber. Hosts pick one, for example
//! `tracing-subscriber` with an env filter such as
//! `trellis::popup=debug,trellis::dispatch=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Widget creation, closing and reparenting.
    pub const WIDGET: &str = "trellis::widget";
    /// Per-frame mouse and key routing.
    pub const DISPATCH: &str = "trellis::dispatch";
    /// Popup stack changes.
    pub const POPUP: &str = "trellis::popup";
    /// Focus changes.
    pub const FOCUS: &str = "trellis::focus";
    /// The frame loop.
    pub const APP: &str = "trellis::app";
}
