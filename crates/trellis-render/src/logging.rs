//! Log targets for the render crate.

/// Target names for log filtering.
pub mod targets {
    /// Font and image sheet registration.
    pub const ASSETS: &str = "trellis_render::assets";
    /// Drawing through a surface.
    pub const DRAW: &str = "trellis_render::draw";
}
