//! Log targets for the style crate.

/// Target names for log filtering.
pub mod targets {
    /// Theme construction and drawer lookup.
    pub const THEME: &str = "trellis_style::theme";
    /// Particle spawning and expiry.
    pub const PARTICLES: &str = "trellis_style::particles";
}
