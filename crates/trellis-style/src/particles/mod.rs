//! Decorative particle effects.
//!
//! A [`ParticleGroup`] owns live particles and a [`ParticleGenerator`] that
//! spawns new ones. Each frame the group drops expired particles, asks the
//! generator for more, and lets every particle update its current look
//! from its lifetime fraction.
//!
//! ```
//! use trellis_style::particles::{BorderPlacer, GlitterEdge, ParticleGroup};
//!
//! let glitter = GlitterEdge::sparkle("ptc-star").with_seed(7);
//! let mut group = ParticleGroup::new(glitter);
//!
//! group.process(0.0);
//! assert!(group.len() > 0);
//!
//! // Particles live for one second.
//! group.process(1.5);
//! # let _ = BorderPlacer;
//! ```

mod glitter;
mod placer;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use trellis_core::{Rect, Vec2};
use trellis_render::{Color, Surface};

use crate::logging::targets;

pub use glitter::GlitterEdge;
pub use placer::{BorderPlacer, Placer};

/// Default limit on live particles per group.
pub const DEFAULT_HARD_CAP: usize = 128;

/// The look of a particle at one moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleData {
    /// Center, in surface coordinates.
    pub pos: Vec2,
    /// Side length of the square the image is stretched into.
    pub size: f32,
    pub color: Color,
}

impl Default for ParticleData {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: 0.0,
            color: Color::WHITE,
        }
    }
}

/// Updates a particle's current look from its initial look and lifetime
/// fraction in `[0, 1]`.
pub type Processor = Arc<dyn Fn(&ParticleData, &mut ParticleData, f32) + Send + Sync>;

/// One live particle.
#[derive(Clone)]
pub struct Particle {
    pub initial: ParticleData,
    pub current: ParticleData,
    pub image: String,
    pub spawned: f64,
    pub expires: f64,
    pub processor: Option<Processor>,
}

impl fmt::Debug for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Particle")
            .field("image", &self.image)
            .field("current", &self.current)
            .field("spawned", &self.spawned)
            .field("expires", &self.expires)
            .finish_non_exhaustive()
    }
}

impl Particle {
    /// A particle showing `image` from `spawned` until `expires`.
    pub fn new(image: impl Into<String>, data: ParticleData, spawned: f64, expires: f64) -> Self {
        Self {
            initial: data,
            current: data,
            image: image.into(),
            spawned,
            expires,
            processor: None,
        }
    }

    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processor = Some(processor);
        self
    }

    pub fn is_expired(&self, time: f64) -> bool {
        self.expires <= time
    }

    /// Fraction of the lifetime passed at `time`, clamped to `[0, 1]`.
    pub fn lifetime_fraction(&self, time: f64) -> f32 {
        let life = self.expires - self.spawned;
        if life <= 0.0 {
            return 1.0;
        }
        ((time - self.spawned) / life).clamp(0.0, 1.0) as f32
    }

    /// Runs the processor for `time`.
    pub fn process(&mut self, time: f64) {
        if let Some(processor) = &self.processor {
            let t = self.lifetime_fraction(time);
            processor(&self.initial, &mut self.current, t);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let size = self.current.size;
        let rect = Rect::from_size(size, size).with_center(self.current.pos);
        surface.draw_image_stretched(&self.image, rect, Some(self.current.color));
    }
}

/// Source of new particles for a group.
pub trait ParticleGenerator: Send {
    /// Returns a new particle to add at `time`, given the number of live
    /// particles, or `None` when no particle should spawn now.
    fn generate(&mut self, time: f64, live: usize) -> Option<Particle>;

    /// Adapts the generator to the rectangle it decorates.
    fn fit(&mut self, _bounds: Rect) {}
}

/// Live particles grouped by image, plus their generator.
pub struct ParticleGroup {
    particles: BTreeMap<String, Vec<Particle>>,
    pub hard_cap: usize,
    generator: Box<dyn ParticleGenerator>,
}

impl fmt::Debug for ParticleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticleGroup")
            .field("live", &self.len())
            .field("hard_cap", &self.hard_cap)
            .finish_non_exhaustive()
    }
}

impl ParticleGroup {
    pub fn new(generator: impl ParticleGenerator + 'static) -> Self {
        Self {
            particles: BTreeMap::new(),
            hard_cap: DEFAULT_HARD_CAP,
            generator: Box::new(generator),
        }
    }

    pub fn with_hard_cap(mut self, cap: usize) -> Self {
        self.hard_cap = cap;
        self
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over live particles, grouped by image name.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values().flatten()
    }

    /// Adds a particle directly, bypassing the generator and the cap.
    pub fn push(&mut self, particle: Particle) {
        self.particles
            .entry(particle.image.clone())
            .or_default()
            .push(particle);
    }

    /// Removes every particle. The generator is kept.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn fit(&mut self, bounds: Rect) {
        self.generator.fit(bounds);
    }

    /// Advances the group to `time`.
    ///
    /// Particles whose expiry is at or before `time` are removed, the
    /// generator is asked for new particles until it declines or the hard
    /// cap is reached, and every particle's processor runs.
    pub fn process(&mut self, time: f64) {
        let before = self.len();
        for list in self.particles.values_mut() {
            list.retain(|p| !p.is_expired(time));
        }
        self.particles.retain(|_, list| !list.is_empty());

        let mut live = self.len();
        let expired = before - live;
        while live < self.hard_cap {
            let Some(particle) = self.generator.generate(time, live) else {
                break;
            };
            self.push(particle);
            live += 1;
        }

        for particle in self.particles.values_mut().flatten() {
            particle.process(time);
        }
        tracing::trace!(target: targets::PARTICLES, time, expired, live, "particles processed");
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for particle in self.iter() {
            particle.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::vec2;
    use trellis_render::{DrawCommand, RecordingSurface};

    /// Spawns one particle per call, living `life` seconds.
    struct Steady {
        life: f64,
    }

    impl ParticleGenerator for Steady {
        fn generate(&mut self, time: f64, _live: usize) -> Option<Particle> {
            Some(Particle::new("dot", ParticleData::default(), time, time + self.life))
        }
    }

    /// Never spawns.
    struct Idle;

    impl ParticleGenerator for Idle {
        fn generate(&mut self, _time: f64, _live: usize) -> Option<Particle> {
            None
        }
    }

    #[test]
    fn test_particle_expiry() {
        let mut group = ParticleGroup::new(Idle);
        group.push(Particle::new("dot", ParticleData::default(), 0.0, 5.0));

        group.process(4.9);
        assert_eq!(group.len(), 1);

        group.process(5.1);
        assert!(group.is_empty());
    }

    #[test]
    fn test_expires_exactly_at_time() {
        let mut group = ParticleGroup::new(Idle);
        group.push(Particle::new("dot", ParticleData::default(), 0.0, 5.0));
        group.process(5.0);
        assert!(group.is_empty());
    }

    #[test]
    fn test_hard_cap() {
        let mut group = ParticleGroup::new(Steady { life: 10.0 }).with_hard_cap(5);
        group.process(0.0);
        assert_eq!(group.len(), 5);
        group.process(1.0);
        assert_eq!(group.len(), 5);
    }

    #[test]
    fn test_processor_gets_lifetime_fraction() {
        let mut group = ParticleGroup::new(Idle);
        let grow: Processor = Arc::new(|_, cur, t| cur.size = 10.0 * t);
        group.push(Particle::new("dot", ParticleData::default(), 2.0, 6.0).with_processor(grow));

        group.process(3.0);
        assert_eq!(group.iter().next().unwrap().current.size, 2.5);
    }

    #[test]
    fn test_draw_centers_square() {
        let mut surface = RecordingSurface::new();
        surface.insert_image("dot", vec2(8.0, 8.0));

        let data = ParticleData {
            pos: vec2(10.0, 10.0),
            size: 4.0,
            color: Color::rgba(1.0, 0.5, 0.5, 0.5),
        };
        Particle::new("dot", data, 0.0, 1.0).draw(&mut surface);

        assert_eq!(
            surface.commands(),
            &[DrawCommand::Image {
                name: "dot".into(),
                src: Rect::from_size(8.0, 8.0),
                dst: Rect::new(8.0, 8.0, 12.0, 12.0),
                tint: Some(Color::rgba(1.0, 0.5, 0.5, 0.5)),
            }]
        );
    }
}
