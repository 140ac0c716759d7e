use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use trellis_core::Rect;
use trellis_render::Color;

use super::placer::{BorderPlacer, Placer};
use super::{Particle, ParticleData, ParticleGenerator, Processor};

/// Spawns particles that grow and fade along the edge of a rectangle.
///
/// Below `min_particles` a particle spawns on every request. Above it,
/// one particle spawns every `spawn_tempo` seconds, and nothing spawns at
/// `max_particles`.
pub struct GlitterEdge {
    pub rect: Rect,
    pub placer: Box<dyn Placer>,
    pub image: String,
    pub color: Color,
    pub max_size: f32,
    /// Seconds a particle lives.
    pub life_time: f64,
    pub spawn_tempo: f64,
    pub min_particles: usize,
    pub max_particles: usize,
    /// Multiplies the size. Its argument goes from 0 to `curve_max_arg`
    /// over the lifetime.
    pub curve: Option<fn(f32) -> f32>,
    pub curve_max_arg: f32,
    /// How far inside a fitted rectangle particles appear.
    pub edge_inset: f32,

    time_to_spawn: f64,
    last_time: Option<f64>,
    rng: StdRng,
}

impl fmt::Debug for GlitterEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlitterEdge")
            .field("rect", &self.rect)
            .field("image", &self.image)
            .field("max_size", &self.max_size)
            .field("life_time", &self.life_time)
            .field("spawn_tempo", &self.spawn_tempo)
            .field("min_particles", &self.min_particles)
            .field("max_particles", &self.max_particles)
            .finish_non_exhaustive()
    }
}

impl GlitterEdge {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            rect: Rect::ZERO,
            placer: Box::new(BorderPlacer),
            image: image.into(),
            color: Color::WHITE,
            max_size: 4.0,
            life_time: 1.0,
            spawn_tempo: 1.0,
            min_particles: 0,
            max_particles: 16,
            curve: None,
            curve_max_arg: 1.0,
            edge_inset: 2.0,
            time_to_spawn: 0.0,
            last_time: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Small warm stars twinkling around a widget's border.
    pub fn sparkle(image: impl Into<String>) -> Self {
        Self {
            color: Color::rgba(1.0, 0.85, 0.5, 0.5),
            max_size: 4.0,
            life_time: 1.0,
            spawn_tempo: 2.0,
            min_particles: 4,
            max_particles: 16,
            curve: Some(f32::sin),
            curve_max_arg: std::f32::consts::PI,
            ..Self::new(image)
        }
    }

    /// Uses a deterministic random sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_placer(mut self, placer: impl Placer + 'static) -> Self {
        self.placer = Box::new(placer);
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    fn processor(&self) -> Processor {
        let max_size = self.max_size;
        let curve = self.curve;
        let max_arg = if self.curve_max_arg == 0.0 {
            1.0
        } else {
            self.curve_max_arg
        };
        Arc::new(move |_, current, t| {
            current.size = match curve {
                Some(f) => max_size * f(max_arg * t),
                None => max_size * t,
            };
        })
    }

    fn should_spawn(&mut self, time: f64, live: usize) -> bool {
        if self.life_time <= 0.0 || live >= self.max_particles {
            return false;
        }
        if live <= self.min_particles {
            return true;
        }
        let dt = self.last_time.map_or(0.0, |last| time - last);
        self.time_to_spawn -= dt;
        if self.time_to_spawn < 0.0 {
            self.time_to_spawn += self.spawn_tempo;
            true
        } else {
            false
        }
    }
}

impl ParticleGenerator for GlitterEdge {
    fn generate(&mut self, time: f64, live: usize) -> Option<Particle> {
        let spawn = self.should_spawn(time, live);
        self.last_time = Some(time);
        if !spawn {
            return None;
        }
        let data = ParticleData {
            pos: self.placer.place(self.rect, &mut self.rng),
            size: 0.0,
            color: self.color,
        };
        let particle = Particle::new(self.image.clone(), data, time, time + self.life_time)
            .with_processor(self.processor());
        Some(particle)
    }

    fn fit(&mut self, bounds: Rect) {
        self.rect = bounds.expanded(-self.edge_inset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::ParticleGroup;

    fn setup() -> GlitterEdge {
        GlitterEdge {
            min_particles: 2,
            max_particles: 4,
            spawn_tempo: 0.5,
            life_time: 10.0,
            ..GlitterEdge::new("star")
        }
        .with_rect(Rect::new(0.0, 0.0, 20.0, 10.0))
        .with_seed(1)
    }

    #[test]
    fn test_spawns_up_to_minimum_at_once() {
        let mut group = ParticleGroup::new(setup());
        group.process(0.0);
        // Spawns while at or below the minimum, then waits for the tempo.
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn test_tempo_throttles_above_minimum() {
        let mut group = ParticleGroup::new(setup());
        group.process(0.0);
        assert_eq!(group.len(), 3);

        group.process(0.1);
        assert_eq!(group.len(), 4);

        // Maximum reached.
        group.process(5.0);
        assert_eq!(group.len(), 4);
    }

    #[test]
    fn test_zero_lifetime_spawns_nothing() {
        let mut glitter = setup();
        glitter.life_time = 0.0;
        assert!(glitter.generate(0.0, 0).is_none());
    }

    #[test]
    fn test_size_follows_curve() {
        let mut glitter = GlitterEdge {
            max_size: 4.0,
            curve: Some(f32::sin),
            curve_max_arg: std::f32::consts::PI,
            ..GlitterEdge::new("star")
        }
        .with_seed(2);
        let mut particle = glitter.generate(0.0, 0).unwrap();

        particle.process(0.5);
        assert!((particle.current.size - 4.0).abs() < 1e-5);

        particle.process(0.0);
        assert!(particle.current.size.abs() < 1e-5);
    }

    #[test]
    fn test_linear_size_without_curve() {
        let mut glitter = GlitterEdge::new("star").with_seed(2);
        let mut particle = glitter.generate(0.0, 0).unwrap();
        particle.process(0.25);
        assert_eq!(particle.current.size, 1.0);
    }

    #[test]
    fn test_fit_insets_rect() {
        let mut glitter = GlitterEdge::new("star");
        glitter.fit(Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(glitter.rect, Rect::new(2.0, 2.0, 18.0, 8.0));
    }
}
