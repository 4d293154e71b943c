// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Particle state and population spawning
//!
//! A particle is a point mass with position, velocity, a per-run constant
//! radius, and a species encoded as three 0/1 color-channel intensities.
//! The interaction rules read the channel flags, not the species enum, so
//! the flags are the authoritative category representation.

use rand::Rng;

use crate::config::SimConfig;

/// Particle species, encoded into color channels at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    /// Red channel set
    Red,
    /// Green channel set
    Green,
    /// Blue channel set
    Blue,
}

impl Species {
    /// The 0/1 channel intensity triple for this species
    pub fn channels(self) -> [f32; 3] {
        match self {
            Species::Red => [1.0, 0.0, 0.0],
            Species::Green => [0.0, 1.0, 0.0],
            Species::Blue => [0.0, 0.0, 1.0],
        }
    }

    /// Draw a species uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Species {
        match rng.gen_range(0..3) {
            0 => Species::Red,
            1 => Species::Green,
            _ => Species::Blue,
        }
    }
}

/// A simulated point mass
///
/// Radius is immutable after construction; position and velocity are
/// mutated only by the update kernel. Mass is a run-wide constant held in
/// [`SimConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// X position
    pub x: f32,
    /// Y position
    pub y: f32,
    /// X velocity, in pixels per frame
    pub vx: f32,
    /// Y velocity, in pixels per frame
    pub vy: f32,
    /// Collision and render radius
    pub radius: f32,
    /// Red channel intensity (0 or 1)
    pub red: f32,
    /// Green channel intensity (0 or 1)
    pub green: f32,
    /// Blue channel intensity (0 or 1)
    pub blue: f32,
}

impl Particle {
    /// Create a particle at rest
    pub fn new(x: f32, y: f32, radius: f32, species: Species) -> Self {
        let [red, green, blue] = species.channels();
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius,
            red,
            green,
            blue,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Whether the red category flag is set
    pub fn is_red(&self) -> bool {
        self.red >= 0.5
    }

    /// Whether the green category flag is set
    pub fn is_green(&self) -> bool {
        self.green >= 0.5
    }

    /// Whether the blue category flag is set
    pub fn is_blue(&self) -> bool {
        self.blue >= 0.5
    }

    /// Color channel triple, as handed to the render sink
    pub fn color(&self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }

    /// Velocity magnitude
    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    /// Check that position and velocity are finite
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }
}

/// Maximum absolute spawn velocity component, in pixels per frame
pub const SPAWN_SPEED: f32 = 5.0;

/// Lay out the starting population on an evenly spaced grid
///
/// Places `floor(sqrt(population))²` particles across the viewport with
/// uniformly random velocity components in `[-SPAWN_SPEED, SPAWN_SPEED]`
/// and a uniformly random species each. A population below 4 collapses to
/// a single particle at the viewport center.
pub fn spawn_grid<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Vec<Particle> {
    let side = (config.population as f32).sqrt().floor() as usize;
    let side = side.max(1);

    let mut particles = Vec::with_capacity(side * side);
    for ix in 0..side {
        for iy in 0..side {
            let (x, y) = if side == 1 {
                (config.width * 0.5, config.height * 0.5)
            } else {
                (
                    ix as f32 / (side - 1) as f32 * config.width,
                    iy as f32 / (side - 1) as f32 * config.height,
                )
            };
            let vx = rng.gen_range(-SPAWN_SPEED..=SPAWN_SPEED);
            let vy = rng.gen_range(-SPAWN_SPEED..=SPAWN_SPEED);
            let species = Species::random(rng);
            particles.push(
                Particle::new(x, y, config.particle_radius, species).with_velocity(vx, vy),
            );
        }
    }
    particles
}
