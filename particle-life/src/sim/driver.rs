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
//! The simulation driver
//!
//! Each frame has two phases. In the parallel phase the driver snapshots
//! the particle collection into a [`FrameContext`], submits one update task
//! per particle to the worker pool, and blocks on the drain barrier; every
//! task writes its result into a dedicated per-particle output slot. After
//! the barrier the driver copies the slots back and owns the collection
//! exclusively, so rendering and cursor/viewport updates in the sequential
//! phase can never race with an update task.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use rand::Rng;

use crate::config::{ConfigError, SimConfig};
use crate::pool::{PoolStats, TaskPool};
use crate::render::RenderSink;
use crate::sim::cursor::Cursor;
use crate::sim::particle::{spawn_grid, Particle};
use crate::sim::update::{step_particle, FrameContext};

/// A running simulation: the particle collection, the cursor, and the pool
pub struct Simulation {
    config: SimConfig,
    particles: Vec<Particle>,
    slots: Arc<Vec<Mutex<Particle>>>,
    cursor: Cursor,
    pool: TaskPool,
    width: f32,
    height: f32,
    frame: u64,
}

impl Simulation {
    /// Create a simulation with a grid-spawned population
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let mut rng = rand::thread_rng();
        Self::with_rng(config, &mut rng)
    }

    /// Create a simulation spawning the population from the given rng
    ///
    /// With a seeded rng the whole run is deterministic (see
    /// [`Simulation::step`]).
    pub fn with_rng<R: Rng + ?Sized>(config: SimConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let particles = spawn_grid(&config, rng);
        Self::from_parts(config, particles)
    }

    /// Create a simulation from an explicit starting population
    ///
    /// The config's `population` field is replaced by the collection's
    /// length. Useful for property tests that need exact initial states.
    pub fn from_particles(
        mut config: SimConfig,
        particles: Vec<Particle>,
    ) -> Result<Self, ConfigError> {
        config.population = particles.len();
        config.validate()?;
        Self::from_parts(config, particles)
    }

    fn from_parts(config: SimConfig, particles: Vec<Particle>) -> Result<Self, ConfigError> {
        let slots = Arc::new(particles.iter().copied().map(Mutex::new).collect::<Vec<_>>());
        let pool = TaskPool::new(config.workers);
        tracing::debug!(
            population = particles.len(),
            workers = config.workers,
            "simulation constructed"
        );
        Ok(Simulation {
            width: config.width,
            height: config.height,
            config,
            particles,
            slots,
            cursor: Cursor::inactive(),
            pool,
            frame: 0,
        })
    }

    /// Advance one frame using the worker pool
    ///
    /// Parallel phase: one task per particle against a shared read-only
    /// snapshot, then the drain barrier. Apply: copy every output slot back
    /// into the driver-owned collection. Because tasks read the snapshot
    /// and write disjoint slots, the result is identical to
    /// [`Simulation::step_sequential`] for the same state.
    pub fn step(&mut self) {
        let started = Instant::now();
        let ctx = Arc::new(self.frame_context());

        for index in 0..self.particles.len() {
            let ctx = Arc::clone(&ctx);
            let slots = Arc::clone(&self.slots);
            self.pool.submit(move || {
                let next = step_particle(index, &ctx);
                *slots[index].lock().unwrap() = next;
            });
        }
        self.pool.wait_idle();

        for (particle, slot) in self.particles.iter_mut().zip(self.slots.iter()) {
            *particle = *slot.lock().unwrap();
        }

        self.frame += 1;
        tracing::trace!(
            frame = self.frame,
            particles = self.particles.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "frame stepped"
        );
    }

    /// Advance one frame on the calling thread, bypassing the pool
    ///
    /// Same kernel, same snapshot semantics; the debugging and testing
    /// fallback.
    pub fn step_sequential(&mut self) {
        let ctx = self.frame_context();
        for index in 0..self.particles.len() {
            self.particles[index] = step_particle(index, &ctx);
        }
        self.frame += 1;
    }

    fn frame_context(&self) -> FrameContext {
        FrameContext::new(
            self.particles.clone(),
            self.cursor,
            self.width,
            self.height,
            self.config,
        )
    }

    /// Draw every particle through the sink, in collection order
    ///
    /// Only callable between steps (`&self` while `step` needs `&mut`), so
    /// no render call can observe a partially updated frame.
    pub fn render_with<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        for p in &self.particles {
            sink.draw_circle(p.x, p.y, p.radius, p.color());
        }
    }

    /// Update the cursor state; confined to the sequential phase by `&mut`
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Adopt new viewport dimensions from the window host
    ///
    /// Non-positive dimensions (e.g. a minimized window) are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
        } else {
            tracing::debug!(width, height, "ignoring degenerate viewport");
        }
    }

    /// The particle collection
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The current cursor state
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The configuration this run was built with
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current viewport dimensions
    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Worker pool activity counters
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }
}
