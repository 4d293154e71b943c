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
//! The per-particle update kernel
//!
//! [`step_particle`] is a pure function from a frame snapshot to one
//! particle's next state: integrate, apply friction, centering, the
//! categorical rule table over every in-range neighbor plus the cursor
//! pseudo-entity, collision resolution, and the boundary wrap. Tasks for
//! different particles share the same immutable [`FrameContext`], so the
//! parallel phase is free of data races and a frame is deterministic for a
//! given snapshot.
//!
//! Neighbors are observed at their current-frame integrated position
//! (`pos + vel`) with friction applied to their velocity, i.e. the same
//! basis the neighbor's own task uses for itself. Both sides of a pair
//! therefore agree on the contact geometry, which is what makes the
//! one-sided collision response add up to the classic two-sided one.

use crate::config::SimConfig;
use crate::sim::collision::resolve_elastic;
use crate::sim::cursor::Cursor;
use crate::sim::forces::{accumulate_rules, bounded_distance, centering_force, pull_toward};
use crate::sim::particle::Particle;

/// Immutable snapshot of everything a frame's update tasks read
///
/// Built once per frame by the driver, shared by every task through an
/// `Arc`. Holds the full particle collection, the cursor, the viewport
/// bounds as of this frame, and the physics parameters.
pub struct FrameContext {
    particles: Vec<Particle>,
    cursor: Cursor,
    width: f32,
    height: f32,
    config: SimConfig,
}

impl FrameContext {
    /// Snapshot a frame
    pub fn new(
        particles: Vec<Particle>,
        cursor: Cursor,
        width: f32,
        height: f32,
        config: SimConfig,
    ) -> Self {
        FrameContext {
            particles,
            cursor,
            width,
            height,
            config,
        }
    }

    /// The snapshotted particle collection
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Compute one particle's next state from the frame snapshot
///
/// Exactly one integration step; never creates or destroys particles.
///
/// # Panics
///
/// Panics if `index` is out of bounds for the snapshot.
pub fn step_particle(index: usize, ctx: &FrameContext) -> Particle {
    let config = &ctx.config;
    let decay = config.friction_decay();
    let mut me = ctx.particles[index];

    me.x += me.vx;
    me.y += me.vy;
    me.vx *= decay;
    me.vy *= decay;

    let (cfx, cfy) = centering_force(&me, ctx.width * 0.5, ctx.height * 0.5, config);
    me.vx += cfx;
    me.vy += cfy;

    for (j, other) in ctx.particles.iter().enumerate() {
        if j == index {
            continue;
        }
        // The neighbor as of this frame: integrated position, frictioned
        // velocity.
        let ox = other.x + other.vx;
        let oy = other.y + other.vy;
        let d = bounded_distance(
            me.x,
            me.y,
            ox,
            oy,
            config.attraction_radius,
            config.min_distance,
        );
        if !d.is_finite() {
            continue;
        }

        let (fx, fy) = accumulate_rules(&me, other, ox, oy, d, config.attraction_force);
        me.vx += fx;
        me.vy += fy;

        resolve_elastic(
            &mut me,
            ox,
            oy,
            other.vx * decay,
            other.vy * decay,
            other.radius,
            config.min_distance,
        );
    }

    if let Some(coefficient) = ctx.cursor.coefficient() {
        let d = bounded_distance(
            me.x,
            me.y,
            ctx.cursor.x,
            ctx.cursor.y,
            config.attraction_radius,
            config.min_distance,
        );
        if d.is_finite() {
            let (fx, fy) = pull_toward(
                &me,
                ctx.cursor.x,
                ctx.cursor.y,
                d,
                coefficient,
                config.attraction_force,
            );
            me.vx += fx;
            me.vy += fy;
        }
    }

    wrap_axis(&mut me.x, &mut me.vx, me.radius, ctx.width, config.wrap_kick);
    wrap_axis(&mut me.y, &mut me.vy, me.radius, ctx.height, config.wrap_kick);

    me
}

/// Wrap one axis: reappear at the opposite edge with a velocity kick
///
/// The kick is a fixed magnitude in the current direction of travel; when
/// the velocity component is exactly zero the direction defaults to the
/// direction of travel implied by the exited edge.
fn wrap_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32, kick: f32) {
    if *pos + radius < 0.0 {
        *pos = extent + radius;
        *vel += kick * kick_direction(*vel, -1.0);
    } else if *pos - radius > extent {
        *pos = -radius;
        *vel += kick * kick_direction(*vel, 1.0);
    }
}

fn kick_direction(vel: f32, default_sign: f32) -> f32 {
    if vel > 0.0 {
        1.0
    } else if vel < 0.0 {
        -1.0
    } else {
        default_sign
    }
}
