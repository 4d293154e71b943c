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
//! Elastic collision resolution
//!
//! Overlapping pairs are separated along the contact normal and exchange
//! their velocity components along it (equal masses), tangential components
//! untouched. Each update task resolves only its own particle's half of the
//! response against the neighbor's observed state; when the neighbor's task
//! runs the mirrored half, the pair ends exactly one radius-sum apart with
//! normal velocities swapped, matching a two-sided resolution without any
//! cross-task write.

use crate::sim::particle::Particle;

/// Resolve one side of an elastic collision, if the pair overlaps
///
/// `(ox, oy)` and `(ovx, ovy)` are the neighbor's position and velocity as
/// observed this frame; `other_radius` its radius. Moves `me` half the
/// overlap away along the contact normal and applies the equal-mass
/// impulse to `me`'s velocity only. Distances below `min_distance` are
/// clamped before the normal is formed. No-op when the pair is separated.
pub fn resolve_elastic(
    me: &mut Particle,
    ox: f32,
    oy: f32,
    ovx: f32,
    ovy: f32,
    other_radius: f32,
    min_distance: f32,
) {
    let dx = ox - me.x;
    let dy = oy - me.y;
    let d = (dx * dx + dy * dy).sqrt().max(min_distance);
    let radius_sum = me.radius + other_radius;
    if d >= radius_sum {
        return;
    }

    let nx = dx / d;
    let ny = dy / d;

    let overlap = radius_sum - d;
    me.x -= 0.5 * overlap * nx;
    me.y -= 0.5 * overlap * ny;

    // Equal masses: the normal velocity components swap
    let relative_normal = (me.vx - ovx) * nx + (me.vy - ovy) * ny;
    me.vx -= relative_normal * nx;
    me.vy -= relative_normal * ny;
}
