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
//! Categorical interaction rules and the centering force
//!
//! The rule table is the algorithmic heart of the system: a fixed ordered
//! set of predicate-conditioned force contributions between a particle and
//! one neighbor, each proportional to the normalized direction vector
//! between the two and a signed coefficient. All applicable rules
//! accumulate. The cursor pseudo-entity contributes through the same
//! normalized-direction path with its own signed coefficient.

use crate::config::SimConfig;
use crate::sim::particle::Particle;

/// One row of the interaction table
///
/// `applies` is a predicate over the pair's category flags; `coefficient`
/// is the signed strength, scaled by the global attraction force. Positive
/// coefficients attract, negative repel.
#[derive(Clone, Copy)]
pub struct InteractionRule {
    /// Signed per-rule strength
    pub coefficient: f32,
    /// Predicate over (self, other) category flags
    pub applies: fn(&Particle, &Particle) -> bool,
}

/// The fixed ordered rule table
///
/// | Condition               | Coefficient |
/// |-------------------------|-------------|
/// | self is green           | -1.0        |
/// | other is green          | -0.3        |
/// | self blue & other red   | -1.0        |
/// | self red & other blue   | +2.0        |
/// | self red & other red    | -0.5        |
/// | self blue & other blue  | +2.0        |
pub const RULES: [InteractionRule; 6] = [
    InteractionRule {
        coefficient: -1.0,
        applies: |me, _| me.is_green(),
    },
    InteractionRule {
        coefficient: -0.3,
        applies: |_, other| other.is_green(),
    },
    InteractionRule {
        coefficient: -1.0,
        applies: |me, other| me.is_blue() && other.is_red(),
    },
    InteractionRule {
        coefficient: 2.0,
        applies: |me, other| me.is_red() && other.is_blue(),
    },
    InteractionRule {
        coefficient: -0.5,
        applies: |me, other| me.is_red() && other.is_red(),
    },
    InteractionRule {
        coefficient: 2.0,
        applies: |me, other| me.is_blue() && other.is_blue(),
    },
];

/// Range-bounded planar distance with singularity clamp
///
/// Returns the true distance between the two points, `f32::INFINITY` when
/// it is at or beyond `radius` (the non-interacting sentinel: dividing a
/// force by it contributes nothing), and never less than `min_distance`
/// (degenerate-distance recovery for coincident points).
pub fn bounded_distance(
    ax: f32,
    ay: f32,
    bx: f32,
    by: f32,
    radius: f32,
    min_distance: f32,
) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    let d = (dx * dx + dy * dy).sqrt();
    if d >= radius {
        return f32::INFINITY;
    }
    d.max(min_distance)
}

/// Velocity contribution of a single coefficient toward a target point
///
/// `coefficient * force * (target - self) / d` on each axis.
pub(crate) fn pull_toward(
    me: &Particle,
    tx: f32,
    ty: f32,
    d: f32,
    coefficient: f32,
    force: f32,
) -> (f32, f32) {
    (
        coefficient * force * (tx - me.x) / d,
        coefficient * force * (ty - me.y) / d,
    )
}

/// Accumulated rule-table contribution from one neighbor
///
/// `(tx, ty)` is the neighbor's position as observed this frame; `other`
/// supplies its category flags. The caller is responsible for range
/// checking `d`.
pub(crate) fn accumulate_rules(
    me: &Particle,
    other: &Particle,
    tx: f32,
    ty: f32,
    d: f32,
    force: f32,
) -> (f32, f32) {
    let mut fx = 0.0;
    let mut fy = 0.0;
    for rule in &RULES {
        if (rule.applies)(me, other) {
            let (dx, dy) = pull_toward(me, tx, ty, d, rule.coefficient, force);
            fx += dx;
            fy += dy;
        }
    }
    (fx, fy)
}

/// Centering force toward the viewport center
///
/// A constant-magnitude pull toward `(cx, cy)` whenever the particle is
/// measurably away from it, plus a constant-magnitude outward push while
/// inside the inner radius. With the default push of twice the pull this
/// reproduces the classic short-range "keep away from dead center" drift.
pub(crate) fn centering_force(me: &Particle, cx: f32, cy: f32, config: &SimConfig) -> (f32, f32) {
    let dx = me.x - cx;
    let dy = me.y - cy;
    let d = (dx * dx + dy * dy).sqrt();
    if d <= config.min_distance {
        // Direction undefined at dead center
        return (0.0, 0.0);
    }

    let mut fx = -config.center_pull * dx / d;
    let mut fy = -config.center_pull * dy / d;
    if d < config.center_inner_radius {
        fx += config.center_push * dx / d;
        fy += config.center_push * dy / d;
    }
    (fx, fy)
}
