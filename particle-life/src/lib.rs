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
//! # Particle Life
//!
//! A parallel particle-life simulation core: a population of point
//! particles exerts short-range attractive and repulsive forces on each
//! other based on species pairings, resolves elastic collisions, and is
//! herded toward the viewport center, one frame at a time.
//!
//! ## Architecture
//!
//! - **Task pool**: a fixed set of worker threads with a FIFO queue and a
//!   `wait_idle` drain barrier; pure infrastructure.
//! - **Update kernel**: a pure function computing one particle's next
//!   state from an immutable per-frame snapshot.
//! - **Driver**: snapshots the collection, fans one task per particle out
//!   to the pool, waits on the barrier, applies the results, and hands
//!   each particle to the render sink.
//!
//! Because tasks read a shared snapshot and write disjoint output slots,
//! a frame is deterministic for a given seed and cursor history; the
//! parallel and sequential drivers produce identical results.
//!
//! ## Example
//!
//! ```rust
//! use particle_life::{Cursor, SimConfig, Simulation};
//!
//! let config = SimConfig::default().with_population(64).with_workers(2);
//! let mut sim = Simulation::new(config).unwrap();
//!
//! sim.set_cursor(Cursor::attract(450.0, 450.0));
//! sim.step();
//! assert_eq!(sim.frame(), 1);
//! ```

#![warn(missing_docs)]

/// Runtime configuration and validation
pub mod config;

/// The worker pool and its drain barrier
pub mod pool;

/// The render sink interface the host implements
pub mod render;

/// Particles, forces, collisions, and the frame driver
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use render::{NullSink, RenderSink};
pub use sim::{Cursor, CursorMode, Particle, Simulation, Species};
