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
//! Simulation core: particles, interaction rules, and the frame driver

pub mod collision;
pub mod cursor;
pub mod driver;
pub mod forces;
pub mod particle;
pub mod update;

pub use cursor::{Cursor, CursorMode};
pub use driver::Simulation;
pub use particle::{spawn_grid, Particle, Species};
pub use update::{step_particle, FrameContext};
