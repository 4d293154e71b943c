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
//! Cursor pseudo-entity
//!
//! The cursor is an externally driven point that the interaction model
//! treats as one extra neighbor: when active it contributes a force through
//! the same coefficient-times-normalized-direction path as any category
//! rule, with its signed mode value as the coefficient. The host updates it
//! between frames via [`crate::Simulation::set_cursor`]; the `&mut`
//! receiver there confines writes to the sequential phase.

/// Interaction mode of the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// No cursor interaction this frame
    #[default]
    Inactive,
    /// Particles within range are pulled toward the cursor
    Attract,
    /// Particles within range are pushed away from the cursor
    Repel,
}

/// Externally driven cursor state read by the physics kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// X position in viewport coordinates
    pub x: f32,
    /// Y position in viewport coordinates
    pub y: f32,
    /// Current interaction mode
    pub mode: CursorMode,
    /// Force-scale magnitude applied while active
    pub strength: f32,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor {
            x: 0.0,
            y: 0.0,
            mode: CursorMode::Inactive,
            strength: 1.0,
        }
    }
}

impl Cursor {
    /// An inactive cursor at the origin
    pub fn inactive() -> Self {
        Cursor::default()
    }

    /// An attracting cursor at the given position
    pub fn attract(x: f32, y: f32) -> Self {
        Cursor {
            x,
            y,
            mode: CursorMode::Attract,
            ..Cursor::default()
        }
    }

    /// A repelling cursor at the given position
    pub fn repel(x: f32, y: f32) -> Self {
        Cursor {
            x,
            y,
            mode: CursorMode::Repel,
            ..Cursor::default()
        }
    }

    /// Set the force-scale magnitude
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Whether the cursor participates in interaction this frame
    pub fn is_active(&self) -> bool {
        self.mode != CursorMode::Inactive
    }

    /// The signed rule coefficient, or `None` when inactive
    ///
    /// Positive attracts, mirroring the sign convention of the category
    /// rule table.
    pub fn coefficient(&self) -> Option<f32> {
        match self.mode {
            CursorMode::Inactive => None,
            CursorMode::Attract => Some(self.strength),
            CursorMode::Repel => Some(-self.strength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_has_no_coefficient() {
        assert_eq!(Cursor::inactive().coefficient(), None);
        assert!(!Cursor::inactive().is_active());
    }

    #[test]
    fn test_attract_is_positive() {
        let cursor = Cursor::attract(10.0, 20.0);
        assert_eq!(cursor.coefficient(), Some(1.0));
        assert!(cursor.is_active());
    }

    #[test]
    fn test_repel_is_negative() {
        let cursor = Cursor::repel(10.0, 20.0).with_strength(2.5);
        assert_eq!(cursor.coefficient(), Some(-2.5));
    }
}
