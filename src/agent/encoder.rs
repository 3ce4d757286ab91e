//! Box-to-state encoding
//!
//! The state is the controlled entity's box read as a mixed-radix number:
//!
//! ```text
//! state = left   * (H+1)(W+1)(H+1)
//!       + top    * (W+1)(H+1)
//!       + right  * (H+1)
//!       + bottom
//! ```
//!
//! bottom is the least significant digit (radix H+1), then right (W+1),
//! top (H+1) and left (W+1). Obstacles are not part of the state.

use serde::{Deserialize, Serialize};

use crate::sim::BoundingBox;

/// Scalar state index
pub type StateIndex = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEncoder {
    width: u64,
    height: u64,
}

impl StateEncoder {
    pub fn new(arena_width: i32, arena_height: i32) -> Self {
        debug_assert!(arena_width > 0 && arena_height > 0);
        Self {
            width: arena_width as u64,
            height: arena_height as u64,
        }
    }

    /// Number of distinct indices: (W+1)^2 * (H+1)^2
    ///
    /// The arena must have passed `checked_state_space_size`.
    pub fn state_space_size(&self) -> u64 {
        let w = self.width + 1;
        let h = self.height + 1;
        w * h * w * h
    }

    /// State space size for an arena, or None if it does not fit in a `StateIndex`
    pub fn checked_state_space_size(arena_width: i32, arena_height: i32) -> Option<u64> {
        let w = u64::try_from(arena_width).ok()?.checked_add(1)?;
        let h = u64::try_from(arena_height).ok()?.checked_add(1)?;
        w.checked_mul(h)?.checked_mul(w)?.checked_mul(h)
    }

    /// Encode an in-arena box
    ///
    /// The box must lie within [0, W] x [0, H]; the orchestrator clamps
    /// before every encode.
    pub fn encode(&self, bounds: &BoundingBox) -> StateIndex {
        debug_assert!(
            bounds.is_within(self.width as i32, self.height as i32),
            "encoding out-of-arena box {:?}",
            bounds
        );
        let w = self.width + 1;
        let h = self.height + 1;

        let left = bounds.left as u64;
        let top = bounds.top as u64;
        let right = bounds.right as u64;
        let bottom = bounds.bottom as u64;

        left * h * w * h + top * w * h + right * h + bottom
    }

    /// Inverse of `encode`, for diagnostics
    pub fn decode(&self, state: StateIndex) -> BoundingBox {
        let w = self.width + 1;
        let h = self.height + 1;

        let bottom = state % h;
        let rest = state / h;
        let right = rest % w;
        let rest = rest / w;
        let top = rest % h;
        let left = rest / h;

        BoundingBox {
            left: left as i32,
            top: top as i32,
            right: right as i32,
            bottom: bottom as i32,
        }
    }
}
