//! Pointer events fed into the interaction state machine.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in raw screen coordinates.
///
/// `Leave` fires when the pointer exits the surface and finalizes a gesture
/// exactly like `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    Leave,
}
