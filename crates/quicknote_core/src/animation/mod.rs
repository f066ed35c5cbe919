//! Overlay slide animation.
//!
//! `easing` plans the stepped pose sequence for one direction; `animator`
//! drives it against the host window and owns the visibility state machine.

pub mod animator;
pub mod easing;
