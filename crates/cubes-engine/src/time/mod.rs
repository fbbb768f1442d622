//! Time subsystem.
//!
//! One `FrameClock` per render loop; each tick samples `elapsed()` to drive
//! the animation.

mod frame_clock;

pub use frame_clock::FrameClock;
