//! Timing and judgement core of a circle-tapping rhythm game session.
//!
//! Consumers feed in an ordered list of object templates plus per-frame time
//! deltas and input snapshots, and read back judgements and draw primitives.
//! Rendering, audio, device input and map parsing all live on the other side
//! of the interfaces in [`engine`].

pub mod engine;
pub mod gameplay;
pub mod prelude;
