//! # GCanvas Motion
//!
//! The boundary between geometry and the machine. The motion translator speaks to a
//! [`MotionEmitter`] in terms of discrete requests (retract, rapid, plunge, linear,
//! arcs); [`Motion`] is the stock emitter: it tracks the live tool position, expands
//! retract/plunge into Z moves only when the tool is not already at that height and
//! forwards the resulting [`Instruction`]s to a [`Driver`].
//!
//! ```text
//! MotionTranslator ──► MotionEmitter (Motion) ──► Driver (RecordingDriver, G-code writer, ...)
//! ```

pub mod driver;
pub mod emitter;

pub use driver::{ArcSupport, Driver, Instruction, RecordingDriver};
pub use emitter::{ArcMove, Motion, MotionEmitter, MotionSettings};
