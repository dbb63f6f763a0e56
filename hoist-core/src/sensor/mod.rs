//! Position/velocity sensing
//!
//! Unifies the robot's encoder sources behind one measurement contract.

pub mod encoder;

pub use encoder::{EncoderBackend, EncoderKind, Encoder, FeedbackMode, Measurement};
