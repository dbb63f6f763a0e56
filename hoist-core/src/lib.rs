//! Board-agnostic motion control for the robot's lift and deposit
//!
//! This crate contains all logic that does not depend on specific
//! hardware implementations:
//!
//! - Collaborator traits (encoders, motor, drivetrain, arm, aligner, input)
//! - Encoder abstraction over the three encoder sources
//! - Lift controller with dynamic soft limits
//! - Deposit state machines and their mode coordinator
//! - Operator takeover detection
//! - Configuration types and the calibration record
//!
//! Everything is polled from one fixed-period control loop; nothing blocks.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod deposit;
pub mod lift;
pub mod safety;
pub mod sensor;
pub mod traits;
