//! Hardware and collaborator traits
//!
//! These traits define the interface between the control logic and the
//! devices or subsystems it drives but does not own the internals of.

pub mod drive;
pub mod encoder;
pub mod input;
pub mod manipulator;
pub mod motor;

pub use drive::{Aligner, Drive};
pub use encoder::{ControllerSensor, NoDevice, PositionSensor, PulseCounter, RevolutionSensor};
pub use input::OperatorInput;
pub use manipulator::{HeldPiece, LiftStatus, Manipulator, StatusSnapshot};
pub use motor::MotorOutput;
