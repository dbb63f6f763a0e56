//! Deposit phases and selectors

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Level at which a hatch is released by dropping the arm instead of the lift
pub const ARM_RELEASE_LEVEL: u8 = 2;

/// Game piece being deposited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    /// Docking panel
    #[default]
    Hatch,
    /// Ball
    Cargo,
}

/// One-shot deposit phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DepositPhase {
    /// Ready to start
    #[default]
    Init,
    /// Drive the hatch onto the target, or eject the cargo
    PerformPrimaryMotion,
    /// Release the hatch, or re-pose the arm after cargo
    PrepareSecondaryPosition,
    /// Short backup after a hatch
    BackupHatch,
    /// Full backup after cargo
    BackupCargo,
    /// Stop the drivetrain and report done
    Stop,
}

/// Teleop deposit phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TeleopPhase {
    /// Not running
    #[default]
    Idle,
    /// Run requested
    Init,
    /// Put the arm in its travel window
    StageManipulatorSafe,
    /// Put the lift at its travel height
    StageActuatorSafe,
    /// Line up on the target with vision
    AlignToTarget,
    /// Raise the lift to the selected level
    SelectAndReachActuatorHeight,
    /// Pose the arm for the selected level
    SelectAndReachManipulatorAngle,
    /// Run the one-shot deposit
    PerformDepositMotion,
    /// Done (or interrupted)
    Finish,
}

/// Robot operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperatingMode {
    /// Outputs idle
    #[default]
    Disabled,
    /// Sandstorm / autonomous period
    Autonomous,
    /// Operator-controlled period
    Teleop,
}
