//! Game piece deposit
//!
//! - [`DepositSequence`]: one-shot place-and-back-up, used in autonomous
//! - [`TeleopDeposit`]: staged, interruptible run for the operator
//! - [`DepositCoordinator`]: owns the mechanisms and picks a machine by
//!   operating mode

mod coordinator;
mod phase;
mod sequence;
mod teleop;

#[cfg(test)]
mod mock;

pub use coordinator::DepositCoordinator;
pub use phase::{DepositPhase, OperatingMode, PieceKind, TeleopPhase, ARM_RELEASE_LEVEL};
pub use sequence::DepositSequence;
pub use teleop::TeleopDeposit;

/// Mechanisms a deposit drives
#[derive(Debug, Default)]
pub struct Mechanisms<D, L, M, A> {
    /// Drivetrain
    pub drive: D,
    /// Lift
    pub lift: L,
    /// Arm and intake
    pub arm: M,
    /// Vision alignment
    pub aligner: A,
}
