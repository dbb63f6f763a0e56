//! One-shot deposit
//!
//! Places the held piece on a target the robot is already lined up on, then
//! backs away. It cannot be interrupted; poll it until it returns `true`.

use super::phase::{DepositPhase, PieceKind, ARM_RELEASE_LEVEL};
use crate::config::DepositConfig;
use crate::lift::Lift;
use crate::traits::{Drive, Manipulator};

/// One-shot deposit state machine
#[derive(Debug, Clone, Default)]
pub struct DepositSequence {
    phase: DepositPhase,
    /// Arm angle or lift height captured when the release phase started
    release_from: Option<f32>,
}

impl DepositSequence {
    /// Create a sequence ready to start
    pub const fn new() -> Self {
        Self {
            phase: DepositPhase::Init,
            release_from: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> DepositPhase {
        self.phase
    }

    /// Abandon any run in progress
    pub fn reset(&mut self) {
        self.enter(DepositPhase::Init);
    }

    /// Advance one step, `true` on the tick the run completes
    ///
    /// A hatch is pushed on by driving forward and released either by
    /// dropping the arm (at [`ARM_RELEASE_LEVEL`]) or by dropping the lift.
    /// Cargo is ejected and the arm re-posed. Both finish by backing up and
    /// stopping the drivetrain.
    pub fn poll<D, L, M>(
        &mut self,
        drive: &mut D,
        lift: &mut L,
        arm: &mut M,
        config: &DepositConfig,
        level: u8,
        piece: PieceKind,
    ) -> bool
    where
        D: Drive + ?Sized,
        L: Lift + ?Sized,
        M: Manipulator + ?Sized,
    {
        match self.phase {
            DepositPhase::Init => {
                drive.reset_encoders();
                self.enter(DepositPhase::PerformPrimaryMotion);
            }

            DepositPhase::PerformPrimaryMotion => {
                let done = match piece {
                    PieceKind::Hatch => drive.drive_straight(
                        config.forward_to_deposit,
                        config.forward_speed,
                        config.drive_acceleration,
                        config.heading_lock,
                    ),
                    PieceKind::Cargo => arm.eject_cargo(),
                };
                if done {
                    self.enter(DepositPhase::PrepareSecondaryPosition);
                }
            }

            DepositPhase::PrepareSecondaryPosition => {
                let (done, next) = match piece {
                    PieceKind::Hatch if level == ARM_RELEASE_LEVEL => {
                        let from = *self.release_from.get_or_insert_with(|| arm.arm_angle());
                        let done = arm
                            .move_arm_to_position(from - config.arm_release_drop, config.arm_speed);
                        (done, DepositPhase::BackupHatch)
                    }
                    PieceKind::Hatch => {
                        let from = *self
                            .release_from
                            .get_or_insert_with(|| lift.current_position());
                        let done = lift.move_to_position(
                            from - config.lift_release_drop,
                            config.lift_release_speed,
                        );
                        (done, DepositPhase::BackupHatch)
                    }
                    PieceKind::Cargo => {
                        let done =
                            arm.move_arm_to_position(config.cargo_repose_angle, config.arm_speed);
                        (done, DepositPhase::BackupCargo)
                    }
                };
                if done {
                    self.enter(next);
                }
            }

            DepositPhase::BackupHatch => {
                if drive.drive_straight(
                    config.fine_backup_distance,
                    -config.backup_speed,
                    config.drive_acceleration,
                    config.heading_lock,
                ) {
                    self.enter(DepositPhase::Stop);
                }
            }

            DepositPhase::BackupCargo => {
                if drive.drive_straight(
                    config.backup_distance,
                    -config.backup_speed,
                    config.drive_acceleration,
                    config.heading_lock,
                ) {
                    self.enter(DepositPhase::Stop);
                }
            }

            DepositPhase::Stop => {
                drive.drive(0.0, 0.0);
                self.enter(DepositPhase::Init);
                return true;
            }
        }

        false
    }

    fn enter(&mut self, phase: DepositPhase) {
        #[cfg(feature = "defmt")]
        defmt::debug!("deposit: {} -> {}", self.phase, phase);

        self.release_from = None;
        self.phase = phase;
    }
}
