//! Deposit coordinator
//!
//! Owns the mechanisms and both deposit machines, and routes a deposit
//! request to the machine for the current operating mode. The control loop
//! keeps ticking the lift through [`DepositCoordinator::lift_mut`].

use super::phase::{DepositPhase, OperatingMode, PieceKind, TeleopPhase};
use super::sequence::DepositSequence;
use super::teleop::TeleopDeposit;
use super::Mechanisms;
use crate::config::{DepositConfig, OverrideConfig};
use crate::lift::Lift;
use crate::safety::OverrideMonitor;
use crate::traits::{Aligner, Drive, Manipulator, OperatorInput};

/// Deposit coordinator
pub struct DepositCoordinator<D, L, M, A> {
    rig: Mechanisms<D, L, M, A>,
    config: DepositConfig,
    monitor: OverrideMonitor,
    mode: OperatingMode,
    autonomous: DepositSequence,
    teleop: TeleopDeposit,
    /// Autonomous arm pre-staging finished
    prep_done: bool,
}

impl<D, L, M, A> DepositCoordinator<D, L, M, A>
where
    D: Drive,
    L: Lift,
    M: Manipulator,
    A: Aligner,
{
    /// Create a coordinator in [`OperatingMode::Disabled`]
    pub fn new(
        rig: Mechanisms<D, L, M, A>,
        config: DepositConfig,
        override_config: OverrideConfig,
    ) -> Self {
        Self {
            rig,
            config,
            monitor: OverrideMonitor::new(override_config),
            mode: OperatingMode::Disabled,
            autonomous: DepositSequence::new(),
            teleop: TeleopDeposit::new(),
            prep_done: false,
        }
    }

    /// Current operating mode
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Switch operating mode
    ///
    /// Both deposit machines start over and the lift drops any move they
    /// left latched when the mode actually changes.
    pub fn set_mode(&mut self, mode: OperatingMode) {
        if mode == self.mode {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("deposit: mode {} -> {}", self.mode, mode);

        self.autonomous.reset();
        self.teleop.reset(&mut self.rig);
        self.mode = mode;
    }

    /// Run the deposit for the current mode, `true` when it completes
    ///
    /// While disabled the drivetrain is held stopped.
    pub fn poll(&mut self, level: u8, piece: PieceKind) -> bool {
        match self.mode {
            OperatingMode::Autonomous => self.deposit_once(level, piece),
            OperatingMode::Teleop => self.start_run(level, piece),
            OperatingMode::Disabled => {
                self.rig.drive.drive(0.0, 0.0);
                false
            }
        }
    }

    /// Advance the one-shot deposit
    pub fn deposit_once(&mut self, level: u8, piece: PieceKind) -> bool {
        let rig = &mut self.rig;
        self.autonomous
            .poll(&mut rig.drive, &mut rig.lift, &mut rig.arm, &self.config, level, piece)
    }

    /// Request a teleop deposit run
    pub fn start_run(&mut self, level: u8, piece: PieceKind) -> bool {
        self.teleop.start_run(level, piece, &mut self.rig, &self.config)
    }

    /// Advance the teleop deposit one step
    pub fn step(&mut self) -> bool {
        self.teleop.step(&mut self.rig, &self.config)
    }

    /// Abandon the teleop deposit
    pub fn reset(&mut self) {
        self.teleop.reset(&mut self.rig);
    }

    /// Check the operator controls and end the teleop deposit on activity
    pub fn override_interrupt<I: OperatorInput + ?Sized>(&mut self, input: &I) -> bool {
        self.teleop
            .override_interrupt(input, &self.monitor, &mut self.rig.lift)
    }

    /// Swing the arm to its travel angle once, `true` when done
    ///
    /// An arm already inside the safe window counts as done. After the first
    /// completion this is a no-op until [`reset_autonomous`](Self::reset_autonomous).
    pub fn prep_to_deposit_hatch(&mut self) -> bool {
        if self.prep_done {
            return true;
        }

        let angle = self.rig.arm.arm_angle();
        let in_window = angle > self.config.safe_arm_min && angle < self.config.safe_arm_max;
        if in_window
            || self
                .rig
                .arm
                .move_arm_to_position(self.config.safe_arm_angle, self.config.prep_arm_speed)
        {
            #[cfg(feature = "defmt")]
            defmt::debug!("deposit: hatch prep done at {}", angle);
            self.prep_done = true;
        }
        self.prep_done
    }

    /// Restart the one-shot deposit and allow the hatch prep to run again
    pub fn reset_autonomous(&mut self) {
        self.autonomous.reset();
        self.rig.lift.release();
        self.prep_done = false;
    }

    /// Whether the hatch prep has completed
    pub fn is_prep_done(&self) -> bool {
        self.prep_done
    }

    /// Phase of the one-shot deposit
    pub fn deposit_phase(&self) -> DepositPhase {
        self.autonomous.phase()
    }

    /// Phase of the teleop deposit
    pub fn teleop_phase(&self) -> TeleopPhase {
        self.teleop.phase()
    }

    /// Deposit configuration
    pub fn config(&self) -> &DepositConfig {
        &self.config
    }

    /// Borrow the drivetrain
    pub fn drive(&self) -> &D {
        &self.rig.drive
    }

    /// Mutably borrow the drivetrain
    pub fn drive_mut(&mut self) -> &mut D {
        &mut self.rig.drive
    }

    /// Borrow the lift
    pub fn lift(&self) -> &L {
        &self.rig.lift
    }

    /// Mutably borrow the lift (the loop calls its update here)
    pub fn lift_mut(&mut self) -> &mut L {
        &mut self.rig.lift
    }

    /// Borrow the arm
    pub fn arm(&self) -> &M {
        &self.rig.arm
    }

    /// Mutably borrow the arm
    pub fn arm_mut(&mut self) -> &mut M {
        &mut self.rig.arm
    }

    /// Borrow the aligner
    pub fn aligner(&self) -> &A {
        &self.rig.aligner
    }

    /// Mutably borrow the aligner
    pub fn aligner_mut(&mut self) -> &mut A {
        &mut self.rig.aligner
    }

    /// Give the mechanisms back
    pub fn release(self) -> Mechanisms<D, L, M, A> {
        self.rig
    }
}
