//! Driver-assist deposit
//!
//! Stages the mechanisms, lines up on the target and runs the one-shot
//! deposit. The operator holds a button and the loop calls
//! [`TeleopDeposit::start_run`] every tick; touching the sticks hands
//! control back through [`TeleopDeposit::override_interrupt`].

use super::phase::{PieceKind, TeleopPhase};
use super::sequence::DepositSequence;
use super::Mechanisms;
use crate::config::{DepositConfig, LevelTable};
use crate::lift::Lift;
use crate::safety::OverrideMonitor;
use crate::traits::{Aligner, Drive, Manipulator, OperatorInput};

/// Restartable deposit state machine
#[derive(Debug, Clone, Default)]
pub struct TeleopDeposit {
    phase: TeleopPhase,
    /// A run is in progress
    started: bool,
    level: u8,
    piece: PieceKind,
    /// A staging move was issued and must finish before leaving the phase
    staging_move: bool,
    sequence: DepositSequence,
}

impl TeleopDeposit {
    /// Create an idle machine
    pub const fn new() -> Self {
        Self {
            phase: TeleopPhase::Idle,
            started: false,
            level: 0,
            piece: PieceKind::Hatch,
            staging_move: false,
            sequence: DepositSequence::new(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> TeleopPhase {
        self.phase
    }

    /// Whether a run is in progress
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Selected level
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Selected piece
    pub fn piece(&self) -> PieceKind {
        self.piece
    }

    /// Request a run, call every tick until it returns `true`
    ///
    /// Level and piece are taken from every call, so the operator can change
    /// the selection until the machine reaches the phase that uses it.
    pub fn start_run<D, L, M, A>(
        &mut self,
        level: u8,
        piece: PieceKind,
        rig: &mut Mechanisms<D, L, M, A>,
        config: &DepositConfig,
    ) -> bool
    where
        D: Drive,
        L: Lift,
        M: Manipulator,
        A: Aligner,
    {
        self.level = level;
        self.piece = piece;

        if !self.started {
            #[cfg(feature = "defmt")]
            defmt::info!("teleop deposit: started (level {}, {})", level, piece);

            self.started = true;
            self.enter(TeleopPhase::Init);
        }

        self.step(rig, config);

        if self.phase == TeleopPhase::Finish {
            #[cfg(feature = "defmt")]
            defmt::info!("teleop deposit: finished");

            rig.aligner.set_signal(false);
            self.started = false;
            self.enter(TeleopPhase::Idle);
            return true;
        }
        false
    }

    /// Advance one step, `true` when at [`TeleopPhase::Finish`]
    pub fn step<D, L, M, A>(
        &mut self,
        rig: &mut Mechanisms<D, L, M, A>,
        config: &DepositConfig,
    ) -> bool
    where
        D: Drive,
        L: Lift,
        M: Manipulator,
        A: Aligner,
    {
        match self.phase {
            TeleopPhase::Idle | TeleopPhase::Finish => {}

            TeleopPhase::Init => {
                rig.aligner.set_signal(true);
                rig.aligner.rearm();
                self.sequence.reset();
                self.enter(TeleopPhase::StageManipulatorSafe);
            }

            TeleopPhase::StageManipulatorSafe => {
                let angle = rig.arm.arm_angle();
                let in_window = angle > config.safe_arm_min && angle < config.safe_arm_max;
                if self.stage(in_window, || {
                    rig.arm
                        .move_arm_to_position(config.safe_arm_angle, config.staging_arm_speed)
                }) {
                    self.enter(TeleopPhase::StageActuatorSafe);
                }
            }

            TeleopPhase::StageActuatorSafe => {
                let height = rig.lift.current_position();
                let in_window = height > config.safe_lift_height - config.safe_lift_tolerance
                    && height < config.safe_lift_height + config.safe_lift_tolerance;
                if self.stage(in_window, || {
                    rig.lift
                        .move_to_position(config.safe_lift_height, config.lift_speed)
                }) {
                    self.enter(TeleopPhase::AlignToTarget);
                }
            }

            TeleopPhase::AlignToTarget => {
                if rig.aligner.align(config.align_speed) {
                    self.enter(TeleopPhase::SelectAndReachActuatorHeight);
                }
            }

            TeleopPhase::SelectAndReachActuatorHeight => {
                let height = self.table(&config.hatch_heights, &config.cargo_heights);
                if rig.lift.move_to_position(height, config.lift_speed) {
                    self.enter(TeleopPhase::SelectAndReachManipulatorAngle);
                }
            }

            TeleopPhase::SelectAndReachManipulatorAngle => {
                let angle = self.table(&config.hatch_angles, &config.cargo_angles);
                if rig.arm.move_arm_to_position(angle, config.arm_speed) {
                    self.enter(TeleopPhase::PerformDepositMotion);
                }
            }

            TeleopPhase::PerformDepositMotion => {
                if self.sequence.poll(
                    &mut rig.drive,
                    &mut rig.lift,
                    &mut rig.arm,
                    config,
                    self.level,
                    self.piece,
                ) {
                    self.enter(TeleopPhase::Finish);
                }
            }
        }

        self.phase == TeleopPhase::Finish
    }

    /// Hand control back if the operator touches a watched control
    ///
    /// Returns `true` and forces [`TeleopPhase::Finish`] when the monitor
    /// reports activity. Any lift move the run left in flight is released.
    pub fn override_interrupt<I, L>(
        &mut self,
        input: &I,
        monitor: &OverrideMonitor,
        lift: &mut L,
    ) -> bool
    where
        I: OperatorInput + ?Sized,
        L: Lift + ?Sized,
    {
        let status = monitor.check(input);
        if !status.is_active() {
            return false;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("teleop deposit: operator override ({})", status);

        lift.release();
        self.enter(TeleopPhase::Finish);
        true
    }

    /// Stop any run, release the lift and switch the alignment signal off
    pub fn reset<D, L, M, A>(&mut self, rig: &mut Mechanisms<D, L, M, A>)
    where
        L: Lift,
        A: Aligner,
    {
        self.started = false;
        self.sequence.reset();
        self.enter(TeleopPhase::Idle);
        rig.lift.release();
        rig.aligner.set_signal(false);
    }

    /// Pass a staging phase once the mechanism is in its window
    ///
    /// The window is only trusted before a move is issued; once issued the
    /// move runs until the mechanism reports it done.
    fn stage(&mut self, in_window: bool, mut issue: impl FnMut() -> bool) -> bool {
        if !self.staging_move && in_window {
            return true;
        }
        self.staging_move = true;
        issue()
    }

    fn table(&self, hatch: &LevelTable, cargo: &LevelTable) -> f32 {
        match self.piece {
            PieceKind::Hatch => hatch.get(self.level),
            PieceKind::Cargo => cargo.get(self.level),
        }
    }

    fn enter(&mut self, phase: TeleopPhase) {
        #[cfg(feature = "defmt")]
        defmt::debug!("teleop deposit: {} -> {}", self.phase, phase);

        self.staging_move = false;
        self.phase = phase;
    }
}
