//! Collaborator mocks shared by the deposit tests
//!
//! Each multi-tick call completes after `ticks_per_move` pending ticks
//! (zero means it completes on the first call).

use crate::lift::Lift;
use crate::traits::{Aligner, Drive, HeldPiece, LiftStatus, Manipulator};

fn advance(progress: &mut u32, ticks: u32) -> bool {
    if *progress >= ticks {
        *progress = 0;
        true
    } else {
        *progress += 1;
        false
    }
}

#[derive(Default)]
pub struct MockDrive {
    pub ticks_per_move: u32,
    progress: u32,
    pub straight_calls: u32,
    pub last_straight: Option<(f32, f32)>,
    pub stopped: bool,
    pub encoder_resets: u32,
}

impl MockDrive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drive for MockDrive {
    fn drive_straight(
        &mut self,
        distance: f32,
        speed: f32,
        _acceleration: f32,
        _lock: bool,
    ) -> bool {
        self.straight_calls += 1;
        self.last_straight = Some((distance, speed));
        advance(&mut self.progress, self.ticks_per_move)
    }

    fn drive(&mut self, left: f32, right: f32) {
        self.stopped = left == 0.0 && right == 0.0;
    }

    fn reset_encoders(&mut self) {
        self.encoder_resets += 1;
    }
}

#[derive(Default)]
pub struct MockLift {
    pub height: f32,
    pub ticks_per_move: u32,
    progress: u32,
    pub moves: u32,
    pub last_target: Option<(f32, f32)>,
    pub releases: u32,
}

impl MockLift {
    pub fn at(height: f32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }
}

impl Lift for MockLift {
    fn current_position(&self) -> f32 {
        self.height
    }

    fn move_to_position(&mut self, target: f32, speed: f32) -> bool {
        self.moves += 1;
        self.last_target = Some((target, speed));
        let done = advance(&mut self.progress, self.ticks_per_move);
        if done {
            self.height = target;
        }
        done
    }

    fn release(&mut self) {
        self.releases += 1;
        self.progress = 0;
    }
}

#[derive(Default)]
pub struct MockArm {
    pub angle: f32,
    pub deployed: bool,
    pub held: HeldPiece,
    pub ticks_per_move: u32,
    progress: u32,
    pub moves: u32,
    pub last_target: Option<(f32, f32)>,
    pub ejects: u32,
}

impl MockArm {
    pub fn at(angle: f32) -> Self {
        Self {
            angle,
            deployed: true,
            ..Self::default()
        }
    }
}

impl LiftStatus for MockArm {
    fn is_deployed(&self) -> bool {
        self.deployed
    }

    fn held_piece(&self) -> HeldPiece {
        self.held
    }
}

impl Manipulator for MockArm {
    fn arm_angle(&self) -> f32 {
        self.angle
    }

    fn move_arm_to_position(&mut self, angle: f32, speed: f32) -> bool {
        self.moves += 1;
        self.last_target = Some((angle, speed));
        let done = advance(&mut self.progress, self.ticks_per_move);
        if done {
            self.angle = angle;
        }
        done
    }

    fn eject_cargo(&mut self) -> bool {
        self.ejects += 1;
        true
    }
}

#[derive(Default)]
pub struct MockAligner {
    pub ticks_per_move: u32,
    progress: u32,
    pub aligns: u32,
    pub rearms: u32,
    pub signal: bool,
}

impl Aligner for MockAligner {
    fn align(&mut self, _speed: f32) -> bool {
        self.aligns += 1;
        advance(&mut self.progress, self.ticks_per_move)
    }

    fn rearm(&mut self) {
        self.rearms += 1;
    }

    fn set_signal(&mut self, on: bool) {
        self.signal = on;
    }
}
