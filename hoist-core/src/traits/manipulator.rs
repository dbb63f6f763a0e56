//! Manipulator (arm + intake) traits

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the intake currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeldPiece {
    /// Nothing held
    #[default]
    None,
    /// Docking panel (hatch)
    Hatch,
    /// Ball (cargo)
    Cargo,
}

impl HeldPiece {
    /// Map a raw classifier code to a held piece
    ///
    /// `1` is a hatch, `2` is cargo; anything else reads as nothing held.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => HeldPiece::Hatch,
            2 => HeldPiece::Cargo,
            _ => HeldPiece::None,
        }
    }
}

/// Manipulator state the lift reads every tick
pub trait LiftStatus {
    /// Whether the arm is deployed (unfolded) and the lift may go all the
    /// way down
    fn is_deployed(&self) -> bool;

    /// What the intake holds, which selects the holding effort
    fn held_piece(&self) -> HeldPiece;
}

/// Arm and intake as seen by the deposit sequences
pub trait Manipulator: LiftStatus {
    /// Current arm angle in degrees
    fn arm_angle(&self) -> f32;

    /// Move the arm to `angle`, call until it returns `true`
    fn move_arm_to_position(&mut self, angle: f32, speed: f32) -> bool;

    /// Spin the intake out to release a ball, call until it returns `true`
    fn eject_cargo(&mut self) -> bool;
}

/// Plain snapshot of the manipulator state
///
/// Useful when the loop reads the manipulator once per tick and hands the
/// result to the lift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    /// Arm deployed
    pub deployed: bool,
    /// Held piece
    pub held: HeldPiece,
}

impl StatusSnapshot {
    /// Capture the status of any [`LiftStatus`] source
    pub fn capture<S: LiftStatus + ?Sized>(source: &S) -> Self {
        Self {
            deployed: source.is_deployed(),
            held: source.held_piece(),
        }
    }
}

impl LiftStatus for StatusSnapshot {
    fn is_deployed(&self) -> bool {
        self.deployed
    }

    fn held_piece(&self) -> HeldPiece {
        self.held
    }
}

impl<T: LiftStatus + ?Sized> LiftStatus for &T {
    fn is_deployed(&self) -> bool {
        (**self).is_deployed()
    }

    fn held_piece(&self) -> HeldPiece {
        (**self).held_piece()
    }
}

impl<T: LiftStatus + ?Sized> LiftStatus for &mut T {
    fn is_deployed(&self) -> bool {
        (**self).is_deployed()
    }

    fn held_piece(&self) -> HeldPiece {
        (**self).held_piece()
    }
}

impl<T: Manipulator + ?Sized> Manipulator for &mut T {
    fn arm_angle(&self) -> f32 {
        (**self).arm_angle()
    }

    fn move_arm_to_position(&mut self, angle: f32, speed: f32) -> bool {
        (**self).move_arm_to_position(angle, speed)
    }

    fn eject_cargo(&mut self) -> bool {
        (**self).eject_cargo()
    }
}
