//! Drivetrain and vision alignment traits
//!
//! Both collaborators are pollable state machines of their own: the
//! multi-tick calls return `false` while work remains and `true` on the
//! tick they finish.

/// Drivetrain as seen by the deposit sequences
pub trait Drive {
    /// Drive straight for `distance`, call until it returns `true`
    ///
    /// `speed` is signed (negative backs up). `acceleration` is the ramp
    /// proportion per tick; `heading_lock` holds the current heading with the
    /// gyro while driving.
    fn drive_straight(
        &mut self,
        distance: f32,
        speed: f32,
        acceleration: f32,
        heading_lock: bool,
    ) -> bool;

    /// Apply raw left/right effort
    fn drive(&mut self, left: f32, right: f32);

    /// Zero the drivetrain encoders
    fn reset_encoders(&mut self);
}

/// Vision-based alignment to a scoring target
pub trait Aligner {
    /// Attempt one alignment step at `speed`, call until it returns `true`
    fn align(&mut self, speed: f32) -> bool;

    /// Put the aligner's own state machine back to its first step
    fn rearm(&mut self);

    /// Switch the alignment signal (ring light / camera relay)
    fn set_signal(&mut self, on: bool);
}

impl<T: Drive + ?Sized> Drive for &mut T {
    fn drive_straight(
        &mut self,
        distance: f32,
        speed: f32,
        acceleration: f32,
        heading_lock: bool,
    ) -> bool {
        (**self).drive_straight(distance, speed, acceleration, heading_lock)
    }

    fn drive(&mut self, left: f32, right: f32) {
        (**self).drive(left, right)
    }

    fn reset_encoders(&mut self) {
        (**self).reset_encoders()
    }
}

impl<T: Aligner + ?Sized> Aligner for &mut T {
    fn align(&mut self, speed: f32) -> bool {
        (**self).align(speed)
    }

    fn rearm(&mut self) {
        (**self).rearm()
    }

    fn set_signal(&mut self, on: bool) {
        (**self).set_signal(on)
    }
}
