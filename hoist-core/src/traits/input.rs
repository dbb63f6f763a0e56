//! Operator input trait

/// Joystick axes and buttons, indexed the way the driver station numbers
/// them
pub trait OperatorInput {
    /// Axis value in `-1.0..=1.0`; unknown axes read `0.0`
    fn axis(&self, index: u8) -> f32;

    /// Button state; unknown buttons read released
    fn button(&self, index: u8) -> bool;
}

impl<T: OperatorInput + ?Sized> OperatorInput for &T {
    fn axis(&self, index: u8) -> f32 {
        (**self).axis(index)
    }

    fn button(&self, index: u8) -> bool {
        (**self).button(index)
    }
}
