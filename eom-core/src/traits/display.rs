//! Display power trait
//!
//! The coordination core only decides *when* the panel changes power
//! state. Rendering and the panel driver live behind this trait.

/// Power-related side effects of the display
///
/// Calls are made in the order the power controller needs them; an
/// implementation may forward them to a renderer task rather than touch
/// the panel directly.
pub trait DisplayPower {
    /// Reduce (or restore) backlight and contrast
    fn set_dimmed(&mut self, dimmed: bool);

    /// Stop refreshing content
    fn suspend_rendering(&mut self);

    /// Blank the frame buffer
    fn clear(&mut self);

    /// Put the panel driver into its low-power mode
    fn enter_low_power(&mut self);

    /// Leave low-power mode and resume refreshing
    fn resume(&mut self);

    /// Force a full re-render of the current page
    fn render(&mut self);
}
