//! Display sink trait

/// Output side of the panel
///
/// Writes are fire-and-forget: the panel link is assumed to be available,
/// so there is no error path for the multiplexer to handle.
pub trait DisplaySink {
    /// Write text starting at a cell
    ///
    /// - `row`: Row number (0-1)
    /// - `col`: Column number (0-15)
    /// - `text`: Text to display; anything past the right edge is dropped
    fn write_line(&mut self, row: u8, col: u8, text: &str);

    /// Switch the backlight on or off
    fn set_backlight(&mut self, on: bool);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn write_line(&mut self, row: u8, col: u8, text: &str) {
        (**self).write_line(row, col, text)
    }

    fn set_backlight(&mut self, on: bool) {
        (**self).set_backlight(on)
    }
}
