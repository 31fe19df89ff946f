//! Secondary peripheral seam
//!
//! Some chips need a second interface besides the control bus, e.g. the audio
//! serial port of a codec. The driver brings it up and down together with the
//! chip and pumps it from its own `handle()`.

/// Audio data interface driven alongside a codec
pub trait AudioInterface {
    /// Error type of the interface
    type Error;

    /// Bring the interface up
    ///
    /// # Errors
    ///
    /// Returns an error if the interface could not be started.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Shut the interface down
    ///
    /// # Errors
    ///
    /// Returns an error if the interface could not be stopped.
    fn deinit(&mut self) -> Result<(), Self::Error>;

    /// Service pending transfers, called from the driver's `handle()`
    fn handle(&mut self);
}

/// Placeholder for boards where the audio interface is managed elsewhere
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudioInterface;

impl AudioInterface for NoAudioInterface {
    type Error = core::convert::Infallible;

    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn handle(&mut self) {}
}
