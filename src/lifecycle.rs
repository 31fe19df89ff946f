//! Driver lifecycle state
//!
//! Every driver starts in [`DriverState::Constructed`]. A successful `init()`
//! moves it to [`DriverState::Initialized`] and `deinit()` moves it back, so a
//! driver can be initialized again after it was shut down.

use crate::Error;

/// Lifecycle state of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Register image populated, nothing written to the device yet
    #[default]
    Constructed,
    /// Initialization sequence completed
    Initialized,
}

impl DriverState {
    /// Returns `true` once `init()` has completed
    #[must_use]
    pub const fn is_initialized(self) -> bool {
        matches!(self, Self::Initialized)
    }

    /// Gate for setters, getters and `deinit()`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] unless the driver is initialized.
    pub const fn ensure_initialized<E>(self) -> Result<(), Error<E>> {
        match self {
            Self::Initialized => Ok(()),
            Self::Constructed => Err(Error::NotInitialized),
        }
    }

    /// Gate for `init()`
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] if `init()` already completed.
    pub const fn ensure_constructed<E>(self) -> Result<(), Error<E>> {
        match self {
            Self::Constructed => Ok(()),
            Self::Initialized => Err(Error::AlreadyInitialized),
        }
    }
}
