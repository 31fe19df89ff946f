#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod interface;
pub mod lifecycle;
pub mod peripheral;
pub mod register;
pub mod units;

pub mod adau1961;
pub mod bq25890;
pub mod tmp1075;
pub mod tpa3255;
pub mod veml6040;

// Re-export main types
pub use interface::{AddressWidth, DEFAULT_TRIES, I2cInterface, Probe};
pub use lifecycle::DriverState;
pub use peripheral::{AudioInterface, NoAudioInterface};
pub use register::{
    Access, ByteOrder, Field, MAX_REGISTER_LEN, Override, RegisterDescriptor, RegisterMap,
    RegisterTable,
};
pub use units::{BoostScale, ConversionError, Gain, LinearScale};

/// Gain value callers use to request mute instead of a level
///
/// [`Gain::from_db`] maps this sentinel to [`Gain::Muted`].
pub const MUTE_GAIN_DB: f32 = -120.0;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device (includes a failed presence probe)
    Bus(E),
    /// GPIO pin error
    Pin(E),
    /// Readback after a write did not match the written bytes
    VerifyMismatch {
        /// Register address that failed verification
        address: u16,
    },
    /// Unexpected device identification value (contains the value read)
    InvalidDevice(u16),
    /// The codec PLL did not report lock in time
    PllLockTimeout,
    /// The secondary peripheral (e.g. the audio serial port) failed
    Peripheral,
    /// Operation requires `init()` to have completed
    NotInitialized,
    /// `init()` was called on an initialized driver
    AlreadyInitialized,
    /// Physical value outside the range the register can encode
    OutOfRange,
    /// Physical value is not a multiple of the register step
    NotQuantized,
}

impl<E> Error<E> {
    /// Returns `true` for caller mistakes that were caught before any bus traffic
    ///
    /// These indicate a programming error rather than a hardware fault: the
    /// driver state or the requested value was invalid.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized | Self::AlreadyInitialized | Self::OutOfRange | Self::NotQuantized
        )
    }
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
