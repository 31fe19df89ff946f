//! Conversions between physical values and register codes
//!
//! Every converter is strict: a value outside the encodable range is rejected
//! with [`ConversionError::OutOfRange`] and a value that does not sit on the
//! register's step grid is rejected with [`ConversionError::NotQuantized`].
//! Nothing is clamped or rounded to the nearest step.
//!
//! # Example
//!
//! ```
//! use chip_drivers::units::LinearScale;
//!
//! // Line output volume: -57 dB .. +6 dB in 1 dB steps
//! let scale = LinearScale::new(-57.0, 6.0, 1.0, -57.0);
//! assert_eq!(scale.encode(0.0), Ok(57));
//! assert_eq!(scale.decode(57), 0.0);
//! ```

use crate::{Error, MUTE_GAIN_DB};

/// Maximum distance from the step grid (in steps) still accepted as quantized
const QUANTIZATION_TOLERANCE: f32 = 1e-3;

/// Reasons a physical value cannot be encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionError {
    /// Value lies outside `[min, max]`
    OutOfRange,
    /// Value is not `offset + k * step` for an integer `k`
    NotQuantized,
}

impl ConversionError {
    /// Convert into the driver error type
    #[must_use]
    pub const fn into_error<E>(self) -> Error<E> {
        match self {
            Self::OutOfRange => Error::OutOfRange,
            Self::NotQuantized => Error::NotQuantized,
        }
    }
}

/// Linear mapping `code = (value - offset) / step` over `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearScale {
    /// Smallest encodable value
    pub min: f32,
    /// Largest encodable value
    pub max: f32,
    /// Physical value of one code step
    pub step: f32,
    /// Physical value of code 0
    pub offset: f32,
}

impl LinearScale {
    /// Create a new scale
    #[must_use]
    pub const fn new(min: f32, max: f32, step: f32, offset: f32) -> Self {
        Self {
            min,
            max,
            step,
            offset,
        }
    }

    /// Convert a physical value into a register code
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::OutOfRange`] when `value` is outside
    /// `[min, max]` (this includes NaN) and [`ConversionError::NotQuantized`]
    /// when it is not on the step grid.
    #[allow(clippy::cast_possible_truncation)]
    pub fn encode(&self, value: f32) -> Result<i32, ConversionError> {
        if !(self.min..=self.max).contains(&value) {
            return Err(ConversionError::OutOfRange);
        }

        let steps = (value - self.offset) / self.step;
        let code = libm::roundf(steps);
        if libm::fabsf(steps - code) > QUANTIZATION_TOLERANCE {
            return Err(ConversionError::NotQuantized);
        }

        Ok(code as i32)
    }

    /// Convert a register code back into a physical value
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn decode(&self, code: i32) -> f32 {
        code as f32 * self.step + self.offset
    }
}

/// Narrow a register code to an unsigned bit-field value
///
/// # Errors
///
/// Returns [`ConversionError::OutOfRange`] for codes outside `0..=255`.
pub fn field_value(code: i32) -> Result<u8, ConversionError> {
    u8::try_from(code).map_err(|_| ConversionError::OutOfRange)
}

/// Register code produced by a [`BoostScale`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoostedCode {
    /// Whether the boost stage must be enabled
    pub boost: bool,
    /// Code for the linear stage
    pub code: i32,
}

/// Linear stage followed by a fixed boost stage
///
/// Values up to `threshold` are encoded directly by `base`. Above it the boost
/// stage supplies `compensation` and `base` encodes the remainder.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoostScale {
    /// Linear stage, its `max` is the boost threshold
    pub base: LinearScale,
    /// Largest value encoded without boost
    pub threshold: f32,
    /// Gain contributed by the boost stage
    pub compensation: f32,
    /// Largest encodable value with boost
    pub max: f32,
}

impl BoostScale {
    /// Create a new boost scale
    #[must_use]
    pub const fn new(base: LinearScale, threshold: f32, compensation: f32, max: f32) -> Self {
        Self {
            base,
            threshold,
            compensation,
            max,
        }
    }

    /// Convert a physical value into a boost flag and linear code
    ///
    /// # Errors
    ///
    /// Same conditions as [`LinearScale::encode`], checked against
    /// `[base.min, max]`.
    pub fn encode(&self, value: f32) -> Result<BoostedCode, ConversionError> {
        if !(self.base.min..=self.max).contains(&value) {
            return Err(ConversionError::OutOfRange);
        }

        if value <= self.threshold {
            Ok(BoostedCode {
                boost: false,
                code: self.base.encode(value)?,
            })
        } else {
            Ok(BoostedCode {
                boost: true,
                code: self.base.encode(value - self.compensation)?,
            })
        }
    }

    /// Convert a boost flag and linear code back into a physical value
    #[must_use]
    pub fn decode(&self, code: BoostedCode) -> f32 {
        let value = self.base.decode(code.code);
        if code.boost {
            value + self.compensation
        } else {
            value
        }
    }
}

/// Requested gain of an amplifier or attenuator stage
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// Stage muted
    Muted,
    /// Gain in dB
    Db(f32),
}

impl Gain {
    /// Build a gain from a dB value, treating [`MUTE_GAIN_DB`] and below as mute
    #[must_use]
    pub fn from_db(db: f32) -> Self {
        if db <= MUTE_GAIN_DB {
            Self::Muted
        } else {
            Self::Db(db)
        }
    }

    /// Gain in dB, [`MUTE_GAIN_DB`] when muted
    #[must_use]
    pub const fn to_db(self) -> f32 {
        match self {
            Self::Muted => MUTE_GAIN_DB,
            Self::Db(db) => db,
        }
    }

    /// Returns `true` if the stage is muted
    #[must_use]
    pub const fn is_muted(self) -> bool {
        matches!(self, Self::Muted)
    }
}

impl From<f32> for Gain {
    fn from(db: f32) -> Self {
        Self::from_db(db)
    }
}
