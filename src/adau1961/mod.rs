//! ADAU1961 stereo audio codec
//!
//! The driver keeps a full image of the codec's control registers. `init()`
//! writes the clock registers first (the codec ignores every other register
//! while its core clock is off), then the remaining registers in address
//! order. Gain setters convert dB values into register fields and write only
//! the registers they change.
//!
//! # Example
//!
//! ```ignore
//! use chip_drivers::adau1961::{Adau1961, Adau1961Config, Channel, ClockConfig, Reg};
//! use chip_drivers::{AddressWidth, Gain, I2cInterface, NoAudioInterface, Override};
//!
//! let interface = I2cInterface::new(i2c, I2C_ADDRESS, AddressWidth::Bits16);
//! let mut codec = Adau1961::new(interface, NoAudioInterface, Adau1961Config::default());
//!
//! // Enable the left differential input and record mixer on top of the defaults
//! let overrides = [
//!     Override::new(Reg::R4RecMixerLeft0, 0b0000_0001),
//!     Override::new(Reg::R8LeftDiffInputVol, 0b0000_0011),
//! ];
//! codec.init(&mut delay, &ClockConfig::default(), &overrides)?;
//! codec.set_in_diff_gain(Channel::Left, Gain::Db(36.0))?;
//! ```

pub mod registers;

pub use registers::{Adau1961Registers, Reg};

use crate::interface::{self, Probe};
use crate::register::Override;
use crate::units::{BoostScale, BoostedCode, ConversionError, Gain, LinearScale, field_value};
use crate::{AudioInterface, DriverState, Error};
use device_driver::RegisterInterface;
use registers::{
    BOOST_0DB, BOOST_20DB, BOOST_MUTE, CLKSRC, COREN, DEFAULTS, DIFF_UNMUTE, DIFF_VOLUME,
    INFREQ, MIXER_AUX_GAIN, MIXER_DIFF_BOOST, OUT_UNMUTE, OUT_VOLUME, PLL_DENOMINATOR_BYTE,
    PLL_EN, PLL_LOCK, PLL_NUMERATOR_BYTE, PLL_R, PLL_TYPE, PLL_X,
};

/// I2C address with ADDR0 and ADDR1 low
pub const I2C_ADDRESS: u8 = 0x38;

/// Number of 1 ms polls for PLL lock before giving up
const PLL_LOCK_POLL_ATTEMPTS: u32 = 20;

/// Differential input PGA: -12 dB .. 35.25 dB in 0.75 dB steps, plus a 20 dB
/// boost stage that extends the range to 55.5 dB
pub const DIFF_INPUT_SCALE: BoostScale = BoostScale::new(
    LinearScale::new(-12.0, 35.25, 0.75, -12.0),
    35.25,
    20.25,
    55.5,
);

/// Aux input mixer gain: -12 dB .. 6 dB in 3 dB steps (code 0 is mute)
pub const AUX_INPUT_SCALE: LinearScale = LinearScale::new(-12.0, 6.0, 3.0, -12.0);

/// Line and headphone output volume: -57 dB .. 6 dB in 1 dB steps
pub const OUTPUT_SCALE: LinearScale = LinearScale::new(-57.0, 6.0, 1.0, -57.0);

/// Stereo channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Left channel
    Left,
    /// Right channel
    Right,
}

/// Core clock input frequency as a multiple of the sample rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputClockFrequency {
    /// 256 × fs
    #[default]
    Fs256 = 0,
    /// 512 × fs
    Fs512 = 1,
    /// 768 × fs
    Fs768 = 2,
    /// 1024 × fs
    Fs1024 = 3,
}

/// PLL input clock divider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllInputDivider {
    /// Divide by 1
    #[default]
    Div1 = 0,
    /// Divide by 2
    Div2 = 1,
    /// Divide by 3
    Div3 = 2,
    /// Divide by 4
    Div4 = 3,
}

/// PLL settings, `f_out = (f_in / X) * (R + N / M)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllConfig {
    /// Denominator M (fractional mode)
    pub denominator: u16,
    /// Numerator N (fractional mode)
    pub numerator: u16,
    /// Integer part R (2..=8)
    pub integer: u8,
    /// Input divider X
    pub input_divider: PllInputDivider,
    /// Fractional mode, otherwise integer mode
    pub fractional: bool,
}

/// Clock source of the codec core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// MCLK pin drives the core directly
    #[default]
    Mclk,
    /// Core runs from the internal PLL
    Pll(PllConfig),
}

/// Clock register settings applied first during `init()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Core clock source
    pub source: ClockSource,
    /// Input clock frequency
    pub input_frequency: InputClockFrequency,
    /// Enable the core clock
    pub core_enable: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            source: ClockSource::Mclk,
            input_frequency: InputClockFrequency::Fs256,
            core_enable: true,
        }
    }
}

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Adau1961Config {
    /// Read every written register back and compare
    pub check_with_read: bool,
}

/// ADAU1961 driver
pub struct Adau1961<I, A> {
    interface: I,
    audio: A,
    registers: Adau1961Registers,
    config: Adau1961Config,
    state: DriverState,
}

impl<I, A> Adau1961<I, A>
where
    I: RegisterInterface<AddressType = u16> + Probe,
    A: AudioInterface,
{
    /// Create a new driver with the register image set to its defaults
    ///
    /// Nothing is sent to the codec until [`init()`](Self::init).
    pub fn new(interface: I, audio: A, config: Adau1961Config) -> Self {
        let mut registers = Adau1961Registers::new();
        registers.load(DEFAULTS);
        Self {
            interface,
            audio,
            registers,
            config,
            state: DriverState::Constructed,
        }
    }

    /// Bring up the audio interface and configure the codec
    ///
    /// Sequence: audio interface, presence probe, clock control register, then
    /// every other register in table order with the defaults and `overrides`
    /// applied. With the PLL selected, R0 first goes out with the core clock
    /// off; the core is enabled only after the PLL is programmed and locked.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay provider for the PLL lock wait
    /// * `clock` - Clock register settings
    /// * `overrides` - Register values applied on top of the defaults; entries
    ///   for the clock registers are ignored
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] when called twice, otherwise the
    /// first bus, verification, peripheral or PLL lock error. The driver stays
    /// uninitialized on error, with the audio interface shut down again, and
    /// `init()` may be retried.
    pub fn init<D>(
        &mut self,
        delay: &mut D,
        clock: &ClockConfig,
        overrides: &[Override<Reg>],
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.state.ensure_constructed()?;

        self.audio.init().map_err(|_| Error::Peripheral)?;
        if let Err(error) = self.configure(delay, clock, overrides) {
            // The codec error is the one worth reporting
            let _ = self.audio.deinit();
            return Err(error);
        }

        self.state = DriverState::Initialized;
        #[cfg(feature = "defmt")]
        defmt::info!("ADAU1961 initialized");
        Ok(())
    }

    fn configure<D>(
        &mut self,
        delay: &mut D,
        clock: &ClockConfig,
        overrides: &[Override<Reg>],
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.interface.probe()?;

        self.registers.clear();
        self.registers.load(DEFAULTS);
        self.apply_clock(clock);
        if matches!(clock.source, ClockSource::Pll(_)) {
            self.registers.set_flag(Reg::R0ClockControl, COREN, false);
            self.write(Reg::R0ClockControl)?;
            // The lock bit is read-only, so R1 never verifies
            interface::write(
                &mut self.interface,
                self.registers.get(Reg::R1PllControl),
                false,
            )?;
            self.wait_for_pll_lock(delay)?;
            self.registers
                .set_flag(Reg::R0ClockControl, COREN, clock.core_enable);
        }
        self.write(Reg::R0ClockControl)?;

        for value in overrides {
            if !matches!(value.reg, Reg::R0ClockControl | Reg::R1PllControl) {
                self.registers.set_raw(value.reg, value.raw);
            }
        }
        interface::write_all(
            &mut self.interface,
            &self.registers,
            &[Reg::R0ClockControl, Reg::R1PllControl],
            self.config.check_with_read,
        )
    }

    /// Stop the core clock and shut down the audio interface
    ///
    /// The register image returns to its defaults, so a later `init()` starts
    /// from the same state as a fresh driver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, otherwise the bus or
    /// peripheral error. A failed clock write leaves the image and the driver
    /// state untouched.
    pub fn deinit(&mut self) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;

        let mut clock_control = *self.registers.get(Reg::R0ClockControl);
        clock_control.set_flag(COREN, false);
        interface::write(
            &mut self.interface,
            &clock_control,
            self.config.check_with_read,
        )?;
        *self.registers.get_mut(Reg::R0ClockControl) = clock_control;
        self.audio.deinit().map_err(|_| Error::Peripheral)?;

        self.registers.clear();
        self.registers.load(DEFAULTS);
        self.state = DriverState::Constructed;
        #[cfg(feature = "defmt")]
        defmt::info!("ADAU1961 shut down");
        Ok(())
    }

    /// Service the audio interface
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`.
    pub fn handle(&mut self) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        self.audio.handle();
        Ok(())
    }

    /// Set the differential input gain of a channel
    ///
    /// Gains above 35.25 dB enable the 20 dB mixer boost and program the PGA
    /// with the remainder; the mixer register is written before the volume
    /// register. [`Gain::Muted`] only clears the unmute bit, the gain code is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] outside -12 dB .. 55.5 dB,
    /// [`Error::NotQuantized`] off the 0.75 dB grid, or a bus error.
    pub fn set_in_diff_gain(&mut self, channel: Channel, gain: Gain) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        let (mixer, volume) = match channel {
            Channel::Left => (Reg::R5RecMixerLeft1, Reg::R8LeftDiffInputVol),
            Channel::Right => (Reg::R7RecMixerRight1, Reg::R9RightDiffInputVol),
        };

        match gain {
            Gain::Muted => {
                self.registers.set_flag(volume, DIFF_UNMUTE, false);
                self.write(volume)
            }
            Gain::Db(db) => {
                let code = DIFF_INPUT_SCALE
                    .encode(db)
                    .map_err(ConversionError::into_error)?;
                let volume_code = field_value(code.code).map_err(ConversionError::into_error)?;
                let boost = if code.boost { BOOST_20DB } else { BOOST_0DB };

                self.registers.set_field(mixer, MIXER_DIFF_BOOST, boost);
                self.write(mixer)?;

                self.registers.set_field(volume, DIFF_VOLUME, volume_code);
                self.registers.set_flag(volume, DIFF_UNMUTE, true);
                self.write(volume)
            }
        }
    }

    /// Set the aux (single-ended) input mixer gain of a channel
    ///
    /// The aux gain field has no separate mute bit: [`Gain::Muted`] writes
    /// gain code 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] outside -12 dB .. 6 dB,
    /// [`Error::NotQuantized`] off the 3 dB grid, or a bus error.
    pub fn set_in_aux_gain(&mut self, channel: Channel, gain: Gain) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        let mixer = match channel {
            Channel::Left => Reg::R5RecMixerLeft1,
            Channel::Right => Reg::R7RecMixerRight1,
        };

        let code = match gain {
            Gain::Muted => 0,
            Gain::Db(db) => {
                let code = AUX_INPUT_SCALE
                    .encode(db)
                    .map_err(ConversionError::into_error)?;
                field_value(code + 1).map_err(ConversionError::into_error)?
            }
        };

        self.registers.set_field(mixer, MIXER_AUX_GAIN, code);
        self.write(mixer)
    }

    /// Set the line output volume of a channel
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] outside -57 dB .. 6 dB,
    /// [`Error::NotQuantized`] off the 1 dB grid, or a bus error.
    pub fn set_out_line_gain(&mut self, channel: Channel, gain: Gain) -> Result<(), Error<I::Error>> {
        let reg = match channel {
            Channel::Left => Reg::R31LineOutputLeftVol,
            Channel::Right => Reg::R32LineOutputRightVol,
        };
        self.set_output_gain(reg, gain)
    }

    /// Set the headphone output volume of a channel
    ///
    /// # Errors
    ///
    /// Same as [`set_out_line_gain()`](Self::set_out_line_gain).
    pub fn set_out_headphone_gain(
        &mut self,
        channel: Channel,
        gain: Gain,
    ) -> Result<(), Error<I::Error>> {
        let reg = match channel {
            Channel::Left => Reg::R29PlayHpLeftVol,
            Channel::Right => Reg::R30PlayHpRightVol,
        };
        self.set_output_gain(reg, gain)
    }

    fn set_output_gain(&mut self, reg: Reg, gain: Gain) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        match gain {
            Gain::Muted => self.registers.set_flag(reg, OUT_UNMUTE, false),
            Gain::Db(db) => {
                let code = OUTPUT_SCALE.encode(db).map_err(ConversionError::into_error)?;
                let code = field_value(code).map_err(ConversionError::into_error)?;
                self.registers.set_field(reg, OUT_VOLUME, code);
                self.registers.set_flag(reg, OUT_UNMUTE, true);
            }
        }
        self.write(reg)
    }

    /// Differential input gain of a channel, from the register image
    ///
    /// Muted when either the PGA mute bit or the mixer boost field is off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`.
    pub fn in_diff_gain(&self, channel: Channel) -> Result<Gain, Error<I::Error>> {
        self.state.ensure_initialized()?;
        let (mixer, volume) = match channel {
            Channel::Left => (Reg::R5RecMixerLeft1, Reg::R8LeftDiffInputVol),
            Channel::Right => (Reg::R7RecMixerRight1, Reg::R9RightDiffInputVol),
        };

        let boost = self.registers.field(mixer, MIXER_DIFF_BOOST);
        if boost == BOOST_MUTE || !self.registers.get(volume).flag(DIFF_UNMUTE) {
            return Ok(Gain::Muted);
        }
        let code = BoostedCode {
            boost: boost == BOOST_20DB,
            code: i32::from(self.registers.field(volume, DIFF_VOLUME)),
        };
        Ok(Gain::Db(DIFF_INPUT_SCALE.decode(code)))
    }

    /// Aux input mixer gain of a channel, from the register image
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`.
    pub fn in_aux_gain(&self, channel: Channel) -> Result<Gain, Error<I::Error>> {
        self.state.ensure_initialized()?;
        let mixer = match channel {
            Channel::Left => Reg::R5RecMixerLeft1,
            Channel::Right => Reg::R7RecMixerRight1,
        };

        Ok(match self.registers.field(mixer, MIXER_AUX_GAIN) {
            0 => Gain::Muted,
            code => Gain::Db(AUX_INPUT_SCALE.decode(i32::from(code) - 1)),
        })
    }

    /// Line output volume of a channel, from the register image
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`.
    pub fn out_line_gain(&self, channel: Channel) -> Result<Gain, Error<I::Error>> {
        let reg = match channel {
            Channel::Left => Reg::R31LineOutputLeftVol,
            Channel::Right => Reg::R32LineOutputRightVol,
        };
        self.output_gain(reg)
    }

    /// Headphone output volume of a channel, from the register image
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`.
    pub fn out_headphone_gain(&self, channel: Channel) -> Result<Gain, Error<I::Error>> {
        let reg = match channel {
            Channel::Left => Reg::R29PlayHpLeftVol,
            Channel::Right => Reg::R30PlayHpRightVol,
        };
        self.output_gain(reg)
    }

    fn output_gain(&self, reg: Reg) -> Result<Gain, Error<I::Error>> {
        self.state.ensure_initialized()?;
        let register = self.registers.get(reg);
        if !register.flag(OUT_UNMUTE) {
            return Ok(Gain::Muted);
        }
        Ok(Gain::Db(OUTPUT_SCALE.decode(i32::from(register.field(OUT_VOLUME)))))
    }

    /// Register image
    pub const fn registers(&self) -> &Adau1961Registers {
        &self.registers
    }

    /// Current lifecycle state
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Consume the driver and return the bus interface and audio interface
    pub fn release(self) -> (I, A) {
        (self.interface, self.audio)
    }

    fn write(&mut self, reg: Reg) -> Result<(), Error<I::Error>> {
        interface::write(
            &mut self.interface,
            self.registers.get(reg),
            self.config.check_with_read,
        )
    }

    fn apply_clock(&mut self, clock: &ClockConfig) {
        let r0 = self.registers.get_mut(Reg::R0ClockControl);
        r0.set_flag(COREN, clock.core_enable);
        r0.set_field(INFREQ, clock.input_frequency as u8);
        r0.set_flag(CLKSRC, matches!(clock.source, ClockSource::Pll(_)));

        let r1 = self.registers.get_mut(Reg::R1PllControl);
        r1.set_raw(0);
        if let ClockSource::Pll(pll) = clock.source {
            let bytes = r1.bytes_mut();
            bytes[PLL_DENOMINATOR_BYTE..PLL_DENOMINATOR_BYTE + 2]
                .copy_from_slice(&pll.denominator.to_be_bytes());
            bytes[PLL_NUMERATOR_BYTE..PLL_NUMERATOR_BYTE + 2]
                .copy_from_slice(&pll.numerator.to_be_bytes());
            r1.set_flag(PLL_TYPE, pll.fractional);
            r1.set_field(PLL_X, pll.input_divider as u8);
            r1.set_field(PLL_R, pll.integer);
            r1.set_flag(PLL_EN, true);
        }
    }

    fn wait_for_pll_lock<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        for _ in 0..PLL_LOCK_POLL_ATTEMPTS {
            delay.delay_ms(1);
            interface::read(
                &mut self.interface,
                self.registers.get_mut(Reg::R1PllControl),
            )?;
            if self.registers.get(Reg::R1PllControl).flag(PLL_LOCK) {
                return Ok(());
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("ADAU1961 PLL did not lock");
        Err(Error::PllLockTimeout)
    }
}
