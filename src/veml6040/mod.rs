//! VEML6040 RGBW color sensor

pub mod registers;

pub use registers::{Reg, Veml6040Registers};

use crate::interface::{self, Probe};
use crate::{DriverState, Error};
use device_driver::RegisterInterface;
use registers::{AF, IT, SD, TRIG};

/// Fixed I2C address
pub const I2C_ADDRESS: u8 = 0x10;

/// Integration time per measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntegrationTime {
    /// 40 ms
    #[default]
    Ms40 = 0,
    /// 80 ms
    Ms80 = 1,
    /// 160 ms
    Ms160 = 2,
    /// 320 ms
    Ms320 = 3,
    /// 640 ms
    Ms640 = 4,
    /// 1280 ms
    Ms1280 = 5,
}

impl IntegrationTime {
    /// Green channel sensitivity in lux per count
    #[must_use]
    pub const fn lux_per_count(self) -> f32 {
        match self {
            Self::Ms40 => 0.251_68,
            Self::Ms80 => 0.125_84,
            Self::Ms160 => 0.062_92,
            Self::Ms320 => 0.031_46,
            Self::Ms640 => 0.015_73,
            Self::Ms1280 => 0.007_865,
        }
    }

    /// Integration time in milliseconds
    #[must_use]
    pub const fn millis(self) -> u16 {
        40 << (self as u16)
    }
}

/// Measurement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementMode {
    /// Measure continuously
    #[default]
    Auto,
    /// Measure once per [`Veml6040::trigger()`]
    Force,
}

/// Sensor configuration applied by `init()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Veml6040Config {
    /// Integration time
    pub integration_time: IntegrationTime,
    /// Measurement mode
    pub mode: MeasurementMode,
    /// Read every written register back and compare
    pub check_with_read: bool,
}

/// Color channel counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorData {
    /// Red count
    pub red: u16,
    /// Green count
    pub green: u16,
    /// Blue count
    pub blue: u16,
    /// White count
    pub white: u16,
}

/// VEML6040 driver
pub struct Veml6040<I> {
    interface: I,
    registers: Veml6040Registers,
    config: Veml6040Config,
    state: DriverState,
}

impl<I> Veml6040<I>
where
    I: RegisterInterface<AddressType = u16> + Probe,
{
    /// Create a new driver
    pub fn new(interface: I) -> Self {
        Self {
            interface,
            registers: Veml6040Registers::new(),
            config: Veml6040Config::default(),
            state: DriverState::Constructed,
        }
    }

    /// Enable the sensor with the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] when called twice, or a bus or
    /// verification error.
    pub fn init(&mut self, config: &Veml6040Config) -> Result<(), Error<I::Error>> {
        self.state.ensure_constructed()?;
        self.interface.probe()?;

        self.config = *config;
        self.registers.clear();
        let conf = self.registers.get_mut(Reg::Conf);
        conf.set_field(IT, config.integration_time as u8);
        conf.set_flag(AF, config.mode == MeasurementMode::Force);
        conf.set_flag(SD, false);

        interface::write_all(
            &mut self.interface,
            &self.registers,
            &[],
            self.config.check_with_read,
        )?;

        self.state = DriverState::Initialized;
        Ok(())
    }

    /// Put the sensor into shutdown
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn deinit(&mut self) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;

        self.registers.set_flag(Reg::Conf, SD, true);
        self.write(Reg::Conf)?;

        self.registers.clear();
        self.state = DriverState::Constructed;
        Ok(())
    }

    /// Change the integration time
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        self.registers.set_field(Reg::Conf, IT, time as u8);
        self.write(Reg::Conf)?;
        self.config.integration_time = time;
        Ok(())
    }

    /// Start one measurement in force mode
    ///
    /// The trigger bit clears itself after the measurement, so this write is
    /// never verified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn trigger(&mut self) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        self.registers.set_flag(Reg::Conf, TRIG, true);
        let result = interface::write(&mut self.interface, self.registers.get(Reg::Conf), false);
        self.registers.set_flag(Reg::Conf, TRIG, false);
        result
    }

    /// Red channel count
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn red_raw(&mut self) -> Result<u16, Error<I::Error>> {
        self.read_word(Reg::Red)
    }

    /// Green channel count
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn green_raw(&mut self) -> Result<u16, Error<I::Error>> {
        self.read_word(Reg::Green)
    }

    /// Blue channel count
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn blue_raw(&mut self) -> Result<u16, Error<I::Error>> {
        self.read_word(Reg::Blue)
    }

    /// White channel count
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn white_raw(&mut self) -> Result<u16, Error<I::Error>> {
        self.read_word(Reg::White)
    }

    /// All four channel counts
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or the first bus
    /// error.
    pub fn read_color(&mut self) -> Result<ColorData, Error<I::Error>> {
        Ok(ColorData {
            red: self.read_word(Reg::Red)?,
            green: self.read_word(Reg::Green)?,
            blue: self.read_word(Reg::Blue)?,
            white: self.read_word(Reg::White)?,
        })
    }

    /// Ambient light in lux, from the green channel
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn ambient_lux(&mut self) -> Result<f32, Error<I::Error>> {
        let green = self.read_word(Reg::Green)?;
        Ok(f32::from(green) * self.config.integration_time.lux_per_count())
    }

    /// Register image
    pub const fn registers(&self) -> &Veml6040Registers {
        &self.registers
    }

    /// Current lifecycle state
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Consume the driver and return the bus interface
    pub fn release(self) -> I {
        self.interface
    }

    fn read_word(&mut self, reg: Reg) -> Result<u16, Error<I::Error>> {
        self.state.ensure_initialized()?;
        interface::read(&mut self.interface, self.registers.get_mut(reg))?;
        Ok(self.registers.get(reg).word())
    }

    fn write(&mut self, reg: Reg) -> Result<(), Error<I::Error>> {
        interface::write(
            &mut self.interface,
            self.registers.get(reg),
            self.config.check_with_read,
        )
    }
}
