//! BQ25890 single-cell Li-ion charger
//!
//! Unlike the other drivers, the control register defaults are read from the
//! charger during `init()`: its power-on values depend on the detected input
//! source, so only the fields in [`Bq25890Config`] are changed.

pub mod registers;

pub use registers::{Bq25890Registers, Reg};

use crate::interface::{self, Probe};
use crate::register::Field;
use crate::units::{ConversionError, LinearScale, field_value};
use crate::{DriverState, Error};
use device_driver::RegisterInterface;
use registers::{
    BATFET_DIS, CONV_RATE, CONV_START, ICHGR, IINLIM, JEITA_VSET, VBUS_GD, VBUSV, VOLTAGE,
};

/// Fixed I2C address
pub const I2C_ADDRESS: u8 = 0x6A;

/// Input current limit: 100 mA .. 3250 mA in 50 mA steps
pub const INPUT_CURRENT_SCALE: LinearScale = LinearScale::new(100.0, 3250.0, 50.0, 100.0);

/// Battery and system voltage ADC: 2304 mV + 20 mV per code
pub const BATTERY_VOLTAGE_SCALE: LinearScale = LinearScale::new(2304.0, 4844.0, 20.0, 2304.0);

/// VBUS voltage ADC: 2600 mV + 100 mV per code
pub const VBUS_VOLTAGE_SCALE: LinearScale = LinearScale::new(2600.0, 15300.0, 100.0, 2600.0);

/// Charge current ADC: 50 mA per code
pub const CHARGE_CURRENT_SCALE: LinearScale = LinearScale::new(0.0, 6350.0, 50.0, 0.0);

/// Charger configuration applied by `init()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bq25890Config {
    /// Input current limit in mA
    pub input_current_limit_ma: u16,
    /// Keep the full charge voltage in the JEITA warm range
    pub jeita_full_voltage: bool,
    /// Disconnect the battery (ship mode)
    pub batfet_disable: bool,
    /// Run the ADC continuously
    pub adc_continuous: bool,
    /// Read every written register back and compare
    pub check_with_read: bool,
}

impl Default for Bq25890Config {
    fn default() -> Self {
        Self {
            input_current_limit_ma: 500,
            jeita_full_voltage: false,
            batfet_disable: false,
            adc_continuous: true,
            check_with_read: true,
        }
    }
}

/// BQ25890 driver
pub struct Bq25890<I> {
    interface: I,
    registers: Bq25890Registers,
    check_with_read: bool,
    state: DriverState,
}

impl<I> Bq25890<I>
where
    I: RegisterInterface<AddressType = u16> + Probe,
{
    /// Create a new driver
    pub fn new(interface: I) -> Self {
        Self {
            interface,
            registers: Bq25890Registers::new(),
            check_with_read: true,
            state: DriverState::Constructed,
        }
    }

    /// Read the control registers from the charger, apply `config` and write
    /// them back
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] when called twice,
    /// [`Error::OutOfRange`] or [`Error::NotQuantized`] for an invalid current
    /// limit (before any bus traffic), or a bus or verification error.
    pub fn init(&mut self, config: &Bq25890Config) -> Result<(), Error<I::Error>> {
        self.state.ensure_constructed()?;
        let iinlim = encode_input_current(config.input_current_limit_ma)?;

        self.interface.probe()?;
        for reg in [Reg::Reg00, Reg::Reg02, Reg::Reg09] {
            interface::read(&mut self.interface, self.registers.get_mut(reg))?;
        }

        self.registers.set_field(Reg::Reg00, IINLIM, iinlim);
        self.registers.set_flag(Reg::Reg02, CONV_START, false);
        self.registers.set_flag(Reg::Reg02, CONV_RATE, config.adc_continuous);
        self.registers.set_flag(Reg::Reg09, JEITA_VSET, config.jeita_full_voltage);
        self.registers.set_flag(Reg::Reg09, BATFET_DIS, config.batfet_disable);
        self.check_with_read = config.check_with_read;

        for reg in [Reg::Reg00, Reg::Reg02, Reg::Reg09] {
            self.write(reg)?;
        }

        self.state = DriverState::Initialized;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "BQ25890 initialized, input limit {=u16} mA",
            config.input_current_limit_ma
        );
        Ok(())
    }

    /// Stop continuous ADC conversion
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn deinit(&mut self) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;

        self.registers.set_flag(Reg::Reg02, CONV_RATE, false);
        self.write(Reg::Reg02)?;

        self.registers.clear();
        self.state = DriverState::Constructed;
        Ok(())
    }

    /// Set the input current limit in mA
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] outside 100 mA .. 3250 mA,
    /// [`Error::NotQuantized`] off the 50 mA grid, or a bus error.
    pub fn set_input_current_limit_ma(&mut self, milliamps: u16) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        let code = encode_input_current(milliamps)?;
        self.registers.set_field(Reg::Reg00, IINLIM, code);
        self.write(Reg::Reg00)
    }

    /// Enter or leave ship mode by turning the BATFET off or on
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn set_ship_mode(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        self.registers.set_flag(Reg::Reg09, BATFET_DIS, enable);
        self.write(Reg::Reg09)
    }

    /// Start a single ADC conversion
    ///
    /// The start bit clears itself when the conversion completes, so this
    /// write is never verified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn start_adc_conversion(&mut self) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        self.registers.set_flag(Reg::Reg02, CONV_START, true);
        let result = interface::write(&mut self.interface, self.registers.get(Reg::Reg02), false);
        self.registers.set_flag(Reg::Reg02, CONV_START, false);
        result
    }

    /// Battery voltage in mV
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn battery_voltage_mv(&mut self) -> Result<u16, Error<I::Error>> {
        let code = self.read_field(Reg::Reg0E, VOLTAGE)?;
        Ok(to_millis(BATTERY_VOLTAGE_SCALE.decode(i32::from(code))))
    }

    /// System voltage in mV
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn system_voltage_mv(&mut self) -> Result<u16, Error<I::Error>> {
        let code = self.read_field(Reg::Reg0F, VOLTAGE)?;
        Ok(to_millis(BATTERY_VOLTAGE_SCALE.decode(i32::from(code))))
    }

    /// VBUS voltage in mV
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn vbus_voltage_mv(&mut self) -> Result<u16, Error<I::Error>> {
        let code = self.read_field(Reg::Reg11, VBUSV)?;
        Ok(to_millis(VBUS_VOLTAGE_SCALE.decode(i32::from(code))))
    }

    /// Returns `true` when an input source is attached to VBUS
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn is_vbus_good(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.read_field(Reg::Reg11, VBUS_GD)? != 0)
    }

    /// Charge current in mA
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn charge_current_ma(&mut self) -> Result<u16, Error<I::Error>> {
        let code = self.read_field(Reg::Reg12, ICHGR)?;
        Ok(to_millis(CHARGE_CURRENT_SCALE.decode(i32::from(code))))
    }

    /// Register image
    pub const fn registers(&self) -> &Bq25890Registers {
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

    fn read_field(&mut self, reg: Reg, field: Field) -> Result<u8, Error<I::Error>> {
        self.state.ensure_initialized()?;
        interface::read(&mut self.interface, self.registers.get_mut(reg))?;
        Ok(self.registers.field(reg, field))
    }

    // CONV_START reads back high while a conversion runs, so REG02 never verifies
    fn write(&mut self, reg: Reg) -> Result<(), Error<I::Error>> {
        interface::write(
            &mut self.interface,
            self.registers.get(reg),
            self.check_with_read && reg != Reg::Reg02,
        )
    }
}

fn encode_input_current<E>(milliamps: u16) -> Result<u8, Error<E>> {
    INPUT_CURRENT_SCALE
        .encode(f32::from(milliamps))
        .and_then(field_value)
        .map_err(ConversionError::into_error)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_millis(value: f32) -> u16 {
    libm::roundf(value) as u16
}
