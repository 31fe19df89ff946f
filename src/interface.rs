//! Bus transaction adapter
//!
//! Drivers talk to their chip through the `device-driver`
//! [`RegisterInterface`] trait with 16-bit register addresses, plus the
//! [`Probe`] presence check defined here. [`I2cInterface`] implements both for
//! any `embedded-hal` I2C bus; chips with 8-bit register addresses select
//! [`AddressWidth::Bits8`] and only the low address byte goes on the wire.
//!
//! The free functions [`write`], [`read`] and [`write_all`] move
//! [`RegisterDescriptor`] payloads over such an interface.

use crate::Error;
use crate::register::{Access, MAX_REGISTER_LEN, RegisterDescriptor, RegisterMap, RegisterTable};
use device_driver::RegisterInterface;

/// Default number of attempts for every bus transaction
pub const DEFAULT_TRIES: u8 = 3;

/// Largest payload a single write transaction carries
///
/// Every register descriptor fits; longer payloads trip a debug assertion.
pub const MAX_WRITE_LEN: usize = 32;

/// Device presence check
pub trait Probe: RegisterInterface {
    /// Check that the device acknowledges its bus address
    ///
    /// # Errors
    ///
    /// Returns the bus error when the device does not respond.
    fn probe(&mut self) -> Result<(), Self::Error>;
}

/// Width of the register address sent before the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressWidth {
    /// One address byte
    Bits8,
    /// Two address bytes, most significant first
    Bits16,
}

/// I2C register interface
///
/// The bus may be owned or borrowed: `embedded-hal` implements `I2c` for
/// `&mut T`, so `I2cInterface::new(&mut i2c, ..)` works and leaves the bus
/// with the caller once the driver is dropped.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
    width: AddressWidth,
    tries: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - 7-bit device address
    /// * `width` - Register address width of the chip
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::new(i2c, 0x38, AddressWidth::Bits16);
    /// let mut codec = Adau1961::new(interface, NoAudioInterface, Adau1961Config::default());
    /// ```
    pub const fn new(i2c: I2C, address: u8, width: AddressWidth) -> Self {
        Self {
            i2c,
            address,
            width,
            tries: DEFAULT_TRIES,
        }
    }

    /// Set the number of attempts per transaction (at least one)
    #[must_use]
    pub const fn with_tries(mut self, tries: u8) -> Self {
        self.tries = if tries == 0 { 1 } else { tries };
        self
    }

    /// 7-bit device address
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn encode_address(&self, address: u16, buffer: &mut [u8]) -> usize {
        let [hi, lo] = address.to_be_bytes();
        match self.width {
            AddressWidth::Bits8 => {
                buffer[0] = lo;
                1
            }
            AddressWidth::Bits16 => {
                buffer[0] = hi;
                buffer[1] = lo;
                2
            }
        }
    }
}

fn with_retries<E>(tries: u8, mut op: impl FnMut() -> Result<(), E>) -> Result<(), E> {
    let mut result = op();
    for _ in 1..tries {
        if result.is_ok() {
            break;
        }
        result = op();
    }
    result
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u16;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        let mut prefix = [0u8; 2];
        let prefix_len = self.encode_address(address, &mut prefix);
        let device = self.address;
        let i2c = &mut self.i2c;

        with_retries(self.tries, || {
            i2c.write_read(device, &prefix[..prefix_len], &mut *read_data)
        })
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        debug_assert!(
            write_data.len() <= MAX_WRITE_LEN,
            "register payload longer than {} bytes",
            MAX_WRITE_LEN
        );
        // Address bytes followed by the payload
        let mut buffer = [0u8; 2 + MAX_WRITE_LEN];
        let prefix_len = self.encode_address(address, &mut buffer);
        let len = write_data.len().min(MAX_WRITE_LEN);
        buffer[prefix_len..prefix_len + len].copy_from_slice(&write_data[..len]);
        let device = self.address;
        let i2c = &mut self.i2c;

        with_retries(self.tries, || i2c.write(device, &buffer[..prefix_len + len]))
    }
}

impl<I2C, E> Probe for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    fn probe(&mut self) -> Result<(), Self::Error> {
        let device = self.address;
        let i2c = &mut self.i2c;

        // Zero-length write: address phase only
        with_retries(self.tries, || i2c.write(device, &[]))
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn size_bits(descriptor: &RegisterDescriptor) -> u32 {
    (descriptor.len() * 8) as u32
}

/// Write the cached payload of one register
///
/// One "write at register address" transaction of `descriptor.len()` bytes.
/// With `verify` set, the payload is read back and compared; the descriptor is
/// never modified.
///
/// # Errors
///
/// Returns [`Error::Bus`] if a transaction fails and [`Error::VerifyMismatch`]
/// if the readback differs.
pub fn write<I>(
    interface: &mut I,
    descriptor: &RegisterDescriptor,
    verify: bool,
) -> Result<(), Error<I::Error>>
where
    I: RegisterInterface<AddressType = u16>,
{
    #[cfg(feature = "defmt")]
    defmt::trace!(
        "write {=str} @ {=u16:#06x}: {=[u8]:#04x}",
        descriptor.name(),
        descriptor.address(),
        descriptor.bytes()
    );

    interface.write_register(
        descriptor.address(),
        size_bits(descriptor),
        descriptor.bytes(),
    )?;

    if verify {
        let mut readback = [0u8; MAX_REGISTER_LEN];
        let readback = &mut readback[..descriptor.len()];
        interface.read_register(descriptor.address(), size_bits(descriptor), readback)?;

        if *readback != *descriptor.bytes() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "readback mismatch on {=str}: wrote {=[u8]:#04x}, read {=[u8]:#04x}",
                descriptor.name(),
                descriptor.bytes(),
                readback
            );
            return Err(Error::VerifyMismatch {
                address: descriptor.address(),
            });
        }
    }

    Ok(())
}

/// Read one register from the device into the descriptor
///
/// # Errors
///
/// Returns [`Error::Bus`] if the transaction fails; the cached payload is then
/// left unchanged.
pub fn read<I>(interface: &mut I, descriptor: &mut RegisterDescriptor) -> Result<(), Error<I::Error>>
where
    I: RegisterInterface<AddressType = u16>,
{
    let mut buffer = [0u8; MAX_REGISTER_LEN];
    let len = descriptor.len();
    interface.read_register(descriptor.address(), size_bits(descriptor), &mut buffer[..len])?;
    descriptor.bytes_mut().copy_from_slice(&buffer[..len]);

    #[cfg(feature = "defmt")]
    defmt::trace!(
        "read {=str} @ {=u16:#06x}: {=[u8]:#04x}",
        descriptor.name(),
        descriptor.address(),
        descriptor.bytes()
    );

    Ok(())
}

/// Write every register of a table in table order
///
/// Read-only registers and registers listed in `exclude` are skipped. Stops
/// at the first failure; registers already written keep their new values.
///
/// # Errors
///
/// Returns the first error from [`write`].
pub fn write_all<I, R, const N: usize>(
    interface: &mut I,
    table: &RegisterTable<R, N>,
    exclude: &[R],
    verify: bool,
) -> Result<(), Error<I::Error>>
where
    I: RegisterInterface<AddressType = u16>,
    R: RegisterMap,
{
    for (reg, descriptor) in table.iter() {
        if descriptor.access() == Access::ReadOnly || exclude.contains(&reg) {
            continue;
        }
        write(interface, descriptor, verify)?;
    }
    Ok(())
}
