//! Register image types
//!
//! A [`RegisterDescriptor`] holds the bus address, payload length and cached
//! payload bytes of one device register. A [`RegisterTable`] holds one
//! descriptor per register a driver manages, in the order the driver writes
//! them during initialization.
//!
//! Each chip describes its register set with a [`RegisterMap`] enum; the table
//! takes addresses and lengths from it at construction and they stay fixed
//! afterwards. Only the cached values change.

use core::marker::PhantomData;

/// Largest register payload handled by the register image, in bytes
pub const MAX_REGISTER_LEN: usize = 6;

/// Register access type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Register can be read and written
    ReadWrite,
    /// Register is read-only and never written by bulk writes
    ReadOnly,
}

/// Order of multi-byte payloads on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
}

/// Bit-field inside one payload byte
///
/// `byte` indexes the payload in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Payload byte holding the field (wire order)
    pub byte: u8,
    /// Position of the least significant bit of the field
    pub shift: u8,
    /// Field width in bits (1..=8)
    pub width: u8,
}

impl Field {
    /// Multi-bit field
    #[must_use]
    pub const fn new(byte: u8, shift: u8, width: u8) -> Self {
        Self { byte, shift, width }
    }

    /// Single-bit field
    #[must_use]
    pub const fn bit(byte: u8, shift: u8) -> Self {
        Self::new(byte, shift, 1)
    }

    /// Largest value the field can hold
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn max(self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    const fn mask(self) -> u8 {
        self.max() << self.shift
    }
}

/// Static description of a chip's register set
///
/// Implemented by a per-chip `enum` whose variants are the registers. The
/// order of [`RegisterMap::ALL`] is the bulk-write order.
pub trait RegisterMap: Copy + Eq + 'static {
    /// Every register, in table order
    const ALL: &'static [Self];
    /// Byte order of multi-byte payloads
    const BYTE_ORDER: ByteOrder;

    /// Position of the register in [`RegisterMap::ALL`]
    fn index(self) -> usize;
    /// Bus address of the register
    fn address(self) -> u16;
    /// Payload length in bytes
    fn size(self) -> usize;
    /// Human readable register name
    fn name(self) -> &'static str;
    /// Access type, read-write unless overridden
    fn access(self) -> Access {
        Access::ReadWrite
    }
}

/// Address, length and cached payload of one register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterDescriptor {
    name: &'static str,
    address: u16,
    len: u8,
    access: Access,
    byte_order: ByteOrder,
    value: [u8; MAX_REGISTER_LEN],
}

impl RegisterDescriptor {
    /// Create a zero-valued descriptor
    ///
    /// `len` is clamped to `1..=MAX_REGISTER_LEN`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(
        name: &'static str,
        address: u16,
        len: usize,
        access: Access,
        byte_order: ByteOrder,
    ) -> Self {
        let len = if len == 0 {
            1
        } else if len > MAX_REGISTER_LEN {
            MAX_REGISTER_LEN
        } else {
            len
        };
        Self {
            name,
            address,
            len: len as u8,
            access,
            byte_order,
            value: [0; MAX_REGISTER_LEN],
        }
    }

    fn from_map<R: RegisterMap>(reg: R) -> Self {
        Self::new(
            reg.name(),
            reg.address(),
            reg.size(),
            reg.access(),
            R::BYTE_ORDER,
        )
    }

    /// Register name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Bus address
    #[must_use]
    pub const fn address(&self) -> u16 {
        self.address
    }

    /// Payload length in bytes
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Access type
    #[must_use]
    pub const fn access(&self) -> Access {
        self.access
    }

    /// Payload bytes in wire order
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.value[..self.len()]
    }

    /// Mutable payload bytes in wire order
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.value[..len]
    }

    /// Payload as an integer, honouring the byte order
    #[must_use]
    pub fn raw(&self) -> u64 {
        let fold = |acc: u64, b: &u8| (acc << 8) | u64::from(*b);
        match self.byte_order {
            ByteOrder::Big => self.bytes().iter().fold(0, fold),
            ByteOrder::Little => self.bytes().iter().rev().fold(0, fold),
        }
    }

    /// Replace the payload with the low `len` bytes of `raw`
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_raw(&mut self, raw: u64) {
        let len = self.len();
        let order = self.byte_order;
        for (i, byte) in self.bytes_mut().iter_mut().enumerate() {
            let shift = match order {
                ByteOrder::Big => 8 * (len - 1 - i),
                ByteOrder::Little => 8 * i,
            };
            *byte = (raw >> shift) as u8;
        }
    }

    /// Low 16 bits of [`raw()`](Self::raw)
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn word(&self) -> u16 {
        self.raw() as u16
    }

    /// Read a bit-field
    #[must_use]
    pub fn field(&self, field: Field) -> u8 {
        self.bytes()
            .get(usize::from(field.byte))
            .map_or(0, |b| (b & field.mask()) >> field.shift)
    }

    /// Write a bit-field, excess high bits of `value` are dropped
    pub fn set_field(&mut self, field: Field, value: u8) {
        if let Some(b) = self.bytes_mut().get_mut(usize::from(field.byte)) {
            *b = (*b & !field.mask()) | ((value << field.shift) & field.mask());
        }
    }

    /// Read a single-bit field
    #[must_use]
    pub fn flag(&self, field: Field) -> bool {
        self.field(field) != 0
    }

    /// Write a single-bit field
    pub fn set_flag(&mut self, field: Field, on: bool) {
        self.set_field(field, u8::from(on));
    }
}

/// Caller supplied register value applied on top of the defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Override<R> {
    /// Register to override
    pub reg: R,
    /// Payload as an integer (see [`RegisterDescriptor::set_raw`])
    pub raw: u64,
}

impl<R> Override<R> {
    /// Create an override
    #[must_use]
    pub const fn new(reg: R, raw: u64) -> Self {
        Self { reg, raw }
    }
}

/// Ordered register image of one device
#[derive(Debug, Clone)]
pub struct RegisterTable<R, const N: usize> {
    registers: [RegisterDescriptor; N],
    _map: PhantomData<R>,
}

impl<R: RegisterMap, const N: usize> RegisterTable<R, N> {
    /// Build the table from the register map with every value zeroed
    #[must_use]
    pub fn new() -> Self {
        let registers = core::array::from_fn(|i| {
            R::ALL.get(i).map_or(
                RegisterDescriptor::new("", 0, 1, Access::ReadOnly, R::BYTE_ORDER),
                |&reg| RegisterDescriptor::from_map(reg),
            )
        });
        Self {
            registers,
            _map: PhantomData,
        }
    }

    /// Descriptor of a register
    #[must_use]
    pub fn get(&self, reg: R) -> &RegisterDescriptor {
        &self.registers[reg.index()]
    }

    /// Mutable descriptor of a register
    pub fn get_mut(&mut self, reg: R) -> &mut RegisterDescriptor {
        &mut self.registers[reg.index()]
    }

    /// Set the cached payload of a register
    pub fn set_raw(&mut self, reg: R, raw: u64) {
        self.get_mut(reg).set_raw(raw);
    }

    /// Cached payload of a register
    #[must_use]
    pub fn raw(&self, reg: R) -> u64 {
        self.get(reg).raw()
    }

    /// Read a bit-field of a register
    #[must_use]
    pub fn field(&self, reg: R, field: Field) -> u8 {
        self.get(reg).field(field)
    }

    /// Write a bit-field of a register
    pub fn set_field(&mut self, reg: R, field: Field, value: u8) {
        self.get_mut(reg).set_field(field, value);
    }

    /// Write a single-bit field of a register
    pub fn set_flag(&mut self, reg: R, field: Field, on: bool) {
        self.get_mut(reg).set_flag(field, on);
    }

    /// Apply a list of register values in order
    pub fn load(&mut self, values: &[Override<R>]) {
        for value in values {
            self.set_raw(value.reg, value.raw);
        }
    }

    /// Zero every cached value
    pub fn clear(&mut self) {
        for register in &mut self.registers {
            register.set_raw(0);
        }
    }

    /// Registers with their descriptors, in table order
    pub fn iter(&self) -> impl Iterator<Item = (R, &RegisterDescriptor)> {
        R::ALL.iter().copied().zip(self.registers.iter())
    }
}

impl<R: RegisterMap, const N: usize> Default for RegisterTable<R, N> {
    fn default() -> Self {
        Self::new()
    }
}
