//! Register map completeness tests
//!
//! Every table must list each register once, with the datasheet address and
//! payload length, and no two registers may share bus addresses.

use chip_drivers::register::{Access, RegisterMap, RegisterTable};
use chip_drivers::{adau1961, bq25890, tmp1075, veml6040};

/// Assert that no two registers overlap on the bus
///
/// With `byte_addressed` set, a multi-byte register occupies `len`
/// consecutive addresses (auto-increment chips); otherwise each register is a
/// single pointer value.
fn assert_no_aliasing<R: RegisterMap, const N: usize>(byte_addressed: bool) {
    let table = RegisterTable::<R, N>::new();
    let spans: Vec<(u16, u16)> = table
        .iter()
        .map(|(_, d)| {
            let end = if byte_addressed {
                d.address() + d.len() as u16
            } else {
                d.address() + 1
            };
            (d.address(), end)
        })
        .collect();

    for (i, a) in spans.iter().enumerate() {
        for b in spans.iter().skip(i + 1) {
            assert!(
                a.1 <= b.0 || b.1 <= a.0,
                "registers at {:#06x} and {:#06x} overlap",
                a.0,
                b.0
            );
        }
    }
}

fn assert_indices_match<R: RegisterMap + std::fmt::Debug>() {
    for (i, reg) in R::ALL.iter().enumerate() {
        assert_eq!(reg.index(), i, "{:?} is out of table order", reg);
    }
}

#[test]
fn test_adau1961_addresses_and_lengths() {
    use adau1961::Reg;

    let table = adau1961::Adau1961Registers::new();
    assert_eq!(Reg::ALL.len(), adau1961::registers::REGISTER_COUNT);

    let expected: &[(Reg, u16, usize)] = &[
        (Reg::R0ClockControl, 0x4000, 1),
        (Reg::R1PllControl, 0x4002, 6),
        (Reg::R2DigMicJackDetect, 0x4008, 1),
        (Reg::R4RecMixerLeft0, 0x400A, 1),
        (Reg::R8LeftDiffInputVol, 0x400E, 1),
        (Reg::R19AdcControl, 0x4019, 1),
        (Reg::R29PlayHpLeftVol, 0x4023, 1),
        (Reg::R31LineOutputLeftVol, 0x4025, 1),
        (Reg::R39SerialPortPad, 0x402D, 1),
        (Reg::R40ControlPortPad0, 0x402F, 1),
        (Reg::R42JackDetectPin, 0x4031, 1),
        (Reg::R67DejitterControl, 0x4036, 1),
    ];
    for &(reg, address, len) in expected {
        let d = table.get(reg);
        assert_eq!(d.address(), address, "{}", d.name());
        assert_eq!(d.len(), len, "{}", d.name());
    }

    // R4..R39 are contiguous
    let r4 = Reg::R4RecMixerLeft0.index();
    let r39 = Reg::R39SerialPortPad.index();
    for pair in Reg::ALL[r4..=r39].windows(2) {
        assert_eq!(pair[1].address(), pair[0].address() + 1);
    }

    // Reserved R3 (0x4009) is not mapped
    assert!(table.iter().all(|(_, d)| d.address() != 0x4009));
}

#[test]
fn test_adau1961_no_aliasing() {
    assert_indices_match::<adau1961::Reg>();
    assert_no_aliasing::<adau1961::Reg, { adau1961::registers::REGISTER_COUNT }>(true);
}

#[test]
fn test_tmp1075_map() {
    use tmp1075::Reg;

    let table = tmp1075::Tmp1075Registers::new();
    assert_eq!(table.get(Reg::Temp).address(), 0x00);
    assert_eq!(table.get(Reg::Config).address(), 0x01);
    assert_eq!(table.get(Reg::LowLimit).address(), 0x02);
    assert_eq!(table.get(Reg::HighLimit).address(), 0x03);
    assert_eq!(table.get(Reg::DeviceId).address(), 0x0F);
    assert!(table.iter().all(|(_, d)| d.len() == 2));
    assert_eq!(table.get(Reg::Temp).access(), Access::ReadOnly);
    assert_eq!(table.get(Reg::DeviceId).access(), Access::ReadOnly);

    assert_indices_match::<Reg>();
    assert_no_aliasing::<Reg, { tmp1075::registers::REGISTER_COUNT }>(false);
}

#[test]
fn test_bq25890_map() {
    use bq25890::Reg;

    let table = bq25890::Bq25890Registers::new();
    let writable: Vec<u16> = table
        .iter()
        .filter(|(_, d)| d.access() == Access::ReadWrite)
        .map(|(_, d)| d.address())
        .collect();
    assert_eq!(writable, vec![0x00, 0x02, 0x09]);
    assert_eq!(table.get(Reg::Reg12).address(), 0x12);

    assert_indices_match::<Reg>();
    assert_no_aliasing::<Reg, { bq25890::registers::REGISTER_COUNT }>(true);
}

#[test]
fn test_veml6040_map() {
    use veml6040::Reg;

    let table = veml6040::Veml6040Registers::new();
    let addresses: Vec<u16> = table.iter().map(|(_, d)| d.address()).collect();
    assert_eq!(addresses, vec![0x00, 0x08, 0x09, 0x0A, 0x0B]);
    assert!(table.iter().all(|(_, d)| d.len() == 2));

    assert_indices_match::<Reg>();
    assert_no_aliasing::<Reg, { veml6040::registers::REGISTER_COUNT }>(false);
}

#[test]
fn test_tables_start_zeroed() {
    let table = adau1961::Adau1961Registers::new();
    assert!(table.iter().all(|(_, d)| d.raw() == 0));
}
