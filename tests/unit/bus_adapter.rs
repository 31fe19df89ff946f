//! Tests for the register transfer functions

use crate::common::{MockError, MockInterface, Operation};
use chip_drivers::Error;
use chip_drivers::adau1961::{Adau1961Registers, Reg};
use chip_drivers::interface::{read, write, write_all};
use chip_drivers::register::RegisterMap;
use chip_drivers::tmp1075;

#[test]
fn test_write_sends_whole_payload_once() {
    let mut interface = MockInterface::new();
    let mut table = Adau1961Registers::new();
    table.set_raw(Reg::R1PllControl, 0x0001_0203_0405);

    write(&mut interface, table.get(Reg::R1PllControl), false).unwrap();

    assert_eq!(
        interface.operations(),
        vec![Operation::WriteRegister {
            address: 0x4002,
            data: vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05],
        }]
    );
}

#[test]
fn test_write_with_verify_reads_back() {
    let mut interface = MockInterface::new();
    let mut table = Adau1961Registers::new();
    table.set_raw(Reg::R19AdcControl, 0x13);

    write(&mut interface, table.get(Reg::R19AdcControl), true).unwrap();

    let ops = interface.operations();
    assert_eq!(ops.len(), 2);
    assert_eq!(
        ops[1],
        Operation::ReadRegister {
            address: 0x4019,
            data: vec![0x13],
        }
    );
}

#[test]
fn test_verify_mismatch() {
    let mut interface = MockInterface::new();
    interface.freeze_register(0x4019);
    let mut table = Adau1961Registers::new();
    table.set_raw(Reg::R19AdcControl, 0x13);

    let result = write(&mut interface, table.get(Reg::R19AdcControl), true);

    assert!(matches!(
        result,
        Err(Error::VerifyMismatch { address: 0x4019 })
    ));
    // Cached value is untouched by the readback
    assert_eq!(table.raw(Reg::R19AdcControl), 0x13);
}

#[test]
fn test_read_updates_descriptor() {
    let mut interface = MockInterface::new();
    interface.set_register(0x00, &[0x19, 0x00]);
    let mut table = tmp1075::Tmp1075Registers::new();

    read(&mut interface, table.get_mut(tmp1075::Reg::Temp)).unwrap();

    assert_eq!(table.get(tmp1075::Reg::Temp).bytes(), &[0x19, 0x00]);
}

#[test]
fn test_failed_read_leaves_cache() {
    let mut interface = MockInterface::new();
    let mut table = tmp1075::Tmp1075Registers::new();
    table.set_raw(tmp1075::Reg::Temp, 0x1234);
    interface.fail_next_read();

    let result = read(&mut interface, table.get_mut(tmp1075::Reg::Temp));

    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert_eq!(table.raw(tmp1075::Reg::Temp), 0x1234);
}

#[test]
fn test_write_all_order_and_exclusions() {
    let mut interface = MockInterface::new();
    let table = Adau1961Registers::new();

    write_all(
        &mut interface,
        &table,
        &[Reg::R0ClockControl, Reg::R1PllControl],
        false,
    )
    .unwrap();

    let expected: Vec<u16> = Reg::ALL[2..].iter().map(|r| r.address()).collect();
    assert_eq!(interface.written_addresses(), expected);
}

#[test]
fn test_write_all_skips_read_only() {
    let mut interface = MockInterface::new();
    let table = tmp1075::Tmp1075Registers::new();

    write_all(&mut interface, &table, &[], false).unwrap();

    assert_eq!(interface.written_addresses(), vec![0x01, 0x02, 0x03]);
}

#[test]
fn test_write_all_fails_fast() {
    let mut interface = MockInterface::new();
    let table = Adau1961Registers::new();
    interface.fail_on_write(5);

    let result = write_all(&mut interface, &table, &[], false);

    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert_eq!(interface.write_count(), 5);
    // The four writes before the failure were applied
    assert_eq!(interface.register(0x4000), vec![0]);
    assert!(interface.register(0x400B).is_empty());
}
