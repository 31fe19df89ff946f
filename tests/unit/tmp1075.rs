//! TMP1075 temperature sensor driver tests

use crate::common::{MockInterface, Operation, assert_float_eq};
use chip_drivers::tmp1075::{
    AlertMode, AlertPolarity, ConversionRate, FaultCount, Reg, Tmp1075, Tmp1075Config,
};
use chip_drivers::{DriverState, Error};

const DEVICE_ID: [u8; 2] = [0x75, 0x00];

fn create_sensor() -> (Tmp1075<MockInterface>, MockInterface) {
    let interface = MockInterface::new();
    interface.set_register(0x0F, &DEVICE_ID);
    interface.freeze_register(0x0F);
    (Tmp1075::new(interface.clone()), interface)
}

fn create_initialized_sensor() -> (Tmp1075<MockInterface>, MockInterface) {
    let (mut sensor, interface) = create_sensor();
    sensor.init(&Tmp1075Config::default()).unwrap();
    interface.clear_operations();
    (sensor, interface)
}

#[test]
fn test_init_checks_id_then_writes() {
    let (mut sensor, interface) = create_sensor();

    sensor.init(&Tmp1075Config::default()).unwrap();

    let ops = interface.operations();
    assert_eq!(ops[0], Operation::Probe);
    assert_eq!(
        ops[1],
        Operation::ReadRegister {
            address: 0x0F,
            data: DEVICE_ID.to_vec(),
        }
    );
    assert_eq!(interface.written_addresses(), vec![0x01, 0x02, 0x03]);
    assert_eq!(interface.register(0x01), vec![0x00, 0xFF]);
    assert_eq!(interface.register(0x02), vec![0x4B, 0x00]);
    assert_eq!(interface.register(0x03), vec![0x50, 0x00]);
    assert_eq!(sensor.state(), DriverState::Initialized);
}

#[test]
fn test_init_applies_config() {
    let (mut sensor, interface) = create_sensor();
    let config = Tmp1075Config {
        conversion_rate: ConversionRate::Ms220,
        fault_count: FaultCount::Four,
        alert_polarity: AlertPolarity::ActiveHigh,
        alert_mode: AlertMode::Interrupt,
        low_limit_celsius: -10.5,
        high_limit_celsius: 100.0,
        check_with_read: true,
    };

    sensor.init(&config).unwrap();

    assert_eq!(interface.register(0x01), vec![0b0111_1110, 0xFF]);
    // -10.5 °C = -168 counts
    assert_eq!(interface.register(0x02), vec![0xF5, 0x80]);
    assert_eq!(interface.register(0x03), vec![0x64, 0x00]);
}

#[test]
fn test_wrong_device_id() {
    let interface = MockInterface::new();
    interface.set_register(0x0F, &[0x01, 0x90]);
    let mut sensor = Tmp1075::new(interface.clone());

    let result = sensor.init(&Tmp1075Config::default());

    assert!(matches!(result, Err(Error::InvalidDevice(0x0190))));
    assert_eq!(interface.write_count(), 0);
    assert_eq!(sensor.state(), DriverState::Constructed);
}

#[test]
fn test_invalid_limit_rejected_before_bus() {
    let (mut sensor, interface) = create_sensor();
    let config = Tmp1075Config {
        high_limit_celsius: 130.0,
        ..Tmp1075Config::default()
    };

    let result = sensor.init(&config);

    assert!(matches!(result, Err(Error::OutOfRange)));
    assert!(interface.operations().is_empty());
}

#[test]
fn test_read_temperature() {
    let (mut sensor, interface) = create_initialized_sensor();
    interface.set_register(0x00, &[0x19, 0x00]);

    let celsius = sensor.temperature_celsius().unwrap();

    assert_float_eq(celsius, 25.0, 1e-6);
    assert_eq!(sensor.registers().raw(Reg::Temp), 0x1900);
}

#[test]
fn test_read_negative_temperature() {
    let (mut sensor, interface) = create_initialized_sensor();
    interface.set_register(0x00, &[0xFF, 0x80]);

    assert_float_eq(sensor.temperature_celsius().unwrap(), -0.5, 1e-6);
}

#[test]
fn test_set_limits() {
    let (mut sensor, interface) = create_initialized_sensor();

    sensor.set_low_limit_celsius(20.0625).unwrap();
    sensor.set_high_limit_celsius(-40.0).unwrap();

    assert_eq!(interface.written_addresses(), vec![0x02, 0x03]);
    assert_eq!(interface.register(0x02), vec![0x14, 0x10]);
    assert_eq!(interface.register(0x03), vec![0xD8, 0x00]);

    assert!(matches!(
        sensor.set_low_limit_celsius(20.03),
        Err(Error::NotQuantized)
    ));
    assert_eq!(interface.write_count(), 2);
}

#[test]
fn test_one_shot_is_not_cached() {
    let (mut sensor, interface) = create_initialized_sensor();
    sensor.set_shutdown(true).unwrap();

    sensor.trigger_one_shot().unwrap();

    assert_eq!(
        interface.writes_to(0x01),
        vec![vec![0x01, 0xFF], vec![0x81, 0xFF]]
    );
    assert_eq!(sensor.registers().raw(Reg::Config), 0x01FF);
}

#[test]
fn test_deinit_enters_shutdown() {
    let (mut sensor, interface) = create_initialized_sensor();

    sensor.deinit().unwrap();

    assert_eq!(interface.register(0x01), vec![0x01, 0xFF]);
    assert_eq!(sensor.state(), DriverState::Constructed);
    assert!(matches!(
        sensor.temperature_celsius(),
        Err(Error::NotInitialized)
    ));
}
