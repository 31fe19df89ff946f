//! Integration tests for the sensors sharing one bus

use crate::common::{MockInterface, Operation, assert_float_eq};
use chip_drivers::bq25890::{Bq25890, Bq25890Config};
use chip_drivers::tmp1075::{Tmp1075, Tmp1075Config};
use chip_drivers::veml6040::{IntegrationTime, Veml6040, Veml6040Config};
use chip_drivers::{AddressWidth, DriverState, I2cInterface};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

#[test]
fn test_thermal_monitoring_workflow() {
    let interface = MockInterface::new();
    interface.set_register(0x0F, &[0x75, 0x00]);
    let mut sensor = Tmp1075::new(interface.clone());
    let config = Tmp1075Config {
        low_limit_celsius: 40.0,
        high_limit_celsius: 45.5,
        check_with_read: true,
        ..Tmp1075Config::default()
    };

    sensor.init(&config).unwrap();

    // Room temperature, then warming up past the high limit
    interface.set_register(0x00, &[0x17, 0x40]);
    assert_float_eq(sensor.temperature_celsius().unwrap(), 23.25, 1e-6);
    interface.set_register(0x00, &[0x2E, 0x80]);
    let hot = sensor.temperature_celsius().unwrap();
    assert!(hot > config.high_limit_celsius);

    // Save power between measurements
    sensor.set_shutdown(true).unwrap();
    sensor.trigger_one_shot().unwrap();
    sensor.deinit().unwrap();
    assert_eq!(sensor.state(), DriverState::Constructed);
}

#[test]
fn test_power_monitoring_workflow() {
    let interface = MockInterface::new();
    interface.set_register(0x00, &[0b0100_1000]);
    interface.set_register(0x02, &[0b0011_0001]);
    interface.set_register(0x09, &[0b0100_0100]);
    let mut charger = Bq25890::new(interface.clone());

    charger.init(&Bq25890Config::default()).unwrap();
    charger.start_adc_conversion().unwrap();

    interface.set_register(0x0E, &[60]);
    interface.set_register(0x11, &[0x80 | 24]);
    interface.set_register(0x12, &[10]);

    assert_eq!(charger.battery_voltage_mv().unwrap(), 3504);
    assert!(charger.is_vbus_good().unwrap());
    assert_eq!(charger.vbus_voltage_mv().unwrap(), 5000);
    assert_eq!(charger.charge_current_ma().unwrap(), 500);

    charger.set_input_current_limit_ma(2000).unwrap();
    charger.deinit().unwrap();

    let writes = interface.written_addresses();
    assert_eq!(writes.first(), Some(&0x00));
    assert_eq!(writes.last(), Some(&0x02));
}

#[test]
fn test_light_sensor_workflow() {
    let interface = MockInterface::new();
    let mut sensor = Veml6040::new(interface.clone());

    sensor.init(&Veml6040Config::default()).unwrap();
    interface.set_register(0x09, &[0xE8, 0x03]);
    assert_float_eq(sensor.ambient_lux().unwrap(), 251.68, 0.01);

    sensor
        .set_integration_time(IntegrationTime::Ms320)
        .unwrap();
    assert_float_eq(sensor.ambient_lux().unwrap(), 31.46, 0.01);

    sensor.deinit().unwrap();
    let reads = interface
        .operations()
        .iter()
        .filter(|op| matches!(op, Operation::ReadRegister { address: 0x09, .. }))
        .count();
    assert_eq!(reads, 2);
}

#[test]
fn test_sensor_over_i2c() {
    let expectations = [
        // init: probe, id check, config and both limits
        I2cTransaction::write(0x48, vec![]),
        I2cTransaction::write_read(0x48, vec![0x0F], vec![0x75, 0x00]),
        I2cTransaction::write(0x48, vec![0x01, 0x00, 0xFF]),
        I2cTransaction::write(0x48, vec![0x02, 0x4B, 0x00]),
        I2cTransaction::write(0x48, vec![0x03, 0x50, 0x00]),
        // temperature
        I2cTransaction::write_read(0x48, vec![0x00], vec![0x19, 0x00]),
    ];
    let i2c = I2cMock::new(&expectations);
    let interface = I2cInterface::new(i2c, 0x48, AddressWidth::Bits8);
    let mut sensor = Tmp1075::new(interface);

    sensor.init(&Tmp1075Config::default()).unwrap();
    assert_float_eq(sensor.temperature_celsius().unwrap(), 25.0, 1e-6);

    sensor.release().release().done();
}
