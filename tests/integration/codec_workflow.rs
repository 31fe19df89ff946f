//! Integration tests for the audio path: codec plus amplifier supervisor

use crate::common::{MockDelay, Operation, assert_float_eq, create_mock_codec};
use chip_drivers::adau1961::{Channel, ClockConfig, Reg};
use chip_drivers::{DriverState, Gain, MUTE_GAIN_DB, Override};

#[test]
fn test_complete_codec_lifecycle() {
    let (mut codec, interface, audio) = create_mock_codec();
    let overrides = [
        // Left differential input into the record mixer, ADC on
        Override::new(Reg::R4RecMixerLeft0, 0b0000_0001),
        Override::new(Reg::R8LeftDiffInputVol, 0b0000_0001),
        Override::new(Reg::R19AdcControl, 0b0001_0011),
    ];

    codec
        .init(&mut MockDelay::default(), &ClockConfig::default(), &overrides)
        .unwrap();
    codec.handle().unwrap();

    codec
        .set_in_diff_gain(Channel::Left, Gain::Db(20.25))
        .unwrap();
    codec
        .set_out_headphone_gain(Channel::Left, Gain::Db(-3.0))
        .unwrap();
    codec
        .set_out_headphone_gain(Channel::Right, Gain::Db(-3.0))
        .unwrap();

    // Enable bit from the override survives the gain change
    assert_eq!(interface.register(0x400E), vec![(43 << 2) | 0b11]);
    assert_eq!(codec.in_diff_gain(Channel::Left).unwrap(), Gain::Db(20.25));
    assert_eq!(
        codec.out_headphone_gain(Channel::Right).unwrap(),
        Gain::Db(-3.0)
    );

    // Mute everything via the sentinel used by callers
    codec
        .set_in_diff_gain(Channel::Left, Gain::from_db(MUTE_GAIN_DB))
        .unwrap();
    codec
        .set_out_headphone_gain(Channel::Left, Gain::from_db(MUTE_GAIN_DB))
        .unwrap();
    assert_float_eq(
        codec.in_diff_gain(Channel::Left).unwrap().to_db(),
        MUTE_GAIN_DB,
        1e-6,
    );

    codec.deinit().unwrap();
    assert_eq!(codec.state(), DriverState::Constructed);
    assert_eq!(interface.register(0x4000), vec![0x00]);

    let calls = audio.calls();
    assert_eq!((calls.init, calls.handle, calls.deinit), (1, 1, 1));
}

#[test]
fn test_register_image_matches_device_after_init() {
    let (mut codec, interface, _audio) = create_mock_codec();

    codec
        .init(&mut MockDelay::default(), &ClockConfig::default(), &[])
        .unwrap();

    for (reg, descriptor) in codec.registers().iter() {
        if reg == Reg::R1PllControl {
            continue;
        }
        assert_eq!(
            interface.register(descriptor.address()),
            descriptor.bytes().to_vec(),
            "{}",
            descriptor.name()
        );
    }
}

#[test]
fn test_gain_changes_touch_only_their_registers() {
    let (mut codec, interface, _audio) = create_mock_codec();
    codec
        .init(&mut MockDelay::default(), &ClockConfig::default(), &[])
        .unwrap();
    interface.clear_operations();

    codec
        .set_in_diff_gain(Channel::Right, Gain::Db(-12.0))
        .unwrap();
    codec.set_in_aux_gain(Channel::Right, Gain::Db(6.0)).unwrap();
    codec
        .set_out_line_gain(Channel::Right, Gain::Db(0.0))
        .unwrap();

    assert_eq!(
        interface.written_addresses(),
        vec![0x400D, 0x400F, 0x400D, 0x4026]
    );
    assert!(
        interface
            .operations()
            .iter()
            .all(|op| matches!(op, Operation::WriteRegister { .. }))
    );
    // Boost 0 dB plus aux code 7
    assert_eq!(interface.register(0x400D), vec![0b0000_1111]);
}

mod amplifier {
    use chip_drivers::tpa3255::{RecoveryState, Tpa3255, Tpa3255Config};
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn test_fault_reset_pulse() {
        let reset_expectations = [
            // init
            PinTransaction::set(PinState::High),
            // LowLevel, then Waiting
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let fault_expectations = [
            // handle(0): fault seen, then latched
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low),
            // handle(10): wait elapsed
            PinTransaction::get(PinState::Low),
            // handle(11): reset held low
            PinTransaction::get(PinState::High),
            // handle(12): released
            PinTransaction::get(PinState::High),
            // handle(13): settling
            PinTransaction::get(PinState::High),
        ];
        let clip_expectations = vec![PinTransaction::get(PinState::High); 5];
        let mut amp = Tpa3255::new(
            PinMock::new(&reset_expectations),
            PinMock::new(&fault_expectations),
            PinMock::new(&clip_expectations),
            Tpa3255Config {
                re_enable_wait_ms: 10,
            },
        );

        amp.init().unwrap();
        amp.handle(0).unwrap();
        amp.handle(10).unwrap();
        amp.handle(11).unwrap();
        amp.handle(12).unwrap();
        amp.handle(13).unwrap();

        assert_eq!(amp.recovery_state(), RecoveryState::Waiting);
        assert!(amp.was_fault_asserted());

        let (mut reset, mut fault, mut clip) = amp.release();
        reset.done();
        fault.done();
        clip.done();
    }
}
