//! Unit converter tests: round-trip law and boundary behaviour

use chip_drivers::adau1961::{AUX_INPUT_SCALE, DIFF_INPUT_SCALE, OUTPUT_SCALE};
use chip_drivers::bq25890::INPUT_CURRENT_SCALE;
use chip_drivers::tmp1075::LIMIT_SCALE;
use chip_drivers::units::{BoostedCode, ConversionError, LinearScale};
use proptest::prelude::*;

fn grid_value(scale: &LinearScale, k: i32) -> f32 {
    scale.offset + k as f32 * scale.step
}

proptest! {
    #[test]
    fn diff_input_round_trips(k in 0i32..=90) {
        // -12 dB .. 55.5 dB in 0.75 dB steps
        let gain = -12.0 + k as f32 * 0.75;
        let code = DIFF_INPUT_SCALE.encode(gain).unwrap();
        prop_assert_eq!(DIFF_INPUT_SCALE.decode(code), gain);
        prop_assert_eq!(code.boost, gain > 35.25);
        prop_assert!((0..=63).contains(&code.code));
    }

    #[test]
    fn aux_input_round_trips(k in 0i32..=6) {
        let gain = grid_value(&AUX_INPUT_SCALE, k);
        let code = AUX_INPUT_SCALE.encode(gain).unwrap();
        prop_assert_eq!(code, k);
        prop_assert_eq!(AUX_INPUT_SCALE.decode(code), gain);
    }

    #[test]
    fn output_round_trips(k in 0i32..=63) {
        let gain = grid_value(&OUTPUT_SCALE, k);
        prop_assert_eq!(OUTPUT_SCALE.decode(OUTPUT_SCALE.encode(gain).unwrap()), gain);
    }

    #[test]
    fn temperature_limit_round_trips(k in -2048i32..=2047) {
        let celsius = grid_value(&LIMIT_SCALE, k);
        prop_assert_eq!(LIMIT_SCALE.encode(celsius).unwrap(), k);
        prop_assert_eq!(LIMIT_SCALE.decode(k), celsius);
    }

    #[test]
    fn input_current_round_trips(k in 0i32..=63) {
        let milliamps = grid_value(&INPUT_CURRENT_SCALE, k);
        prop_assert_eq!(INPUT_CURRENT_SCALE.encode(milliamps).unwrap(), k);
    }

    #[test]
    fn off_grid_values_are_rejected(k in 0i32..63, frac in 0.1f32..0.9) {
        let gain = grid_value(&OUTPUT_SCALE, k) + frac;
        prop_assert_eq!(OUTPUT_SCALE.encode(gain), Err(ConversionError::NotQuantized));
    }
}

#[test]
fn test_boost_boundary() {
    // Threshold itself stays on the PGA
    assert_eq!(
        DIFF_INPUT_SCALE.encode(35.25),
        Ok(BoostedCode {
            boost: false,
            code: 63
        })
    );
    // One step below and above the threshold
    assert_eq!(
        DIFF_INPUT_SCALE.encode(34.5),
        Ok(BoostedCode {
            boost: false,
            code: 62
        })
    );
    assert_eq!(
        DIFF_INPUT_SCALE.encode(36.0),
        Ok(BoostedCode {
            boost: true,
            code: 37
        })
    );
}

#[test]
fn test_range_limits() {
    assert!(DIFF_INPUT_SCALE.encode(-12.0).is_ok());
    assert!(DIFF_INPUT_SCALE.encode(55.5).is_ok());
    assert_eq!(DIFF_INPUT_SCALE.encode(-12.75), Err(ConversionError::OutOfRange));
    assert_eq!(DIFF_INPUT_SCALE.encode(56.25), Err(ConversionError::OutOfRange));

    assert_eq!(AUX_INPUT_SCALE.encode(9.0), Err(ConversionError::OutOfRange));
    assert_eq!(OUTPUT_SCALE.encode(-58.0), Err(ConversionError::OutOfRange));
    assert_eq!(INPUT_CURRENT_SCALE.encode(50.0), Err(ConversionError::OutOfRange));
    assert_eq!(INPUT_CURRENT_SCALE.encode(3300.0), Err(ConversionError::OutOfRange));
}

#[test]
fn test_no_silent_rounding() {
    assert_eq!(DIFF_INPUT_SCALE.encode(35.5), Err(ConversionError::NotQuantized));
    assert_eq!(AUX_INPUT_SCALE.encode(-10.0), Err(ConversionError::NotQuantized));
    assert_eq!(INPUT_CURRENT_SCALE.encode(525.0), Err(ConversionError::NotQuantized));
}
