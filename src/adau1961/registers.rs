//! ADAU1961 register map
//!
//! Control registers live at 16-bit addresses `0x4000..=0x4036`. All of them
//! are one byte wide except the PLL control register, which is six bytes.
//! Register 3 is reserved and not part of the map.

use crate::register::{ByteOrder, Field, Override, RegisterMap, RegisterTable};

/// Number of registers in the map
pub const REGISTER_COUNT: usize = 43;

/// Register image of the codec
pub type Adau1961Registers = RegisterTable<Reg, REGISTER_COUNT>;

/// ADAU1961 control registers, in bulk-write order
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    R0ClockControl,
    R1PllControl,
    R2DigMicJackDetect,
    R4RecMixerLeft0,
    R5RecMixerLeft1,
    R6RecMixerRight0,
    R7RecMixerRight1,
    R8LeftDiffInputVol,
    R9RightDiffInputVol,
    R10RecordMicBias,
    R11Alc0,
    R12Alc1,
    R13Alc2,
    R14Alc3,
    R15SerialPort0,
    R16SerialPort1,
    R17Converter0,
    R18Converter1,
    R19AdcControl,
    R20LeftDigitalVol,
    R21RightDigitalVol,
    R22PlayMixerLeft0,
    R23PlayMixerLeft1,
    R24PlayMixerRight0,
    R25PlayMixerRight1,
    R26PlayLrMixerLeft,
    R27PlayLrMixerRight,
    R28PlayLrMixerMono,
    R29PlayHpLeftVol,
    R30PlayHpRightVol,
    R31LineOutputLeftVol,
    R32LineOutputRightVol,
    R33PlayMonoOutput,
    R34PopClickSuppress,
    R35PlayPowerMgmt,
    R36DacControl0,
    R37DacControl1,
    R38DacControl2,
    R39SerialPortPad,
    R40ControlPortPad0,
    R41ControlPortPad1,
    R42JackDetectPin,
    R67DejitterControl,
}

impl RegisterMap for Reg {
    const ALL: &'static [Self] = &[
        Self::R0ClockControl,
        Self::R1PllControl,
        Self::R2DigMicJackDetect,
        Self::R4RecMixerLeft0,
        Self::R5RecMixerLeft1,
        Self::R6RecMixerRight0,
        Self::R7RecMixerRight1,
        Self::R8LeftDiffInputVol,
        Self::R9RightDiffInputVol,
        Self::R10RecordMicBias,
        Self::R11Alc0,
        Self::R12Alc1,
        Self::R13Alc2,
        Self::R14Alc3,
        Self::R15SerialPort0,
        Self::R16SerialPort1,
        Self::R17Converter0,
        Self::R18Converter1,
        Self::R19AdcControl,
        Self::R20LeftDigitalVol,
        Self::R21RightDigitalVol,
        Self::R22PlayMixerLeft0,
        Self::R23PlayMixerLeft1,
        Self::R24PlayMixerRight0,
        Self::R25PlayMixerRight1,
        Self::R26PlayLrMixerLeft,
        Self::R27PlayLrMixerRight,
        Self::R28PlayLrMixerMono,
        Self::R29PlayHpLeftVol,
        Self::R30PlayHpRightVol,
        Self::R31LineOutputLeftVol,
        Self::R32LineOutputRightVol,
        Self::R33PlayMonoOutput,
        Self::R34PopClickSuppress,
        Self::R35PlayPowerMgmt,
        Self::R36DacControl0,
        Self::R37DacControl1,
        Self::R38DacControl2,
        Self::R39SerialPortPad,
        Self::R40ControlPortPad0,
        Self::R41ControlPortPad1,
        Self::R42JackDetectPin,
        Self::R67DejitterControl,
    ];
    const BYTE_ORDER: ByteOrder = ByteOrder::Big;

    fn index(self) -> usize {
        self as usize
    }

    fn address(self) -> u16 {
        match self {
            Self::R0ClockControl => 0x4000,
            Self::R1PllControl => 0x4002,
            Self::R2DigMicJackDetect => 0x4008,
            Self::R4RecMixerLeft0 => 0x400A,
            Self::R5RecMixerLeft1 => 0x400B,
            Self::R6RecMixerRight0 => 0x400C,
            Self::R7RecMixerRight1 => 0x400D,
            Self::R8LeftDiffInputVol => 0x400E,
            Self::R9RightDiffInputVol => 0x400F,
            Self::R10RecordMicBias => 0x4010,
            Self::R11Alc0 => 0x4011,
            Self::R12Alc1 => 0x4012,
            Self::R13Alc2 => 0x4013,
            Self::R14Alc3 => 0x4014,
            Self::R15SerialPort0 => 0x4015,
            Self::R16SerialPort1 => 0x4016,
            Self::R17Converter0 => 0x4017,
            Self::R18Converter1 => 0x4018,
            Self::R19AdcControl => 0x4019,
            Self::R20LeftDigitalVol => 0x401A,
            Self::R21RightDigitalVol => 0x401B,
            Self::R22PlayMixerLeft0 => 0x401C,
            Self::R23PlayMixerLeft1 => 0x401D,
            Self::R24PlayMixerRight0 => 0x401E,
            Self::R25PlayMixerRight1 => 0x401F,
            Self::R26PlayLrMixerLeft => 0x4020,
            Self::R27PlayLrMixerRight => 0x4021,
            Self::R28PlayLrMixerMono => 0x4022,
            Self::R29PlayHpLeftVol => 0x4023,
            Self::R30PlayHpRightVol => 0x4024,
            Self::R31LineOutputLeftVol => 0x4025,
            Self::R32LineOutputRightVol => 0x4026,
            Self::R33PlayMonoOutput => 0x4027,
            Self::R34PopClickSuppress => 0x4028,
            Self::R35PlayPowerMgmt => 0x4029,
            Self::R36DacControl0 => 0x402A,
            Self::R37DacControl1 => 0x402B,
            Self::R38DacControl2 => 0x402C,
            Self::R39SerialPortPad => 0x402D,
            Self::R40ControlPortPad0 => 0x402F,
            Self::R41ControlPortPad1 => 0x4030,
            Self::R42JackDetectPin => 0x4031,
            Self::R67DejitterControl => 0x4036,
        }
    }

    fn size(self) -> usize {
        match self {
            Self::R1PllControl => 6,
            _ => 1,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::R0ClockControl => "R0_CLOCK_CONTROL",
            Self::R1PllControl => "R1_PLL_CONTROL",
            Self::R2DigMicJackDetect => "R2_DIG_MIC_JACK_DETECT",
            Self::R4RecMixerLeft0 => "R4_REC_MIXER_LEFT_0",
            Self::R5RecMixerLeft1 => "R5_REC_MIXER_LEFT_1",
            Self::R6RecMixerRight0 => "R6_REC_MIXER_RIGHT_0",
            Self::R7RecMixerRight1 => "R7_REC_MIXER_RIGHT_1",
            Self::R8LeftDiffInputVol => "R8_LEFT_DIFF_INPUT_VOL",
            Self::R9RightDiffInputVol => "R9_RIGHT_DIFF_INPUT_VOL",
            Self::R10RecordMicBias => "R10_RECORD_MIC_BIAS",
            Self::R11Alc0 => "R11_ALC_0",
            Self::R12Alc1 => "R12_ALC_1",
            Self::R13Alc2 => "R13_ALC_2",
            Self::R14Alc3 => "R14_ALC_3",
            Self::R15SerialPort0 => "R15_SERIAL_PORT_0",
            Self::R16SerialPort1 => "R16_SERIAL_PORT_1",
            Self::R17Converter0 => "R17_CONVERTER_0",
            Self::R18Converter1 => "R18_CONVERTER_1",
            Self::R19AdcControl => "R19_ADC_CONTROL",
            Self::R20LeftDigitalVol => "R20_LEFT_DIGITAL_VOL",
            Self::R21RightDigitalVol => "R21_RIGHT_DIGITAL_VOL",
            Self::R22PlayMixerLeft0 => "R22_PLAY_MIXER_LEFT_0",
            Self::R23PlayMixerLeft1 => "R23_PLAY_MIXER_LEFT_1",
            Self::R24PlayMixerRight0 => "R24_PLAY_MIXER_RIGHT_0",
            Self::R25PlayMixerRight1 => "R25_PLAY_MIXER_RIGHT_1",
            Self::R26PlayLrMixerLeft => "R26_PLAY_LR_MIXER_LEFT",
            Self::R27PlayLrMixerRight => "R27_PLAY_LR_MIXER_RIGHT",
            Self::R28PlayLrMixerMono => "R28_PLAY_LR_MIXER_MONO",
            Self::R29PlayHpLeftVol => "R29_PLAY_HP_LEFT_VOL",
            Self::R30PlayHpRightVol => "R30_PLAY_HP_RIGHT_VOL",
            Self::R31LineOutputLeftVol => "R31_LINE_OUTPUT_LEFT_VOL",
            Self::R32LineOutputRightVol => "R32_LINE_OUTPUT_RIGHT_VOL",
            Self::R33PlayMonoOutput => "R33_PLAY_MONO_OUTPUT",
            Self::R34PopClickSuppress => "R34_POP_CLICK_SUPPRESS",
            Self::R35PlayPowerMgmt => "R35_PLAY_POWER_MGMT",
            Self::R36DacControl0 => "R36_DAC_CONTROL_0",
            Self::R37DacControl1 => "R37_DAC_CONTROL_1",
            Self::R38DacControl2 => "R38_DAC_CONTROL_2",
            Self::R39SerialPortPad => "R39_SERIAL_PORT_PAD",
            Self::R40ControlPortPad0 => "R40_CONTROL_PORT_PAD_0",
            Self::R41ControlPortPad1 => "R41_CONTROL_PORT_PAD_1",
            Self::R42JackDetectPin => "R42_JACK_DETECT_PIN",
            Self::R67DejitterControl => "R67_DEJITTER_CONTROL",
        }
    }
}

/// Power-on values of the registers written by the bulk write
///
/// Registers not listed reset to zero. The clock registers are not part of
/// this list; they come from [`ClockConfig`](super::ClockConfig).
pub const DEFAULTS: &[Override<Reg>] = &[
    Override::new(Reg::R19AdcControl, 0b0001_0000),
    Override::new(Reg::R29PlayHpLeftVol, 0b0000_0010),
    Override::new(Reg::R30PlayHpRightVol, 0b0000_0010),
    Override::new(Reg::R31LineOutputLeftVol, 0b0000_0010),
    Override::new(Reg::R32LineOutputRightVol, 0b0000_0010),
    Override::new(Reg::R33PlayMonoOutput, 0b0000_0010),
    Override::new(Reg::R39SerialPortPad, 0b1010_1010),
    Override::new(Reg::R40ControlPortPad0, 0b1010_1010),
    Override::new(Reg::R42JackDetectPin, 0b0000_1000),
    Override::new(Reg::R67DejitterControl, 0b0000_0011),
];

// R0 clock control
/// Core clock enable
pub const COREN: Field = Field::bit(0, 0);
/// Input clock frequency (multiple of the sample rate)
pub const INFREQ: Field = Field::new(0, 1, 2);
/// Clock source: 0 = MCLK pin, 1 = PLL
pub const CLKSRC: Field = Field::bit(0, 3);

// R1 PLL control, six bytes: M (2), N (2), R/X/type, lock/enable
/// Byte index of the first denominator byte
pub const PLL_DENOMINATOR_BYTE: usize = 0;
/// Byte index of the first numerator byte
pub const PLL_NUMERATOR_BYTE: usize = 2;
/// Fractional (1) or integer (0) PLL
pub const PLL_TYPE: Field = Field::bit(4, 0);
/// PLL input clock divider X
pub const PLL_X: Field = Field::new(4, 1, 2);
/// PLL integer part R
pub const PLL_R: Field = Field::new(4, 3, 4);
/// PLL enable
pub const PLL_EN: Field = Field::bit(5, 0);
/// PLL lock status (read-only)
pub const PLL_LOCK: Field = Field::bit(5, 1);

// R5/R7 record mixer 1
/// Aux (single-ended) input gain code, 0 = mute
pub const MIXER_AUX_GAIN: Field = Field::new(0, 0, 3);
/// Differential input boost
pub const MIXER_DIFF_BOOST: Field = Field::new(0, 3, 2);
/// [`MIXER_DIFF_BOOST`] value: mixer input muted
pub const BOOST_MUTE: u8 = 0b00;
/// [`MIXER_DIFF_BOOST`] value: 0 dB
pub const BOOST_0DB: u8 = 0b01;
/// [`MIXER_DIFF_BOOST`] value: 20 dB
pub const BOOST_20DB: u8 = 0b10;

// R8/R9 differential input volume
/// Differential input enable
pub const DIFF_ENABLE: Field = Field::bit(0, 0);
/// Differential input unmute (0 = muted)
pub const DIFF_UNMUTE: Field = Field::bit(0, 1);
/// Differential input volume code
pub const DIFF_VOLUME: Field = Field::new(0, 2, 6);

// R29/R30 headphone and R31/R32 line output volume share one layout
/// Output mode / enable bit
pub const OUT_MODE: Field = Field::bit(0, 0);
/// Output unmute (0 = muted)
pub const OUT_UNMUTE: Field = Field::bit(0, 1);
/// Output volume code
pub const OUT_VOLUME: Field = Field::new(0, 2, 6);
