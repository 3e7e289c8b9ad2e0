#![allow(non_upper_case_globals)]

use cast::{f32, i16, u16};
use num_derive::FromPrimitive;

/// I2C slave address, `SA0` pin low
pub const I2C_SAD: u8 = 0b001_1100;

/// Register mapping
#[allow(dead_code)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Data status
    STATUS = 0x00,
    /// X-axis sample, bits 11..4
    OUT_X_MSB = 0x01,
    /// X-axis sample, bits 3..0
    OUT_X_LSB = 0x02,
    /// Y-axis sample, bits 11..4
    OUT_Y_MSB = 0x03,
    /// Y-axis sample, bits 3..0
    OUT_Y_LSB = 0x04,
    /// Z-axis sample, bits 11..4
    OUT_Z_MSB = 0x05,
    /// Z-axis sample, bits 3..0
    OUT_Z_LSB = 0x06,
    /// System mode
    SYSMOD = 0x0B,
    /// Interrupt status
    INT_SOURCE = 0x0C,
    /// Device identification
    WHO_AM_I = 0x0D,
    /// High-pass output and full-scale range
    XYZ_DATA_CFG = 0x0E,
    /// High-pass filter cut-off
    HP_FILTER_CUTOFF = 0x0F,
    /// Portrait/landscape status
    PL_STATUS = 0x10,
    /// Portrait/landscape configuration
    PL_CFG = 0x11,
    /// Portrait/landscape debounce counter
    PL_COUNT = 0x12,
    /// Back/front and Z compensation
    PL_BF_ZCOMP = 0x13,
    /// Portrait/landscape threshold and hysteresis
    P_L_THS_REG = 0x14,
    /// Freefall/motion configuration
    FF_MT_CFG = 0x15,
    /// Freefall/motion source
    FF_MT_SRC = 0x16,
    /// Freefall/motion threshold
    FF_MT_THS = 0x17,
    /// Freefall/motion debounce counter
    FF_MT_COUNT = 0x18,
    /// Transient configuration
    TRANSIENT_CFG = 0x1D,
    /// Transient source
    TRANSIENT_SRC = 0x1E,
    /// Transient threshold
    TRANSIENT_THS = 0x1F,
    /// Transient debounce counter
    TRANSIENT_COUNT = 0x20,
    /// Pulse configuration
    PULSE_CFG = 0x21,
    /// Pulse source
    PULSE_SRC = 0x22,
    /// Pulse threshold, X axis
    PULSE_THSX = 0x23,
    /// Pulse threshold, Y axis
    PULSE_THSY = 0x24,
    /// Pulse threshold, Z axis
    PULSE_THSZ = 0x25,
    /// Pulse time window 1
    PULSE_TMLT = 0x26,
    /// Pulse latency
    PULSE_LTCY = 0x27,
    /// Pulse time window 2
    PULSE_WIND = 0x28,
    /// Auto-wake/sleep counter
    ASLP_COUNT = 0x29,
    /// System control 1
    CTRL_REG1 = 0x2A,
    /// System control 2
    CTRL_REG2 = 0x2B,
    /// Interrupt control
    CTRL_REG3 = 0x2C,
    /// Interrupt enable
    CTRL_REG4 = 0x2D,
    /// Interrupt pin routing
    CTRL_REG5 = 0x2E,
    /// X-axis offset
    OFF_X = 0x2F,
    /// Y-axis offset
    OFF_Y = 0x30,
    /// Z-axis offset
    OFF_Z = 0x31,
}

impl Register {
    /// Get register address
    pub fn addr(self) -> u8 {
        self as u8
    }
}

// === STATUS (00h) ===

pub const ZYXOW: u8 = 0b1000_0000;
pub const ZOW: u8 = 0b0100_0000;
pub const YOW: u8 = 0b0010_0000;
pub const XOW: u8 = 0b0001_0000;
pub const ZYXDR: u8 = 0b0000_1000;
pub const ZDR: u8 = 0b0000_0100;
pub const YDR: u8 = 0b0000_0010;
pub const XDR: u8 = 0b0000_0001;

// === SYSMOD (0Bh) ===

pub const SYSMOD_MASK: u8 = 0b0000_0011;

/// System mode
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SysMode {
    /// Standby mode
    Standby = 0b00,
    /// Wake mode
    Wake = 0b01,
    /// Sleep mode
    Sleep = 0b10,
}

// === INT_SOURCE (0Ch) ===

pub const SRC_ASLP: u8 = 0b1000_0000;
pub const SRC_TRANS: u8 = 0b0010_0000;
pub const SRC_LNDPRT: u8 = 0b0001_0000;
pub const SRC_PULSE: u8 = 0b0000_1000;
pub const SRC_FF_MT: u8 = 0b0000_0100;
pub const SRC_DRDY: u8 = 0b0000_0001;

// === WHO_AM_I (0Dh) ===

/// WHO_AM_I device identification register
pub const DEVICE_ID: u8 = 0x2A;

// === XYZ_DATA_CFG (0Eh) ===

pub const FS_MASK: u8 = 0b0000_0011;

/// No high-pass output, ±8 g
pub const XYZ_DATA_CFG_DEFAULT: u8 = 0x02;

/// Full-scale selection
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScale {
    /// ±2 g
    G2 = 0b00,
    /// ±4 g
    G4 = 0b01,
    /// ±8 g
    G8 = 0b10,
}

impl FullScale {
    /// g/digit for the given sample resolution
    pub fn scale(self, fast_read: bool) -> f32 {
        match (fast_read, self) {
            // 12-bit samples
            (false, Self::G2) => 0.001,
            (false, Self::G4) => 0.002,
            (false, Self::G8) => 0.0039,
            // 8-bit samples
            (true, Self::G2) => 0.0156,
            (true, Self::G4) => 0.03125,
            (true, Self::G8) => 0.0625,
        }
    }

    /// Convert a 12-bit two's-complement sample field to g
    pub fn decode(self, raw: u16, fast_read: bool) -> f32 {
        f32(sign_extend_12(raw)) * self.scale(fast_read)
    }
}

/// 12-bit two's-complement field to a signed count
pub(crate) fn sign_extend_12(raw: u16) -> i16 {
    ((raw << 4) as i16) >> 4
}

/// 12-bit field from a normal-mode `MSB`, `LSB` register pair
pub(crate) fn field_from_pair(msb: u8, lsb: u8) -> u16 {
    (u16(msb) << 4) | u16(lsb >> 4)
}

/// 12-bit field from a fast-read 8-bit sample
pub(crate) fn field_from_fast(msb: u8) -> u16 {
    (i16(msb as i8) as u16) & RAW_MASK
}

pub const RAW_MASK: u16 = 0x0FFF;

// === PL_STATUS (10h) ===

pub const NEWLM: u8 = 0b1000_0000;
pub const LO: u8 = 0b0100_0000;
pub const LAPO_MASK: u8 = 0b0000_0110;
pub const BAFRO: u8 = 0b0000_0001;

/// Portrait/landscape orientation
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lapo {
    /// Portrait up
    PortraitUp = 0b00,
    /// Portrait down
    PortraitDown = 0b01,
    /// Landscape right
    LandscapeRight = 0b10,
    /// Landscape left
    LandscapeLeft = 0b11,
}

/// Back/front orientation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bafro {
    /// Front facing
    Front,
    /// Back facing
    Back,
}

// === PL_CFG (11h) ===

/// Debounce counter clear mode, portrait/landscape detection enabled
pub const PL_CFG_DEFAULT: u8 = 0xC0;

// === PL_COUNT (12h) ===

pub const PL_COUNT_DEFAULT: u8 = 0x00;

// === ASLP_COUNT (29h) ===

pub const ASLP_COUNT_DEFAULT: u8 = 0x0F;

// === CTRL_REG1 (2Ah) ===

pub const DR_MASK: u8 = 0b0011_1000;
pub const F_READ: u8 = 0b0000_0010;

/// 1.56 Hz sleep rate, 100 Hz data rate, active
pub const CTRL_REG1_DEFAULT: u8 = 0xD9;

/// Output Data Rate
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Odr {
    /// 800 Hz
    Hz800 = 0b000,
    /// 400 Hz
    Hz400 = 0b001,
    /// 200 Hz
    Hz200 = 0b010,
    /// 100 Hz
    Hz100 = 0b011,
    /// 50 Hz
    Hz50 = 0b100,
    /// 12.5 Hz
    Hz12_5 = 0b101,
    /// 6.25 Hz
    Hz6_25 = 0b110,
    /// 1.56 Hz
    Hz1_56 = 0b111,
}

impl Odr {
    /// Data rate in Hz
    pub fn hz(self) -> f32 {
        match self {
            Self::Hz800 => 800.0,
            Self::Hz400 => 400.0,
            Self::Hz200 => 200.0,
            Self::Hz100 => 100.0,
            Self::Hz50 => 50.0,
            Self::Hz12_5 => 12.5,
            Self::Hz6_25 => 6.25,
            Self::Hz1_56 => 1.56,
        }
    }
}

// === CTRL_REG2 (2Bh) ===

pub const RST: u8 = 0b0100_0000;

/// Auto-sleep enabled
pub const CTRL_REG2_DEFAULT: u8 = 0x04;

// === CTRL_REG3 (2Ch) ===

/// Wake on orientation change, active-high interrupt
pub const CTRL_REG3_DEFAULT: u8 = 0x22;

// === CTRL_REG4 (2Dh) ===

/// Auto-sleep and data-ready interrupts enabled
pub const CTRL_REG4_DEFAULT: u8 = 0x81;

// === CTRL_REG5 (2Eh) ===

/// Orientation interrupt on INT1, the rest on INT2
pub const CTRL_REG5_DEFAULT: u8 = 0x10;
