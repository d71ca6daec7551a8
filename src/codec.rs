//! Bit-field encoding for the ADXL345 control registers.
//!
//! Every function here is pure: it maps a semantic setting to the bits it owns
//! inside a register, or folds a setting into an existing register value while
//! leaving unrelated bits alone.

// Bit positions within whole register values; field access through the
// generated register block uses the same layout.
const BW_RATE_RATE_MASK: u8 = 0b0000_1111;
const BW_RATE_LOW_POWER: u8 = 1 << 4;
const POWER_CTL_WAKEUP_MASK: u8 = 0b0000_0011;
const POWER_CTL_MEASURE: u8 = 1 << 3;
const POWER_CTL_AUTO_SLEEP: u8 = 1 << 4;
const DATA_FORMAT_RANGE_MASK: u8 = 0b0000_0011;
const DATA_FORMAT_FULL_RES: u8 = 1 << 3;
const DATA_FORMAT_SELF_TEST: u8 = 1 << 7;

/// A setting outside its enumerated domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct InvalidValue;

/// Measurement range, `DATA_FORMAT` bits 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum Range {
    /// ±2 g (power-on default)
    G2 = 0b00,
    /// ±4 g
    G4 = 0b01,
    /// ±8 g
    G8 = 0b10,
    /// ±16 g
    G16 = 0b11,
}

impl Range {
    /// Look up a range by its magnitude in g.
    ///
    /// # Errors
    /// [`InvalidValue`] for anything other than 2, 4, 8 or 16.
    pub const fn from_g(g: u8) -> Result<Self, InvalidValue> {
        match g {
            2 => Ok(Self::G2),
            4 => Ok(Self::G4),
            8 => Ok(Self::G8),
            16 => Ok(Self::G16),
            _ => Err(InvalidValue),
        }
    }

    /// Magnitude of the range in g.
    #[must_use]
    pub const fn g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Field bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Strict inverse of [`Range::bits`].
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::G2),
            0b01 => Some(Self::G4),
            0b10 => Some(Self::G8),
            0b11 => Some(Self::G16),
            _ => None,
        }
    }

    /// Decode the 2-bit range field; bits above the field are ignored.
    #[must_use]
    pub const fn from_field(value: u8) -> Self {
        match value & DATA_FORMAT_RANGE_MASK {
            0b00 => Self::G2,
            0b01 => Self::G4,
            0b10 => Self::G8,
            _ => Self::G16,
        }
    }
}

impl From<u8> for Range {
    fn from(value: u8) -> Self {
        Self::from_field(value)
    }
}

impl From<Range> for u8 {
    fn from(range: Range) -> Self {
        range.bits()
    }
}

/// Output data rate, `BW_RATE` bits 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum DataRate {
    Hz0_10 = 0b0000,
    Hz0_20 = 0b0001,
    Hz0_39 = 0b0010,
    Hz0_78 = 0b0011,
    Hz1_56 = 0b0100,
    Hz3_13 = 0b0101,
    Hz6_25 = 0b0110,
    Hz12_5 = 0b0111,
    Hz25 = 0b1000,
    Hz50 = 0b1001,
    Hz100 = 0b1010,
    Hz200 = 0b1011,
    Hz400 = 0b1100,
    Hz800 = 0b1101,
    Hz1600 = 0b1110,
    Hz3200 = 0b1111,
}

impl DataRate {
    /// All rates, slowest first.
    pub const ALL: [Self; 16] = [
        Self::Hz0_10,
        Self::Hz0_20,
        Self::Hz0_39,
        Self::Hz0_78,
        Self::Hz1_56,
        Self::Hz3_13,
        Self::Hz6_25,
        Self::Hz12_5,
        Self::Hz25,
        Self::Hz50,
        Self::Hz100,
        Self::Hz200,
        Self::Hz400,
        Self::Hz800,
        Self::Hz1600,
        Self::Hz3200,
    ];

    /// Field bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Strict inverse of [`DataRate::bits`].
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits > BW_RATE_RATE_MASK {
            return None;
        }
        Some(Self::ALL[bits as usize])
    }

    /// Decode the 4-bit rate field; bits above the field are ignored.
    #[must_use]
    pub const fn from_field(value: u8) -> Self {
        Self::ALL[(value & BW_RATE_RATE_MASK) as usize]
    }

    /// Output data rate in Hz.
    #[must_use]
    pub const fn hz(self) -> f32 {
        match self {
            Self::Hz0_10 => 0.10,
            Self::Hz0_20 => 0.20,
            Self::Hz0_39 => 0.39,
            Self::Hz0_78 => 0.78,
            Self::Hz1_56 => 1.56,
            Self::Hz3_13 => 3.13,
            Self::Hz6_25 => 6.25,
            Self::Hz12_5 => 12.5,
            Self::Hz25 => 25.0,
            Self::Hz50 => 50.0,
            Self::Hz100 => 100.0,
            Self::Hz200 => 200.0,
            Self::Hz400 => 400.0,
            Self::Hz800 => 800.0,
            Self::Hz1600 => 1600.0,
            Self::Hz3200 => 3200.0,
        }
    }
}

impl From<u8> for DataRate {
    fn from(value: u8) -> Self {
        Self::from_field(value)
    }
}

impl From<DataRate> for u8 {
    fn from(rate: DataRate) -> Self {
        rate.bits()
    }
}

/// Read frequency while auto-sleeping, `POWER_CTL` bits 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum WakeFrequency {
    Hz8 = 0b00,
    Hz4 = 0b01,
    Hz2 = 0b10,
    Hz1 = 0b11,
}

impl WakeFrequency {
    /// Field bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode the 2-bit wakeup field; bits above the field are ignored.
    #[must_use]
    pub const fn from_field(value: u8) -> Self {
        match value & POWER_CTL_WAKEUP_MASK {
            0b00 => Self::Hz8,
            0b01 => Self::Hz4,
            0b10 => Self::Hz2,
            _ => Self::Hz1,
        }
    }

    /// Readings per second while asleep.
    #[must_use]
    pub const fn hz(self) -> u8 {
        match self {
            Self::Hz8 => 8,
            Self::Hz4 => 4,
            Self::Hz2 => 2,
            Self::Hz1 => 1,
        }
    }
}

impl From<u8> for WakeFrequency {
    fn from(value: u8) -> Self {
        Self::from_field(value)
    }
}

impl From<WakeFrequency> for u8 {
    fn from(wake: WakeFrequency) -> Self {
        wake.bits()
    }
}

/// Range bits for a magnitude in g.
///
/// # Errors
/// [`InvalidValue`] for anything other than 2, 4, 8 or 16.
pub const fn encode_range(g: u8) -> Result<u8, InvalidValue> {
    match Range::from_g(g) {
        Ok(range) => Ok(range.bits()),
        Err(e) => Err(e),
    }
}

/// Range for a bit pattern, `None` if the pattern is not a range.
#[must_use]
pub const fn decode_range(bits: u8) -> Option<Range> {
    Range::from_bits(bits)
}

/// Rate bits for a data rate.
#[must_use]
pub const fn encode_datarate(rate: DataRate) -> u8 {
    rate.bits()
}

/// Data rate for a bit pattern, `None` if the pattern is wider than the field.
#[must_use]
pub const fn decode_datarate(bits: u8) -> Option<DataRate> {
    DataRate::from_bits(bits)
}

const fn set_bits(value: u8, mask: u8, on: bool) -> u8 {
    if on { value | mask } else { value & !mask }
}

/// Set or clear `FULL_RES` (bit 3) of a `DATA_FORMAT` value.
#[must_use]
pub const fn set_full_resolution_bit(value: u8, on: bool) -> u8 {
    set_bits(value, DATA_FORMAT_FULL_RES, on)
}

/// Set or clear `SELF_TEST` (bit 7) of a `DATA_FORMAT` value.
#[must_use]
pub const fn set_self_test_bit(value: u8, on: bool) -> u8 {
    set_bits(value, DATA_FORMAT_SELF_TEST, on)
}

/// Set or clear `LOW_POWER` (bit 4) of a `BW_RATE` value.
#[must_use]
pub const fn set_low_power_bit(value: u8, on: bool) -> u8 {
    set_bits(value, BW_RATE_LOW_POWER, on)
}

/// Fold an auto-sleep setting into a `POWER_CTL` value.
///
/// Enabling sets `AUTO_SLEEP` and replaces the wakeup field, keeping every
/// other bit of `current`. Disabling clears the whole register, which also
/// drops `MEASURE`: measurement has to be restarted afterwards.
#[must_use]
pub const fn compose_power_control(current: u8, auto_sleep: bool, wake: WakeFrequency) -> u8 {
    if auto_sleep {
        (current & !POWER_CTL_WAKEUP_MASK) | POWER_CTL_AUTO_SLEEP | wake.bits()
    } else {
        0
    }
}

/// Set `MEASURE` (bit 3) of a `POWER_CTL` value.
#[must_use]
pub const fn set_measure_bit(value: u8) -> u8 {
    value | POWER_CTL_MEASURE
}

/// Whether a `POWER_CTL` value has `MEASURE` set.
#[must_use]
pub const fn is_measuring(value: u8) -> bool {
    value & POWER_CTL_MEASURE != 0
}
