//! # Device configuration
//!
//! Operating mode, per-channel oversampling, standby period and IIR filter, along with the
//! packing of these fields into the control registers:
//!
//! | Register | Layout |
//! |----------|--------|
//! | `ctrl_meas` (0xF4) | `(osrs_t << 5) \| (osrs_p << 2) \| mode` |
//! | `config` (0xF5)    | `(t_sb << 5) \| (filter << 2)` |
//! | `ctrl_hum` (0xF2)  | `osrs_h` |
//!
//! The [`Configuration`] here is a plain value. Keeping it in sync with the device is the job of
//! the driver's setters, see [`crate::Bme280`].

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::convert::TryFrom;
use serde::{Serialize, Deserialize};

use crate::{error::ConfigurationError, registers};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Power mode, `mode[1:0]` in `ctrl_meas`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Mode {
    /// No measurements, lowest power.
    Sleep = 0,

    /// One measurement cycle per trigger, then back to sleep.
    Forced = 1,

    /// Continuous measurement separated by the standby period.
    Normal = 3,
}

/// Oversampling for one channel, `osrs_x[2:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Oversampling {
    /// Channel is not measured.
    Skip = 0,
    X1 = 1,
    X2 = 2,
    X4 = 3,
    X8 = 4,
    X16 = 5,
}

/// Inactive period between measurements in normal mode, `t_sb[2:0]` in `config`.
///
/// The codes follow the BME280 table, where 6 and 7 are the 10 and 20 ms entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Standby {
    Ms0_5 = 0,
    Ms62_5 = 1,
    Ms125 = 2,
    Ms250 = 3,
    Ms500 = 4,
    Ms1000 = 5,
    Ms10 = 6,
    Ms20 = 7,
}

/// IIR filter coefficient, `filter[2:0]` in `config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Filter {
    Off = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
    X16 = 4,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Full in-memory configuration of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub mode: Mode,
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,

    /// Only used by the BME280.
    pub humidity_oversampling: Oversampling,

    pub standby: Standby,
    pub filter: Filter,
}

/// Contents of `ctrl_meas` as read back from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementControl {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    pub mode: Mode,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Configuration {
    fn default() -> Self {
        Self {
            mode: Mode::Forced,
            temperature_oversampling: Oversampling::X1,
            pressure_oversampling: Oversampling::X1,
            humidity_oversampling: Oversampling::X1,
            standby: Standby::Ms500,
            filter: Filter::Off,
        }
    }
}

impl Configuration {
    /// Value of the measurement control register.
    pub fn ctrl_meas(&self) -> u8 {
        ((self.temperature_oversampling as u8) << registers::UPPER_FIELD_SHIFT)
            | ((self.pressure_oversampling as u8) << registers::MIDDLE_FIELD_SHIFT)
            | self.mode as u8
    }

    /// Value of the config register. Bit 0 (SPI 3 wire enable) is always left clear.
    pub fn config(&self) -> u8 {
        ((self.standby as u8) << registers::UPPER_FIELD_SHIFT)
            | ((self.filter as u8) << registers::MIDDLE_FIELD_SHIFT)
    }

    /// Value of the humidity control register.
    pub fn ctrl_hum(&self) -> u8 {
        self.humidity_oversampling as u8
    }

    /// Maximum duration of one measurement cycle in microseconds (datasheet appendix B).
    ///
    /// `with_humidity` selects whether the humidity channel is converted at all, it is not on
    /// the BMP280.
    pub fn max_measurement_time_us(&self, with_humidity: bool) -> u32 {
        let mut time_us = 1250 + 2300 * self.temperature_oversampling.factor();

        let p = self.pressure_oversampling.factor();
        if p > 0 {
            time_us += 2300 * p + 575;
        }

        let h = self.humidity_oversampling.factor();
        if with_humidity && h > 0 {
            time_us += 2300 * h + 575;
        }

        time_us
    }
}

impl MeasurementControl {
    /// Split a raw `ctrl_meas` value read back from the device into its fields.
    ///
    /// Unlike the `TryFrom<u8>` conversions this accepts every value the register can hold: mode
    /// `0b10` is a second encoding of forced mode and oversampling codes 6 and 7 mean x16.
    pub fn from_register(value: u8) -> Self {
        Self {
            temperature_oversampling: Oversampling::from_register(
                (value >> registers::UPPER_FIELD_SHIFT) & registers::FIELD_MASK
            ),
            pressure_oversampling: Oversampling::from_register(
                (value >> registers::MIDDLE_FIELD_SHIFT) & registers::FIELD_MASK
            ),
            mode: Mode::from_register(value & registers::MODE_MASK),
        }
    }
}

impl Mode {
    fn from_register(bits: u8) -> Self {
        match bits & registers::MODE_MASK {
            0 => Mode::Sleep,
            1 | 2 => Mode::Forced,
            _ => Mode::Normal,
        }
    }
}

impl Oversampling {
    /// Number of samples averaged, 0 when the channel is skipped.
    pub fn factor(&self) -> u32 {
        match self {
            Oversampling::Skip => 0,
            Oversampling::X1 => 1,
            Oversampling::X2 => 2,
            Oversampling::X4 => 4,
            Oversampling::X8 => 8,
            Oversampling::X16 => 16,
        }
    }

    fn from_register(bits: u8) -> Self {
        match bits & registers::FIELD_MASK {
            0 => Oversampling::Skip,
            1 => Oversampling::X1,
            2 => Oversampling::X2,
            3 => Oversampling::X4,
            4 => Oversampling::X8,
            _ => Oversampling::X16,
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Sleep),
            1 => Ok(Mode::Forced),
            3 => Ok(Mode::Normal),
            v => Err(ConfigurationError::InvalidMode(v)),
        }
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Oversampling::Skip),
            1 => Ok(Oversampling::X1),
            2 => Ok(Oversampling::X2),
            3 => Ok(Oversampling::X4),
            4 => Ok(Oversampling::X8),
            5 => Ok(Oversampling::X16),
            v => Err(ConfigurationError::InvalidOversampling(v)),
        }
    }
}

impl TryFrom<u8> for Standby {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Standby::Ms0_5),
            1 => Ok(Standby::Ms62_5),
            2 => Ok(Standby::Ms125),
            3 => Ok(Standby::Ms250),
            4 => Ok(Standby::Ms500),
            5 => Ok(Standby::Ms1000),
            6 => Ok(Standby::Ms10),
            7 => Ok(Standby::Ms20),
            v => Err(ConfigurationError::InvalidStandby(v)),
        }
    }
}

impl TryFrom<u8> for Filter {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Filter::Off),
            1 => Ok(Filter::X2),
            2 => Ok(Filter::X4),
            3 => Ok(Filter::X8),
            4 => Ok(Filter::X16),
            v => Err(ConfigurationError::InvalidFilter(v)),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
