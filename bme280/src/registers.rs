//! # Register map and device constants
//!
//! Every address, block length and bitfield position used by the driver lives here so that the
//! packing formulas can be checked against the datasheet in one place.

// ------------------------------------------------------------------------------------------------
// ADDRESSES
// ------------------------------------------------------------------------------------------------

/// Default I2C address of the sensor (SDO pulled to GND).
pub const DEFAULT_ADDRESS: u8 = 0x76;

/// Alternate I2C address of the sensor (SDO pulled to VDDIO).
pub const ALTERNATE_ADDRESS: u8 = 0x77;

// ------------------------------------------------------------------------------------------------
// REGISTERS
// ------------------------------------------------------------------------------------------------

/// Chip identifier, followed by the chip version byte.
pub const CHIP_ID: u8 = 0xD0;

/// Soft reset register, see [`RESET_WORD`].
pub const RESET: u8 = 0xE0;

/// Start of the temperature and pressure trimming block.
pub const TRIMMING_START: u8 = 0x88;

/// Single byte humidity trimming coefficient `dig_H1`.
pub const HUMIDITY_TRIMMING_H1: u8 = 0xA1;

/// Start of the remaining humidity trimming coefficients (`dig_H2` to `dig_H6`).
pub const HUMIDITY_TRIMMING_START: u8 = 0xE1;

/// Humidity oversampling control (BME280 only).
pub const CTRL_HUM: u8 = 0xF2;

/// Measurement control: `(osrs_t << 5) | (osrs_p << 2) | mode`.
pub const CONTROL_MEASUREMENT: u8 = 0xF4;

/// Config: `(t_sb << 5) | (filter << 2)`.
pub const CONFIG: u8 = 0xF5;

/// Start of the raw data block (pressure, temperature, humidity).
pub const DATA: u8 = 0xF7;

// ------------------------------------------------------------------------------------------------
// BLOCK LENGTHS
// ------------------------------------------------------------------------------------------------

/// Chip ID plus chip version.
pub const CHIP_INFO_LENGTH: usize = 2;

/// `dig_T1..dig_T3` and `dig_P1..dig_P9`, two bytes each.
pub const TRIMMING_LENGTH: usize = 24;

/// `dig_H2..dig_H6` packed into 0xE1..0xE7.
pub const HUMIDITY_TRIMMING_LENGTH: usize = 7;

/// Pressure (3), temperature (3) and humidity (2).
pub const DATA_LENGTH: usize = 8;

// ------------------------------------------------------------------------------------------------
// VALUES AND BITFIELDS
// ------------------------------------------------------------------------------------------------

/// Writing this to [`RESET`] runs the complete power-on-reset procedure.
pub const RESET_WORD: u8 = 0xB6;

/// Chip ID reported by a BMP280 (temperature and pressure only).
pub const BMP280_CHIP_ID: u8 = 0x58;

/// Chip ID reported by a BME280 (temperature, pressure and humidity).
pub const BME280_CHIP_ID: u8 = 0x60;

/// Position of `osrs_t` in [`CONTROL_MEASUREMENT`] and `t_sb` in [`CONFIG`].
pub const UPPER_FIELD_SHIFT: u8 = 5;

/// Position of `osrs_p` in [`CONTROL_MEASUREMENT`] and `filter` in [`CONFIG`].
pub const MIDDLE_FIELD_SHIFT: u8 = 2;

/// Mask for each 3 bit field.
pub const FIELD_MASK: u8 = 0b111;

/// Mask for the 2 bit mode field.
pub const MODE_MASK: u8 = 0b11;

/// Time to wait between triggering a forced conversion and reading the result.
///
/// Covers the datasheet's maximum measurement time with x16 on every channel, humidity
/// included (112.8 ms).
pub const SETTLING_DELAY_MS: u16 = 113;
