//! # Compensation
//!
//! Pure conversion of raw ADC codes into physical units using a sensor's trimming coefficients.
//! The formulas and constants are the ones published in the Bosch datasheet and must not be
//! altered.
//!
//! Temperature is always compensated first: it produces a [`FineTemperature`] which is an input
//! to both the pressure and humidity formulas. The value is passed explicitly between the
//! functions, nothing here holds state.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

use crate::{
    registers,
    trimming::{HumidityTrimming, PressureTrimming, TemperatureTrimming, TrimmingTable},
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const HUMIDITY_MIN_PERCENT: f64 = 0.0;
const HUMIDITY_MAX_PERCENT: f64 = 100.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One measurement cycle's raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    /// 20 bit pressure code
    pub pressure: i32,

    /// 20 bit temperature code
    pub temperature: i32,

    /// 16 bit humidity code, only meaningful on the BME280
    pub humidity: i32,
}

/// Intermediate integer temperature (`t_fine`) shared by all compensation formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineTemperature(pub i64);

/// Compensated measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibratedReading {
    /// Temperature in degrees Celsius, with a resolution of 0.01 °C
    pub temperature: f64,

    /// Pressure in hPa
    pub pressure: f64,

    /// Relative humidity in percent, `None` if the device has no humidity channel
    pub humidity: Option<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RawSample {
    /// Unpack the raw data block read from [`registers::DATA`].
    ///
    /// Pressure and temperature are 20 bit values stored MSB, LSB, XLSB (upper nibble), humidity
    /// is a 16 bit big-endian value.
    pub fn from_block(block: &[u8; registers::DATA_LENGTH]) -> Self {
        Self {
            pressure: unpack_20_bit(block[0], block[1], block[2]),
            temperature: unpack_20_bit(block[3], block[4], block[5]),
            humidity: ((block[6] as i32) << 8) | block[7] as i32,
        }
    }
}

impl FineTemperature {
    /// Temperature in degrees Celsius.
    ///
    /// Scaled to hundredths of a degree in integer arithmetic before the final division.
    pub fn celsius(&self) -> f64 {
        ((self.0 * 5 + 128) >> 8) as f64 / 100.0
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Compensate a full raw sample.
///
/// `humidity_trims` should be `Some` only for devices with a humidity channel.
pub fn compensate(
    raw: &RawSample,
    trims: &TrimmingTable,
    humidity_trims: Option<&HumidityTrimming>
) -> CalibratedReading {
    let fine = compensate_temperature(raw.temperature, &trims.temperature);

    CalibratedReading {
        temperature: fine.celsius(),
        pressure: compensate_pressure(raw.pressure, fine, &trims.pressure),
        humidity: humidity_trims.map(|h| compensate_humidity(raw.humidity, fine, h)),
    }
}

/// Integer fixed point temperature compensation, returning `t_fine`.
///
/// All shifts are arithmetic shifts on signed values.
pub fn compensate_temperature(raw: i32, trims: &TemperatureTrimming) -> FineTemperature {
    let t = raw as i64;
    let d1 = trims.d1 as i64;
    let d2 = trims.d2 as i64;
    let d3 = trims.d3 as i64;

    let var1 = (((t >> 3) - (d1 << 1)) * d2) >> 11;
    let var2 = (((((t >> 4) - d1) * ((t >> 4) - d1)) >> 12) * d3) >> 14;

    FineTemperature(var1 + var2)
}

/// Floating point pressure compensation, returning hPa.
///
/// A zero divisor yields a pressure of exactly 0.0, it is not an error.
pub fn compensate_pressure(raw: i32, fine: FineTemperature, trims: &PressureTrimming) -> f64 {
    let p1 = trims.p1 as f64;
    let p2 = trims.p2 as f64;
    let p3 = trims.p3 as f64;
    let p4 = trims.p4 as f64;
    let p5 = trims.p5 as f64;
    let p6 = trims.p6 as f64;
    let p7 = trims.p7 as f64;
    let p8 = trims.p8 as f64;
    let p9 = trims.p9 as f64;

    let mut var1 = fine.0 as f64 / 2.0 - 64000.0;
    let mut var2 = var1 * var1 * p6 / 32768.0 + var1 * p5 * 2.0;
    var2 = var2 / 4.0 + p4 * 65536.0;
    var1 = (p3 * var1 * var1 / 524288.0 + p2 * var1) / 524288.0;
    var1 = (1.0 + var1 / 32768.0) * p1;

    if var1 == 0.0 {
        return 0.0;
    }

    let mut pressure = 1048576.0 - raw as f64;
    pressure = (pressure - var2 / 4096.0) * 6250.0 / var1;
    var1 = p9 * pressure * pressure / 2147483648.0;
    var2 = pressure * p8 / 32768.0;

    (pressure + (var1 + var2 + p7) / 16.0) / 100.0
}

/// Floating point humidity compensation, returning %RH clamped to `[0, 100]`.
pub fn compensate_humidity(raw: i32, fine: FineTemperature, trims: &HumidityTrimming) -> f64 {
    let h1 = trims.h1 as f64;
    let h2 = trims.h2 as f64;
    let h3 = trims.h3 as f64;
    let h4 = trims.h4 as f64;
    let h5 = trims.h5 as f64;
    let h6 = trims.h6 as f64;

    let var1 = fine.0 as f64 - 76800.0;
    let var2 = h4 * 64.0 + (h5 / 16384.0) * var1;
    let var3 = raw as f64 - var2;
    let var4 = h2 / 65536.0;
    let var5 = 1.0 + (h3 / 67108864.0) * var1;
    let var6 = 1.0 + (h6 / 67108864.0) * var1 * var5;
    let var6 = var3 * var4 * (var5 * var6);

    let humidity = var6 * (1.0 - h1 * var6 / 524288.0);

    humidity.max(HUMIDITY_MIN_PERCENT).min(HUMIDITY_MAX_PERCENT)
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn unpack_20_bit(msb: u8, lsb: u8, xlsb: u8) -> i32 {
    ((msb as i32) << 12) | ((lsb as i32) << 4) | ((xlsb as i32) >> 4)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
