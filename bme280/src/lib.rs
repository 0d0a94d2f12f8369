//! # BME280/BMP280 environmental sensor driver
//!
//! Reads the factory trimming coefficients of a Bosch BME280 or BMP280 over a register bus,
//! keeps the device's control registers in sync with an in-memory [`Configuration`], and converts
//! raw ADC codes into temperature (°C), pressure (hPa) and, on the BME280, relative humidity (%).
//!
//! ```no_run
//! # use bme280::{Bme280, I2cBus};
//! # fn run<I2C, E, D>(i2c: I2C, delay: D) -> Result<(), bme280::Bme280Error>
//! # where
//! #     I2C: embedded_hal::blocking::i2c::Write<Error = E>
//! #         + embedded_hal::blocking::i2c::WriteRead<Error = E>,
//! #     E: std::fmt::Debug,
//! #     D: embedded_hal::blocking::delay::DelayMs<u16>
//! # {
//! let mut sensor = Bme280::new(I2cBus::with_default_address(i2c), delay)?;
//! let reading = sensor.update()?;
//! println!("{:.2} °C, {:.2} hPa", reading.temperature, reading.pressure);
//! # Ok(())
//! # }
//! ```

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod bus;
pub mod compensation;
pub mod config;
pub mod driver;
pub mod error;
pub mod registers;
pub mod trimming;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use bus::{I2cBus, RegisterBus};
pub use compensation::{CalibratedReading, FineTemperature, RawSample};
pub use config::{Configuration, Filter, MeasurementControl, Mode, Oversampling, Standby};
pub use driver::{Bme280, Variant};
pub use error::{Bme280Error, BusError, ConfigurationError};
pub use trimming::{HumidityTrimming, PressureTrimming, TemperatureTrimming, TrimmingTable};
