//! # Driver errors

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A transport level failure on the register bus (device absent, NACK, timeout).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BusError {
    #[error("An I2C error occured: {0}")]
    I2c(String),
}

/// A raw register code that is not part of the enumerated set for a setting.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigurationError {
    #[error("Invalid mode code {0:#04x}, expected one of 0 (sleep), 1 (forced) or 3 (normal)")]
    InvalidMode(u8),

    #[error("Invalid oversampling code {0:#04x}, expected a value between 0 and 5")]
    InvalidOversampling(u8),

    #[error("Invalid standby code {0:#04x}, expected a value between 0 and 7")]
    InvalidStandby(u8),

    #[error("Invalid filter code {0:#04x}, expected a value between 0 and 4")]
    InvalidFilter(u8),
}

/// Any error returned by the [`crate::Bme280`] driver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Bme280Error {
    #[error("Register bus failure: {0}")]
    Bus(#[from] BusError),

    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}
