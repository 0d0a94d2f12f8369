//! # Weather Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use bme280::{registers, Configuration};
use serde::Deserialize;
use thiserror::Error;
use util::logger::{LogLevels, LoggerInitError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
pub struct WeatherExecParams {

    /// Linux I2C bus number the sensor is connected to (`/dev/i2c-N`)
    pub i2c_bus: u8,

    /// I2C address of the sensor, 0x76 or 0x77 depending on SDO
    #[serde(default = "default_address")]
    pub sensor_address: u8,

    /// Time between two measurements
    pub poll_period_s: f64,

    /// Sensor configuration applied after initialisation
    #[serde(default)]
    pub sensor: Configuration,

    /// Log levels
    #[serde(default)]
    pub log: LogParams,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogParams {

    /// Level of the executable's own records, `info` or more verbose
    pub level: String,

    /// Level of the sensor driver's records, `trace` shows every register access
    pub driver_level: String,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Sensor address {0:#04x} is not one of 0x76 or 0x77")]
    InvalidAddress(u8),

    #[error("Poll period must be positive and finite, found {0}")]
    InvalidPollPeriod(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WeatherExecParams {

    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), ParamsError> {
        if self.sensor_address != registers::DEFAULT_ADDRESS
            && self.sensor_address != registers::ALTERNATE_ADDRESS
        {
            return Err(ParamsError::InvalidAddress(self.sensor_address))
        }

        if !self.poll_period_s.is_finite() || self.poll_period_s <= 0.0 {
            return Err(ParamsError::InvalidPollPeriod(self.poll_period_s))
        }

        Ok(())
    }
}

impl LogParams {

    /// Parse the level names.
    pub fn levels(&self) -> Result<LogLevels, LoggerInitError> {
        LogLevels::from_names(&self.level, &self.driver_level)
    }
}

impl Default for LogParams {
    fn default() -> Self {
        let levels = LogLevels::default();

        Self {
            level: levels.app.to_string().to_lowercase(),
            driver_level: levels.driver.to_string().to_lowercase(),
        }
    }
}

fn default_address() -> u8 {
    registers::DEFAULT_ADDRESS
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use bme280::{Filter, Mode, Oversampling, Standby};
    use util::logger::LevelFilter;

    #[test]
    fn test_full_params() {
        let params: WeatherExecParams = util::params::parse(r#"
            i2c_bus = 1
            sensor_address = 119
            poll_period_s = 60.0

            [sensor]
            mode = "Normal"
            temperature_oversampling = "X2"
            pressure_oversampling = "X16"
            humidity_oversampling = "X1"
            standby = "Ms62_5"
            filter = "X16"

            [log]
            level = "info"
            driver_level = "trace"
        "#).unwrap();

        assert!(params.are_valid().is_ok());
        assert_eq!(params.sensor_address, 0x77);
        assert_eq!(
            params.sensor,
            Configuration {
                mode: Mode::Normal,
                temperature_oversampling: Oversampling::X2,
                pressure_oversampling: Oversampling::X16,
                humidity_oversampling: Oversampling::X1,
                standby: Standby::Ms62_5,
                filter: Filter::X16,
            }
        );
        assert_eq!(
            params.log.levels().unwrap(),
            LogLevels { app: LevelFilter::Info, driver: LevelFilter::Trace }
        );
    }

    #[test]
    fn test_defaults() {
        let params: WeatherExecParams = util::params::parse(
            "i2c_bus = 1\npoll_period_s = 5.0\n\n[sensor]\nfilter = \"X4\""
        ).unwrap();

        assert_eq!(params.sensor_address, registers::DEFAULT_ADDRESS);
        assert_eq!(params.sensor.filter, Filter::X4);
        assert_eq!(params.sensor.mode, Mode::Forced);
        assert_eq!(params.log.levels().unwrap(), LogLevels::default());
    }

    #[test]
    fn test_unknown_setting_name_is_rejected() {
        let result: Result<WeatherExecParams, _> = util::params::parse(
            "i2c_bus = 1\npoll_period_s = 5.0\n\n[sensor]\nmode = \"Turbo\""
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_params() {
        let mut params: WeatherExecParams = util::params::parse(
            "i2c_bus = 1\npoll_period_s = 5.0"
        ).unwrap();

        params.sensor_address = 0x42;
        assert!(matches!(params.are_valid(), Err(ParamsError::InvalidAddress(0x42))));

        params.sensor_address = registers::DEFAULT_ADDRESS;
        params.poll_period_s = 0.0;
        assert!(matches!(params.are_valid(), Err(ParamsError::InvalidPollPeriod(_))));
    }
}
