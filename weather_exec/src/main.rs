//! # Weather Station Executable
//!
//! Reads temperature, pressure and (on the BME280) humidity from the environmental sensor at a
//! fixed period and logs each reading. All sensor logic lives in the `bme280` crate, this
//! executable only schedules it.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Parameters for the weather executable.
mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use bme280::{Bme280, RegisterBus};
use color_eyre::{Result, eyre::WrapErr};
use embedded_hal::blocking::delay::DelayMs;
use log::{info, warn};
use std::{thread, time::Duration};

// Internal
use params::WeatherExecParams;
use util::{
    host,
    logger::logger_init,
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "weather_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Parameters are needed before logging starts to pick the log levels
    let params: WeatherExecParams = util::params::load("weather_exec.toml")
        .wrap_err("Failed to load parameters")?;
    params.are_valid().wrap_err("Loaded parameters are invalid")?;

    // Initialise logger
    let log_levels = params.log.levels().wrap_err("Invalid log levels")?;
    logger_init(log_levels, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Weather Station Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    info!("Initialising...");
    info!("Parameters loaded");


    // ---- SENSOR INITIALISATION ----

    let mut sensor = open_sensor(&params)?;

    sensor.configure(params.sensor)
        .wrap_err("Failed to configure the sensor")?;

    info!("Sensor configured: {:?}", sensor.configuration());

    // ---- MAIN LOOP ----

    info!("Initialisation complete, entering main loop");

    poll(&mut sensor, Duration::from_secs_f64(params.poll_period_s))
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Open the sensor on the Raspberry Pi's I2C bus.
#[cfg(all(target_arch = "arm", target_os = "linux"))]
fn open_sensor(
    params: &WeatherExecParams
) -> Result<Bme280<bme280::I2cBus<rppal::i2c::I2c>, rppal::hal::Delay>> {
    let i2c = rppal::i2c::I2c::with_bus(params.i2c_bus)
        .wrap_err_with(|| format!("Failed to open I2C bus {}", params.i2c_bus))?;

    Bme280::new(
        bme280::I2cBus::new(i2c, params.sensor_address),
        rppal::hal::Delay::new()
    ).wrap_err("Failed to initialise the sensor")
}

/// There is no I2C bus on this platform.
#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
fn open_sensor(
    params: &WeatherExecParams
) -> Result<Bme280<NoBus, NoDelay>> {
    Err(color_eyre::eyre::eyre!(
        "No I2C bus available on this platform (requested bus {}, address {:#04x})",
        params.i2c_bus,
        params.sensor_address
    ))
}

/// Measure forever, logging each reading. A failed measurement is logged and the next period is
/// waited for as usual, the driver does not retry on its own.
fn poll<B, D>(sensor: &mut Bme280<B, D>, period: Duration) -> Result<()>
where
    B: RegisterBus,
    D: DelayMs<u16>
{
    let mut num_failures: u64 = 0;

    loop {
        match sensor.update() {
            Ok(reading) => {
                if num_failures > 0 {
                    info!("Sensor recovered after {} failed measurements", num_failures);
                    num_failures = 0;
                }

                match reading.humidity {
                    Some(h) => info!(
                        "{:6.2} °C  {:7.2} hPa  {:5.1} %RH",
                        reading.temperature, reading.pressure, h
                    ),
                    None => info!(
                        "{:6.2} °C  {:7.2} hPa",
                        reading.temperature, reading.pressure
                    ),
                }
            },
            Err(e) => {
                num_failures += 1;
                warn!("Measurement failed ({} in a row): {}", num_failures, e);
            }
        }

        thread::sleep(period);
    }
}

// ------------------------------------------------------------------------------------------------
// PLACEHOLDER BUS
// ------------------------------------------------------------------------------------------------

/// Stand-in bus type for platforms without I2C, never constructed.
#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
pub enum NoBus {}

/// Stand-in delay type for platforms without I2C, never constructed.
#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
pub enum NoDelay {}

#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
impl RegisterBus for NoBus {
    fn read(&mut self, _register: u8, _buffer: &mut [u8]) -> Result<(), bme280::BusError> {
        match *self {}
    }

    fn write(&mut self, _register: u8, _value: u8) -> Result<(), bme280::BusError> {
        match *self {}
    }
}

#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
impl DelayMs<u16> for NoDelay {
    fn delay_ms(&mut self, _ms: u16) {
        match *self {}
    }
}
