//! # Sensor driver
//!
//! [`Bme280`] owns the trimming coefficients and configuration of one physical sensor and drives
//! measurement cycles over a [`RegisterBus`].
//!
//! A successfully constructed driver is ready to measure. There is no separate initialise call
//! and no partially initialised state: if any step of [`Bme280::new`] fails the driver is not
//! created.
//!
//! All operations are blocking bus round trips. The driver is not meant to be shared between
//! threads directly, wrap a single instance in a `Mutex` if that is needed.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use embedded_hal::blocking::delay::DelayMs;
use log::{debug, info, trace, warn};

use crate::{
    bus::RegisterBus,
    compensation::{self, CalibratedReading, RawSample},
    config::{Configuration, Filter, MeasurementControl, Mode, Oversampling, Standby},
    error::Bme280Error,
    registers,
    trimming::{HumidityTrimming, TrimmingTable},
};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Device family, as identified by the chip ID register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Temperature and pressure.
    Bmp280,

    /// Temperature, pressure and humidity.
    Bme280,

    /// Unrecognised chip ID, treated as temperature and pressure only.
    Unknown(u8),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Driver for one BME280/BMP280 sensor.
pub struct Bme280<B, D> {
    bus: B,
    delay: D,

    chip_id: u8,
    chip_version: u8,

    trimming: TrimmingTable,
    humidity_trimming: Option<HumidityTrimming>,

    config: Configuration,

    last_reading: Option<CalibratedReading>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Variant {
    pub fn from_chip_id(chip_id: u8) -> Self {
        match chip_id {
            registers::BMP280_CHIP_ID => Variant::Bmp280,
            registers::BME280_CHIP_ID => Variant::Bme280,
            id => Variant::Unknown(id),
        }
    }

    pub fn has_humidity(&self) -> bool {
        matches!(self, Variant::Bme280)
    }
}

impl<B, D> Bme280<B, D>
where
    B: RegisterBus,
    D: DelayMs<u16>
{
    /// Initialise the sensor.
    ///
    /// Reads the chip ID and version, loads the trimming coefficients and writes the default
    /// [`Configuration`] into the config (and on the BME280 the humidity control) register. The
    /// measurement control register is not written until the first [`Bme280::update`].
    pub fn new(mut bus: B, delay: D) -> Result<Self, Bme280Error> {
        let mut chip_info = [0u8; registers::CHIP_INFO_LENGTH];
        bus.read(registers::CHIP_ID, &mut chip_info)?;

        let variant = Variant::from_chip_id(chip_info[0]);
        if let Variant::Unknown(id) = variant {
            warn!("Unrecognised chip ID {:#04x}, humidity will not be read", id);
        }

        let trimming = TrimmingTable::load(&mut bus, registers::TRIMMING_START)?;

        let humidity_trimming = if variant.has_humidity() {
            Some(HumidityTrimming::load(&mut bus)?)
        }
        else {
            None
        };

        let mut sensor = Self {
            bus,
            delay,
            chip_id: chip_info[0],
            chip_version: chip_info[1],
            trimming,
            humidity_trimming,
            config: Configuration::default(),
            last_reading: None,
        };

        sensor.write_config()?;
        if sensor.has_humidity() {
            sensor.write_ctrl_hum()?;
        }

        info!(
            "{:?} initialised (chip ID {:#04x}, version {:#04x})",
            variant,
            sensor.chip_id,
            sensor.chip_version
        );
        debug!("Trimming: {:?}", sensor.trimming);

        Ok(sensor)
    }

    /// Trigger one conversion, wait for it to complete and return the compensated result.
    ///
    /// The measurement control register is written on every call, even in normal mode, so that a
    /// forced-mode device performs exactly one cycle per update.
    pub fn update(&mut self) -> Result<CalibratedReading, Bme280Error> {
        self.write_ctrl_meas()?;
        self.delay.delay_ms(registers::SETTLING_DELAY_MS);
        self.read()
    }

    /// Read and compensate the most recent conversion without triggering a new one.
    ///
    /// Intended for normal mode, where the device measures continuously.
    pub fn read(&mut self) -> Result<CalibratedReading, Bme280Error> {
        let mut block = [0u8; registers::DATA_LENGTH];
        self.bus.read(registers::DATA, &mut block)?;

        let raw = RawSample::from_block(&block);
        trace!("Raw sample: {:?}", raw);

        let reading = compensation::compensate(
            &raw,
            &self.trimming,
            self.humidity_trimming.as_ref()
        );
        debug!("Reading: {:?}", reading);

        self.last_reading = Some(reading);

        Ok(reading)
    }

    /// Soft reset the device.
    ///
    /// Trimming coefficients are kept as they are, they live in non-volatile memory. The control
    /// registers return to their power-on values, use [`Bme280::configure`] to restore them.
    pub fn reset(&mut self) -> Result<(), Bme280Error> {
        self.bus.write(registers::RESET, registers::RESET_WORD)?;
        info!("Sensor reset");
        Ok(())
    }

    /// Read back the measurement control register from the device.
    ///
    /// Only a bus failure is an error, every register value decodes.
    pub fn status(&mut self) -> Result<MeasurementControl, Bme280Error> {
        let mut value = [0u8; 1];
        self.bus.read(registers::CONTROL_MEASUREMENT, &mut value)?;

        Ok(MeasurementControl::from_register(value[0]))
    }

    /// Replace the whole configuration and write every control register.
    ///
    /// Use this to resynchronise the device after a failed setter or a reset.
    pub fn configure(&mut self, config: Configuration) -> Result<(), Bme280Error> {
        self.config = config;

        // ctrl_hum only takes effect after a ctrl_meas write, so it must come first
        self.write_config()?;
        if self.has_humidity() {
            self.write_ctrl_hum()?;
        }
        self.write_ctrl_meas()
    }

    // ---- SETTERS ----
    //
    // Every setter updates the in-memory value first and then writes the register holding it. If
    // the write fails the in-memory and device state disagree, and the error is returned.

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Bme280Error> {
        self.config.mode = mode;
        self.write_ctrl_meas()
    }

    pub fn set_temperature_oversampling(
        &mut self,
        oversampling: Oversampling
    ) -> Result<(), Bme280Error> {
        self.config.temperature_oversampling = oversampling;
        self.write_ctrl_meas()
    }

    pub fn set_pressure_oversampling(
        &mut self,
        oversampling: Oversampling
    ) -> Result<(), Bme280Error> {
        self.config.pressure_oversampling = oversampling;
        self.write_ctrl_meas()
    }

    /// Set the humidity oversampling.
    ///
    /// On devices without a humidity channel only the in-memory value changes. On the BME280 the
    /// new value is applied by the next measurement control write, i.e. the next update.
    pub fn set_humidity_oversampling(
        &mut self,
        oversampling: Oversampling
    ) -> Result<(), Bme280Error> {
        self.config.humidity_oversampling = oversampling;

        if self.has_humidity() {
            self.write_ctrl_hum()
        }
        else {
            debug!("No humidity channel, humidity oversampling not written");
            Ok(())
        }
    }

    pub fn set_standby(&mut self, standby: Standby) -> Result<(), Bme280Error> {
        self.config.standby = standby;
        self.write_config()
    }

    pub fn set_filter(&mut self, filter: Filter) -> Result<(), Bme280Error> {
        self.config.filter = filter;
        self.write_config()
    }

    // ---- REGISTER WRITES ----

    fn write_ctrl_meas(&mut self) -> Result<(), Bme280Error> {
        let value = self.config.ctrl_meas();
        trace!("ctrl_meas <- {:#010b}", value);
        Ok(self.bus.write(registers::CONTROL_MEASUREMENT, value)?)
    }

    fn write_config(&mut self) -> Result<(), Bme280Error> {
        let value = self.config.config();
        trace!("config <- {:#010b}", value);
        Ok(self.bus.write(registers::CONFIG, value)?)
    }

    fn write_ctrl_hum(&mut self) -> Result<(), Bme280Error> {
        let value = self.config.ctrl_hum();
        trace!("ctrl_hum <- {:#010b}", value);
        Ok(self.bus.write(registers::CTRL_HUM, value)?)
    }
}

impl<B, D> Bme280<B, D> {
    pub fn chip_id(&self) -> u8 {
        self.chip_id
    }

    pub fn chip_version(&self) -> u8 {
        self.chip_version
    }

    pub fn variant(&self) -> Variant {
        Variant::from_chip_id(self.chip_id)
    }

    pub fn has_humidity(&self) -> bool {
        self.humidity_trimming.is_some()
    }

    pub fn trimming(&self) -> &TrimmingTable {
        &self.trimming
    }

    pub fn humidity_trimming(&self) -> Option<&HumidityTrimming> {
        self.humidity_trimming.as_ref()
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn temperature_oversampling(&self) -> Oversampling {
        self.config.temperature_oversampling
    }

    pub fn pressure_oversampling(&self) -> Oversampling {
        self.config.pressure_oversampling
    }

    pub fn humidity_oversampling(&self) -> Oversampling {
        self.config.humidity_oversampling
    }

    pub fn standby(&self) -> Standby {
        self.config.standby
    }

    pub fn filter(&self) -> Filter {
        self.config.filter
    }

    /// The reading cached by the last successful update or read.
    pub fn last_reading(&self) -> Option<&CalibratedReading> {
        self.last_reading.as_ref()
    }

    /// Last temperature in °C.
    pub fn temperature(&self) -> Option<f64> {
        self.last_reading.map(|r| r.temperature)
    }

    /// Last pressure in hPa.
    pub fn pressure(&self) -> Option<f64> {
        self.last_reading.map(|r| r.pressure)
    }

    /// Last relative humidity in %.
    pub fn humidity(&self) -> Option<f64> {
        self.last_reading.and_then(|r| r.humidity)
    }

    /// Give back the bus and delay provider.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{bus::I2cBus, error::{BusError, ConfigurationError}};
    use embedded_hal_mock::{
        delay::MockNoop,
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
        MockError,
    };
    use std::{convert::TryFrom, io::ErrorKind};

    const ADDR: u8 = registers::DEFAULT_ADDRESS;

    /// Datasheet example coefficients.
    const TRIMMING_BLOCK: [u8; 24] = [
        0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B,
        0x27, 0x0B, 0x8C, 0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
    ];

    /// H1 = 75, H2 = 362, H3 = 0, H4 = 313, H5 = 50, H6 = 30
    const HUMIDITY_BLOCK: [u8; 7] = [0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E];

    /// P = 415148, T = 519888, H = 27000
    const DATA_BLOCK: [u8; 8] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x69, 0x78];

    fn bmp280_init() -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write_read(ADDR, vec![0xD0], vec![0x58, 0x01]),
            I2cTransaction::write_read(ADDR, vec![0x88], TRIMMING_BLOCK.to_vec()),
            I2cTransaction::write(ADDR, vec![0xF5, 0x80]),
        ]
    }

    fn bme280_init() -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write_read(ADDR, vec![0xD0], vec![0x60, 0x00]),
            I2cTransaction::write_read(ADDR, vec![0x88], TRIMMING_BLOCK.to_vec()),
            I2cTransaction::write_read(ADDR, vec![0xA1], vec![75]),
            I2cTransaction::write_read(ADDR, vec![0xE1], HUMIDITY_BLOCK.to_vec()),
            I2cTransaction::write(ADDR, vec![0xF5, 0x80]),
            I2cTransaction::write(ADDR, vec![0xF2, 0x01]),
        ]
    }

    fn with(mut init: Vec<I2cTransaction>, rest: &[I2cTransaction]) -> Vec<I2cTransaction> {
        init.extend_from_slice(rest);
        init
    }

    fn assert_pressure(actual: Option<f64>) {
        let actual = actual.unwrap();
        assert!((actual - 1006.5325814481472).abs() < 1e-6, "Unexpected pressure {}", actual);
    }

    #[test]
    fn test_new_loads_trimming_and_defaults() {
        let mut i2c = I2cMock::new(&bmp280_init());
        let sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        assert_eq!(sensor.chip_id(), 0x58);
        assert_eq!(sensor.chip_version(), 0x01);
        assert_eq!(sensor.variant(), Variant::Bmp280);
        assert!(!sensor.has_humidity());
        assert_eq!(sensor.trimming(), &TrimmingTable::decode(&TRIMMING_BLOCK));
        assert_eq!(sensor.configuration(), &Configuration::default());
        assert_eq!(sensor.mode(), Mode::Forced);
        assert_eq!(sensor.temperature_oversampling(), Oversampling::X1);
        assert_eq!(sensor.pressure_oversampling(), Oversampling::X1);
        assert!(sensor.last_reading().is_none());

        i2c.done();
    }

    #[test]
    fn test_new_fails_without_device() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write_read(ADDR, vec![0xD0], vec![0, 0])
                .with_error(MockError::Io(ErrorKind::NotConnected)),
        ]);

        match Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()) {
            Err(Bme280Error::Bus(BusError::I2c(_))) => (),
            Err(e) => panic!("Unexpected error {:?}", e),
            Ok(_) => panic!("Driver created without a device"),
        }

        i2c.done();
    }

    #[test]
    fn test_new_fails_on_trimming_read_without_writing() {
        // The mock panics on any transaction beyond these, so no control register is written
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write_read(ADDR, vec![0xD0], vec![0x58, 0x01]),
            I2cTransaction::write_read(ADDR, vec![0x88], vec![0u8; 24])
                .with_error(MockError::Io(ErrorKind::TimedOut)),
        ]);

        let result = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new());

        assert!(matches!(result, Err(Bme280Error::Bus(_))));
        i2c.done();
    }

    #[test]
    fn test_unknown_chip_has_no_humidity() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write_read(ADDR, vec![0xD0], vec![0x42, 0x00]),
            I2cTransaction::write_read(ADDR, vec![0x88], TRIMMING_BLOCK.to_vec()),
            I2cTransaction::write(ADDR, vec![0xF5, 0x80]),
        ]);

        let sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        assert_eq!(sensor.variant(), Variant::Unknown(0x42));
        assert!(!sensor.has_humidity());
        i2c.done();
    }

    #[test]
    fn test_update_triggers_then_reads() {
        let mut i2c = I2cMock::new(&with(bmp280_init(), &[
            I2cTransaction::write(ADDR, vec![0xF4, 0x25]),
            I2cTransaction::write_read(ADDR, vec![0xF7], DATA_BLOCK.to_vec()),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        let reading = sensor.update().unwrap();

        assert_eq!(reading.temperature, 25.08);
        assert_pressure(Some(reading.pressure));
        assert_eq!(reading.humidity, None);

        assert_eq!(sensor.last_reading(), Some(&reading));
        assert_eq!(sensor.temperature(), Some(25.08));
        assert_pressure(sensor.pressure());
        assert_eq!(sensor.humidity(), None);

        i2c.done();
    }

    #[test]
    fn test_update_on_bme280_includes_humidity() {
        let mut i2c = I2cMock::new(&with(bme280_init(), &[
            I2cTransaction::write(ADDR, vec![0xF4, 0x25]),
            I2cTransaction::write_read(ADDR, vec![0xF7], DATA_BLOCK.to_vec()),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        assert_eq!(sensor.variant(), Variant::Bme280);

        sensor.update().unwrap();
        let humidity = sensor.humidity().unwrap();

        assert!((humidity - 38.275054276373446).abs() < 1e-9);
        i2c.done();
    }

    #[test]
    fn test_failed_update_keeps_previous_reading() {
        let mut i2c = I2cMock::new(&with(bmp280_init(), &[
            I2cTransaction::write(ADDR, vec![0xF4, 0x25]),
            I2cTransaction::write_read(ADDR, vec![0xF7], DATA_BLOCK.to_vec()),
            I2cTransaction::write(ADDR, vec![0xF4, 0x25]),
            I2cTransaction::write_read(ADDR, vec![0xF7], vec![0u8; 8])
                .with_error(MockError::Io(ErrorKind::TimedOut)),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        let first = sensor.update().unwrap();

        assert!(sensor.update().is_err());
        assert_eq!(sensor.last_reading(), Some(&first));
        i2c.done();
    }

    #[test]
    fn test_read_does_not_trigger() {
        let mut i2c = I2cMock::new(&with(bmp280_init(), &[
            I2cTransaction::write_read(ADDR, vec![0xF7], DATA_BLOCK.to_vec()),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        assert_eq!(sensor.read().unwrap().temperature, 25.08);
        i2c.done();
    }

    #[test]
    fn test_each_setter_writes_once() {
        let mut i2c = I2cMock::new(&with(bmp280_init(), &[
            // Normal, x1, x1
            I2cTransaction::write(ADDR, vec![0xF4, (1 << 5) | (1 << 2) | 3]),
            // Normal, x8, x1
            I2cTransaction::write(ADDR, vec![0xF4, (4 << 5) | (1 << 2) | 3]),
            // Normal, x8, x16
            I2cTransaction::write(ADDR, vec![0xF4, (4 << 5) | (5 << 2) | 3]),
            // 1000 ms, filter off
            I2cTransaction::write(ADDR, vec![0xF5, 5 << 5]),
            // 1000 ms, filter x4
            I2cTransaction::write(ADDR, vec![0xF5, (5 << 5) | (2 << 2)]),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        sensor.set_mode(Mode::Normal).unwrap();
        sensor.set_temperature_oversampling(Oversampling::X8).unwrap();
        sensor.set_pressure_oversampling(Oversampling::X16).unwrap();
        sensor.set_standby(Standby::Ms1000).unwrap();
        sensor.set_filter(Filter::X4).unwrap();

        // Reading back gives what was set even though each write packed several fields
        assert_eq!(sensor.mode(), Mode::Normal);
        assert_eq!(sensor.temperature_oversampling(), Oversampling::X8);
        assert_eq!(sensor.pressure_oversampling(), Oversampling::X16);
        assert_eq!(sensor.standby(), Standby::Ms1000);
        assert_eq!(sensor.filter(), Filter::X4);

        i2c.done();
    }

    #[test]
    fn test_humidity_oversampling_setter() {
        let mut i2c = I2cMock::new(&with(bme280_init(), &[
            I2cTransaction::write(ADDR, vec![0xF2, 0x05]),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        sensor.set_humidity_oversampling(Oversampling::X16).unwrap();

        assert_eq!(sensor.humidity_oversampling(), Oversampling::X16);
        i2c.done();
    }

    #[test]
    fn test_humidity_oversampling_without_humidity_channel() {
        let mut i2c = I2cMock::new(&bmp280_init());
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        sensor.set_humidity_oversampling(Oversampling::X2).unwrap();

        assert_eq!(sensor.humidity_oversampling(), Oversampling::X2);
        i2c.done();
    }

    #[test]
    fn test_illegal_code_never_reaches_the_bus() {
        let mut i2c = I2cMock::new(&bmp280_init());
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        let result = Filter::try_from(6)
            .map_err(Bme280Error::from)
            .and_then(|f| sensor.set_filter(f));

        assert_eq!(
            result,
            Err(Bme280Error::Configuration(ConfigurationError::InvalidFilter(6)))
        );
        assert_eq!(sensor.filter(), Filter::Off);
        i2c.done();
    }

    #[test]
    fn test_failed_setter_reports_and_keeps_new_value() {
        let mut i2c = I2cMock::new(&with(bmp280_init(), &[
            I2cTransaction::write(ADDR, vec![0xF5, (4 << 5) | (4 << 2)])
                .with_error(MockError::Io(ErrorKind::Other)),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        assert!(sensor.set_filter(Filter::X16).is_err());
        assert_eq!(sensor.filter(), Filter::X16);
        i2c.done();
    }

    #[test]
    fn test_reset_does_not_reload_trimming() {
        let mut i2c = I2cMock::new(&with(bmp280_init(), &[
            I2cTransaction::write(ADDR, vec![0xE0, 0xB6]),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        sensor.reset().unwrap();

        assert_eq!(sensor.trimming(), &TrimmingTable::decode(&TRIMMING_BLOCK));
        i2c.done();
    }

    #[test]
    fn test_configure_writes_full_sequence() {
        let config = Configuration {
            mode: Mode::Normal,
            temperature_oversampling: Oversampling::X2,
            pressure_oversampling: Oversampling::X16,
            humidity_oversampling: Oversampling::X4,
            standby: Standby::Ms62_5,
            filter: Filter::X16,
        };

        let mut i2c = I2cMock::new(&with(bme280_init(), &[
            I2cTransaction::write(ADDR, vec![0xF5, (1 << 5) | (4 << 2)]),
            I2cTransaction::write(ADDR, vec![0xF2, 3]),
            I2cTransaction::write(ADDR, vec![0xF4, (2 << 5) | (5 << 2) | 3]),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        sensor.configure(config).unwrap();

        assert_eq!(sensor.configuration(), &config);
        i2c.done();
    }

    #[test]
    fn test_status_decodes_ctrl_meas() {
        let mut i2c = I2cMock::new(&with(bmp280_init(), &[
            I2cTransaction::write_read(ADDR, vec![0xF4], vec![(3 << 5) | (2 << 2)]),
            I2cTransaction::write_read(ADDR, vec![0xF4], vec![(1 << 5) | (1 << 2) | 2]),
            I2cTransaction::write_read(ADDR, vec![0xF4], vec![0xFF]),
        ]));
        let mut sensor = Bme280::new(I2cBus::new(i2c.clone(), ADDR), MockNoop::new()).unwrap();

        assert_eq!(
            sensor.status().unwrap(),
            MeasurementControl {
                temperature_oversampling: Oversampling::X4,
                pressure_oversampling: Oversampling::X2,
                mode: Mode::Sleep,
            }
        );

        // Mode 0b10 is the second forced mode encoding
        assert_eq!(sensor.status().unwrap().mode, Mode::Forced);

        // Oversampling 0b111 reads as x16
        assert_eq!(
            sensor.status().unwrap(),
            MeasurementControl {
                temperature_oversampling: Oversampling::X16,
                pressure_oversampling: Oversampling::X16,
                mode: Mode::Normal,
            }
        );

        i2c.done();
    }

    #[test]
    fn test_driver_on_borrowed_bus() {
        let mut i2c = I2cMock::new(&with(bmp280_init(), &[
            I2cTransaction::write(ADDR, vec![0xE0, 0xB6]),
        ]));
        let mut bus = I2cBus::new(i2c.clone(), ADDR);

        {
            let mut sensor = Bme280::new(&mut bus, MockNoop::new()).unwrap();
            sensor.reset().unwrap();
        }

        // The bus is still ours once the driver is gone
        assert_eq!(bus.address(), ADDR);
        i2c.done();
    }
}
