//! # Register bus
//!
//! The driver only ever needs two things from the transport: read a run of bytes starting at a
//! register, and write one byte to a register. [`RegisterBus`] captures exactly that, and
//! [`I2cBus`] provides it on top of any `embedded-hal` blocking I2C implementation.
//!
//! There is no buffering or retry here. Retry policy belongs to the caller.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::Debug;
use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::error::BusError;
use crate::registers;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Register addressed access to a single device.
pub trait RegisterBus {
    /// Fill `buffer` with consecutive registers starting at `register`.
    fn read(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), BusError>;

    /// Write `value` into `register`.
    fn write(&mut self, register: u8, value: u8) -> Result<(), BusError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// [`RegisterBus`] over a blocking I2C peripheral and a fixed device address.
pub struct I2cBus<I2C> {
    i2c: I2C,
    address: u8,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<B> RegisterBus for &mut B
where
    B: RegisterBus + ?Sized
{
    fn read(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), BusError> {
        (**self).read(register, buffer)
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        (**self).write(register, value)
    }
}

impl<I2C> I2cBus<I2C> {
    /// Create a bus for the device at `address`.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Create a bus for the device at [`registers::DEFAULT_ADDRESS`].
    pub fn with_default_address(i2c: I2C) -> Self {
        Self::new(i2c, registers::DEFAULT_ADDRESS)
    }

    /// The 7-bit device address this bus talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the underlying I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterBus for I2cBus<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug
{
    fn read(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), BusError> {
        self.i2c
            .write_read(self.address, &[register], buffer)
            .map_err(|e| BusError::I2c(format!("{:?}", e)))
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|e| BusError::I2c(format!("{:?}", e)))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
