//! # Trimming coefficients
//!
//! Factory programmed calibration coefficients, read once from the device's non-volatile memory
//! when the driver is created and never modified afterwards.
//!
//! The temperature/pressure block is 24 bytes starting at [`registers::TRIMMING_START`], made of
//! 12 little-endian 16 bit words: `dig_T1..dig_T3` followed by `dig_P1..dig_P9`. `dig_T1` and
//! `dig_P1` are unsigned, every other word is a two's complement signed value.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use serde::Serialize;

use crate::{bus::RegisterBus, error::BusError, registers};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of 16 bit words in the temperature/pressure trimming block.
const NUM_WORDS: usize = registers::TRIMMING_LENGTH / 2;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Decoded temperature and pressure coefficients of one physical sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrimmingTable {
    pub temperature: TemperatureTrimming,
    pub pressure: PressureTrimming,
}

/// `dig_T1..dig_T3`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureTrimming {
    pub d1: u16,
    pub d2: i16,
    pub d3: i16,
}

/// `dig_P1..dig_P9`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PressureTrimming {
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
}

/// `dig_H1..dig_H6`, only present on the BME280.
///
/// `h4` and `h5` are 12 bit values sharing the nibbles of register 0xE5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HumidityTrimming {
    pub h1: u8,
    pub h2: i16,
    pub h3: u8,
    pub h4: i16,
    pub h5: i16,
    pub h6: i8,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TrimmingTable {
    /// Read the trimming block starting at `base_address` and decode it.
    ///
    /// A single 24 byte read is performed. If it fails no table is produced.
    pub fn load<B: RegisterBus>(bus: &mut B, base_address: u8) -> Result<Self, BusError> {
        let mut block = [0u8; registers::TRIMMING_LENGTH];
        bus.read(base_address, &mut block)?;

        trace!("Trimming block: {:02X?}", block);

        Ok(Self::decode(&block))
    }

    /// Decode a raw 24 byte trimming block.
    pub fn decode(block: &[u8; registers::TRIMMING_LENGTH]) -> Self {
        // Pair even (low) and odd (high) bytes into unsigned words
        let mut words = [0u16; NUM_WORDS];
        for (word, pair) in words.iter_mut().zip(block.chunks_exact(2)) {
            *word = u16::from_le_bytes([pair[0], pair[1]]);
        }

        Self {
            temperature: TemperatureTrimming {
                d1: words[0],
                d2: to_signed(words[1]),
                d3: to_signed(words[2]),
            },
            pressure: PressureTrimming {
                p1: words[3],
                p2: to_signed(words[4]),
                p3: to_signed(words[5]),
                p4: to_signed(words[6]),
                p5: to_signed(words[7]),
                p6: to_signed(words[8]),
                p7: to_signed(words[9]),
                p8: to_signed(words[10]),
                p9: to_signed(words[11]),
            },
        }
    }
}

impl HumidityTrimming {
    /// Read `dig_H1` and the 7 byte block holding `dig_H2..dig_H6`, then decode them.
    pub fn load<B: RegisterBus>(bus: &mut B) -> Result<Self, BusError> {
        let mut h1 = [0u8; 1];
        bus.read(registers::HUMIDITY_TRIMMING_H1, &mut h1)?;

        let mut block = [0u8; registers::HUMIDITY_TRIMMING_LENGTH];
        bus.read(registers::HUMIDITY_TRIMMING_START, &mut block)?;

        trace!("Humidity trimming: H1 = {:02X}, block = {:02X?}", h1[0], block);

        Ok(Self::decode(h1[0], &block))
    }

    /// Decode `dig_H1` and the raw 0xE1..0xE7 block.
    pub fn decode(h1: u8, block: &[u8; registers::HUMIDITY_TRIMMING_LENGTH]) -> Self {
        // The MSB bytes of h4/h5 are signed, so sign extend before shifting in the nibble
        let h4 = ((block[3] as i8 as i16) << 4) | (block[4] & 0x0F) as i16;
        let h5 = ((block[5] as i8 as i16) << 4) | (block[4] >> 4) as i16;

        Self {
            h1,
            h2: i16::from_le_bytes([block[0], block[1]]),
            h3: block[2],
            h4,
            h5,
            h6: block[6] as i8,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Reinterpret an unsigned word as two's complement, i.e. values >= 32768 become `value - 65536`.
fn to_signed(word: u16) -> i16 {
    word as i16
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
