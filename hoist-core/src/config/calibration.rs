//! Encoder calibration record
//!
//! Stores a measured encoder calibration so it survives a power cycle. The
//! storage medium is the firmware's business; this module only defines the
//! record and its integrity checks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::EncoderConfig;

/// Magic number to identify valid calibration data
pub const CALIBRATION_MAGIC: u32 = 0x454E_4343; // "ENCC"

/// Current calibration data version
pub const CALIBRATION_VERSION: u8 = 1;

/// Encoded size upper bound for [`EncoderCalibration`]
pub const CALIBRATION_MAX_SIZE: usize = 32;

/// Calibration record errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Bytes could not be encoded or decoded
    Codec,
    /// Magic number mismatch
    BadMagic,
    /// Written by a different format version
    BadVersion,
    /// Checksum mismatch
    BadCrc,
}

/// Persistable encoder calibration
///
/// This struct is serialized with postcard.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderCalibration {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// The calibration itself
    pub encoder: EncoderConfig,
    /// CRC32 checksum (calculated over magic..encoder)
    pub crc: u32,
}

impl Default for EncoderCalibration {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl EncoderCalibration {
    /// Wrap a calibration with a valid header and checksum
    pub fn new(encoder: EncoderConfig) -> Self {
        let mut record = Self {
            magic: CALIBRATION_MAGIC,
            version: CALIBRATION_VERSION,
            encoder,
            crc: 0,
        };
        record.update_crc();
        record
    }

    /// Check magic, version and checksum
    pub fn check(&self) -> Result<(), CalibrationError> {
        if self.magic != CALIBRATION_MAGIC {
            return Err(CalibrationError::BadMagic);
        }
        if self.version != CALIBRATION_VERSION {
            return Err(CalibrationError::BadVersion);
        }
        if !self.verify_crc() {
            return Err(CalibrationError::BadCrc);
        }
        Ok(())
    }

    /// Calculate CRC32 for the data (excluding the crc field itself)
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFF_FFFF;

        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);
        crc = crc32_update(crc, &self.encoder.distance_per_tick.to_bits().to_le_bytes());
        crc = crc32_update(crc, &[self.encoder.inverted as u8]);
        crc = crc32_update(crc, &self.encoder.ticks_per_revolution.to_le_bytes());

        !crc
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Encode into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], CalibrationError> {
        postcard::to_slice(self, buf).map_err(|_| CalibrationError::Codec)
    }

    /// Decode and validate a record
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, CalibrationError> {
        let record: Self = postcard::from_bytes(bytes).map_err(|_| CalibrationError::Codec)?;
        record.check()?;
        Ok(record)
    }
}

/// Simple CRC32 update function (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
