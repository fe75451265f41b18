//! HTS221 capacitive temperature/humidity sensor
//!
//! Each part is factory-calibrated: two reference points for temperature
//! and humidity are stored in registers 0x30..0x3F, and raw ADC output is
//! converted by linear interpolation between them.

use embedded_hal::i2c::I2c;
use nimbus_core::traits::{ClimateReading, ClimateSensor, SensorError};

/// Fixed 7-bit bus address
pub const HTS221_ADDRESS: u8 = 0x5F;

const WHO_AM_I: u8 = 0x0F;
const DEVICE_ID: u8 = 0xBC;
const CTRL_REG1: u8 = 0x20;
const STATUS_REG: u8 = 0x27;
const HUMIDITY_OUT_L: u8 = 0x28;
const CALIB_START: u8 = 0x30;

/// Register address flag for multi-byte reads
const AUTO_INCREMENT: u8 = 0x80;

/// Powered on, block data update, 1 Hz output rate
const CTRL_REG1_RUN: u8 = 0x85;

const STATUS_T_DA: u8 = 0x01;
const STATUS_H_DA: u8 = 0x02;

/// Reference points read once from the calibration block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Calibration {
    h0_rh_x2: i32,
    h1_rh_x2: i32,
    t0_degc_x8: i32,
    t1_degc_x8: i32,
    h0_t0_out: i32,
    h1_t0_out: i32,
    t0_out: i32,
    t1_out: i32,
}

impl Calibration {
    fn parse(raw: &[u8; 16]) -> Self {
        let word = |at: usize| i32::from(i16::from_le_bytes([raw[at], raw[at + 1]]));
        let msb = raw[5];

        Self {
            h0_rh_x2: i32::from(raw[0]),
            h1_rh_x2: i32::from(raw[1]),
            t0_degc_x8: (i32::from(msb & 0x03) << 8) | i32::from(raw[2]),
            t1_degc_x8: (i32::from(msb & 0x0C) << 6) | i32::from(raw[3]),
            h0_t0_out: word(6),
            h1_t0_out: word(10),
            t0_out: word(12),
            t1_out: word(14),
        }
    }

    /// Temperature in 0.1°C from raw output
    fn temperature(&self, raw: i16) -> Result<i16, SensorError> {
        let span = i64::from(self.t1_out - self.t0_out);
        if span == 0 {
            return Err(SensorError::NotPresent);
        }
        let offset = i64::from(i32::from(raw) - self.t0_out);
        let slope = i64::from(self.t1_degc_x8 - self.t0_degc_x8);
        let x10 = (i64::from(self.t0_degc_x8) * span + offset * slope) * 10 / (8 * span);
        Ok(x10.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16)
    }

    /// Relative humidity in 0.1% from raw output, clamped to 0..=100%
    fn humidity(&self, raw: i16) -> Result<u16, SensorError> {
        let span = i64::from(self.h1_t0_out - self.h0_t0_out);
        if span == 0 {
            return Err(SensorError::NotPresent);
        }
        let offset = i64::from(i32::from(raw) - self.h0_t0_out);
        let slope = i64::from(self.h1_rh_x2 - self.h0_rh_x2);
        let x10 = (i64::from(self.h0_rh_x2) * span + offset * slope) * 10 / (2 * span);
        Ok(x10.clamp(0, 1000) as u16)
    }
}

/// HTS221 on a blocking I2C bus
///
/// The device is probed and calibrated on the first read, so a sensor
/// that is missing at boot can still come up later.
pub struct Hts221<I2C> {
    i2c: I2C,
    calibration: Option<Calibration>,
    last: Option<ClimateReading>,
}

impl<I2C: I2c> Hts221<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            calibration: None,
            last: None,
        }
    }

    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        self.i2c
            .write_read(HTS221_ADDRESS, &[start | AUTO_INCREMENT], buf)
            .map_err(|_| SensorError::Bus)
    }

    fn init(&mut self) -> Result<Calibration, SensorError> {
        let mut id = [0u8; 1];
        self.read_registers(WHO_AM_I, &mut id)?;
        if id[0] != DEVICE_ID {
            return Err(SensorError::NotPresent);
        }

        self.i2c
            .write(HTS221_ADDRESS, &[CTRL_REG1, CTRL_REG1_RUN])
            .map_err(|_| SensorError::Bus)?;

        let mut raw = [0u8; 16];
        self.read_registers(CALIB_START, &mut raw)?;
        let calibration = Calibration::parse(&raw);
        self.calibration = Some(calibration);
        Ok(calibration)
    }
}

impl<I2C: I2c> ClimateSensor for Hts221<I2C> {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let calibration = match self.calibration {
            Some(c) => c,
            None => self.init()?,
        };

        let mut status = [0u8; 1];
        self.read_registers(STATUS_REG, &mut status)?;
        if status[0] & (STATUS_T_DA | STATUS_H_DA) == 0 {
            // Output rate is 1 Hz; between samples report the previous one
            return self.last.ok_or(SensorError::NotReady);
        }

        let mut out = [0u8; 4];
        self.read_registers(HUMIDITY_OUT_L, &mut out)?;
        let humidity_raw = i16::from_le_bytes([out[0], out[1]]);
        let temp_raw = i16::from_le_bytes([out[2], out[3]]);

        let reading = ClimateReading {
            temp_c_x10: calibration.temperature(temp_raw)?,
            humidity_x10: calibration.humidity(humidity_raw)?,
        };
        self.last = Some(reading);
        Ok(reading)
    }
}
