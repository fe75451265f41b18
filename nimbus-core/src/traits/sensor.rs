//! Climate sensor trait

/// Errors that can occur when reading the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transfer failed
    Bus,
    /// Device did not identify as expected
    NotPresent,
    /// No new sample since power-up
    NotReady,
}

/// One temperature/humidity sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Temperature in 0.1°C units
    pub temp_c_x10: i16,
    /// Relative humidity in 0.1% units
    pub humidity_x10: u16,
}

/// Temperature and humidity source
pub trait ClimateSensor {
    fn read(&mut self) -> Result<ClimateReading, SensorError>;
}
