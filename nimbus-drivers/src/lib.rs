//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in nimbus-core for the clock's peripherals:
//!
//! - RGB-backlit 16x2 character LCD (AiP31068 controller + PCA9633 LED driver)
//! - HTS221 temperature/humidity sensor
//! - GPIO status LED
//!
//! All drivers are written against `embedded-hal` 1.0 blocking traits.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod display;
pub mod indicator;
pub mod sensor;

#[cfg(test)]
mod mock;
