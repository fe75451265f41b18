//! Climate sensor drivers

mod hts221;

pub use hts221::{Hts221, HTS221_ADDRESS};
