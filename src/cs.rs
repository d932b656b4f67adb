pub mod ecc;
pub mod error;

pub use ecc::ErrorCorrection;
