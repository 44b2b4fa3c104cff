pub mod calculations;
pub mod config;
pub mod models;
pub mod tables;

pub use calculations::{CalculationError, SimplesCalculator};
pub use config::{CalculatorConfig, CeilingPolicy, FACTOR_R_THRESHOLD};
pub use models::*;
