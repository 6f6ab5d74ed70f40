//! # RF Exposure
//!
//! `mpe` evaluates transmitter RF exposure against the FCC's maximum
//! permissible exposure (MPE) limits and derives the minimum safe
//! distance from the antenna.
//!
//! ```
//! use mpe::{calculate_rf_exposure, DutyCycle, Environment, ExposureOptions};
//!
//! let options = ExposureOptions {
//!     environment: Environment::Controlled,
//!     ..ExposureOptions::default()
//! };
//! let exposure =
//!     calculate_rf_exposure(1.0, 1.0, DutyCycle::new(6.0, 0.0), 0.0, 100.0, options).unwrap();
//! assert_eq!(exposure.report().min_safe_distance_in_feet, "0.4683");
//! ```

pub mod duty;
mod environment;
mod error;
pub mod exposure;
pub mod limits;
mod math;

pub use crate::{
    duty::{time_average_percent, DutyCycle},
    environment::Environment,
    error::MpeError,
    exposure::{
        calculate_rf_exposure, Exposure, ExposureCalculator, ExposureCalculatorBuilder,
        ExposureOptions, ExposureReport,
    },
    limits::{exposure_limits, ExposureLimits},
};
