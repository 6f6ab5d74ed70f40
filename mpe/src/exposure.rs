use crate::{
    duty::DutyCycle,
    environment::Environment,
    error::MpeError,
    limits::{exposure_limits, ExposureLimits},
    math::{as_f64, db_to_ratio, lit},
};
use log::debug;
use num_traits::{Float, FloatConst, FromPrimitive};
use std::fmt;

/// Worst case multiplier for constructive reflection off the ground.
pub const GROUND_REFLECTION_FACTOR: f64 = 0.64;

/// Multiplier for free space propagation.
pub const FREE_SPACE_FACTOR: f64 = 0.25;

const CM_PER_FOOT: f64 = 30.48;

/// Evaluation options with regulatory defaults.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposureOptions {
    /// Defaults to [`Environment::Uncontrolled`].
    pub environment: Environment,

    /// Account for ground reflections (defaults to true).
    pub ground_reflection: bool,
}

impl Default for ExposureOptions {
    fn default() -> Self {
        Self {
            environment: Environment::Uncontrolled,
            ground_reflection: true,
        }
    }
}

impl ExposureOptions {
    /// Returns the ground reflection factor, `Gf`.
    pub fn ground_reflection_factor<T>(&self) -> T
    where
        T: Float + FromPrimitive,
    {
        if self.ground_reflection {
            lit(GROUND_REFLECTION_FACTOR)
        } else {
            lit(FREE_SPACE_FACTOR)
        }
    }
}

/// Outcome of an exposure evaluation, at full precision.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exposure<T = f64> {
    /// Limits for the operating frequency.
    pub limits: ExposureLimits<T>,

    /// The applicable limit for the environment (mW/cm²).
    pub max_power_density: T,

    /// Fraction of the averaging interval spent transmitting.
    pub time_average: T,

    /// Time averaged transmit power (mW).
    pub average_power_mw: T,

    /// Time averaged effective isotropic radiated power (mW).
    pub eirp_mw: T,

    /// Ground reflection multiplier, `Gf` (dimensionless).
    pub ground_reflection_factor: T,

    /// Minimum safe distance from the antenna (cm).
    pub min_safe_distance_cm: T,

    /// Minimum safe distance from the antenna (ft).
    pub min_safe_distance_ft: T,
}

impl<T> Exposure<T>
where
    T: Float + fmt::Display,
{
    /// Renders the headline figures with four fractional digits.
    pub fn report(&self) -> ExposureReport {
        ExposureReport {
            max_allowed_power_density: format!("{:.4}", self.max_power_density),
            min_safe_distance_in_feet: format!("{:.4}", self.min_safe_distance_ft),
        }
    }
}

/// Fixed precision rendering of an [`Exposure`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureReport {
    /// mW/cm²
    pub max_allowed_power_density: String,

    /// feet
    pub min_safe_distance_in_feet: String,
}

impl fmt::Display for ExposureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max allowed power density: {} mW/cm², min safe distance: {} ft",
            self.max_allowed_power_density, self.min_safe_distance_in_feet
        )
    }
}

/// Evaluates RF exposure for a transmitter.
///
/// # Parameters
///
/// - `power_w`: transmitter output power (watts)
/// - `mode_duty_cycle`: fraction of time the radio is keyed at all,
///   independent of the tx/rx split in `duty_cycle` (0.0..=1.0)
/// - `duty_cycle`: repeating transmit/receive pattern (minutes)
/// - `gain_dbi`: antenna gain (dBi)
/// - `f_mhz`: operating frequency (MHz)
/// - `options`: see [`ExposureOptions`]
///
/// # Errors
///
/// Fails when `f_mhz` has no exposure limits or `duty_cycle` has zero
/// length.
pub fn calculate_rf_exposure<T>(
    power_w: T,
    mode_duty_cycle: T,
    duty_cycle: DutyCycle<T>,
    gain_dbi: T,
    f_mhz: T,
    options: ExposureOptions,
) -> Result<Exposure<T>, MpeError>
where
    T: Float + FloatConst + FromPrimitive,
{
    let limits = exposure_limits(f_mhz)?;
    let max_power_density = options.environment.select(limits);
    let ground_reflection_factor = options.ground_reflection_factor::<T>();
    let interval_min = options.environment.averaging_interval_min::<T>();
    let time_average = duty_cycle.time_average(interval_min)?;

    let average_power_mw = lit::<T>(1000.0) * power_w * mode_duty_cycle * time_average;
    let eirp_mw = average_power_mw * db_to_ratio(gain_dbi);
    let min_safe_distance_cm =
        (ground_reflection_factor * eirp_mw / (max_power_density * T::PI())).sqrt();
    let min_safe_distance_ft = min_safe_distance_cm / lit(CM_PER_FOOT);

    debug!(
        "{:?}: limit {} mW/cm², avg {}, eirp {} mW, distance {} cm",
        options.environment,
        as_f64(max_power_density),
        as_f64(time_average),
        as_f64(eirp_mw),
        as_f64(min_safe_distance_cm),
    );

    Ok(Exposure {
        limits,
        max_power_density,
        time_average,
        average_power_mw,
        eirp_mw,
        ground_reflection_factor,
        min_safe_distance_cm,
        min_safe_distance_ft,
    })
}

/// A fully specified exposure evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureCalculator<T = f64> {
    /// Transmitter output power (watts).
    pub power_w: T,

    /// Fraction of time the radio is keyed at all (0.0..=1.0).
    pub mode_duty_cycle: T,

    /// Transmit/receive timing (minutes).
    pub duty_cycle: DutyCycle<T>,

    /// Antenna gain (dBi).
    pub gain_dbi: T,

    /// Operating frequency (MHz).
    pub f_mhz: T,

    pub options: ExposureOptions,
}

impl<T> ExposureCalculator<T>
where
    T: Float,
{
    pub fn builder() -> ExposureCalculatorBuilder<T> {
        ExposureCalculatorBuilder {
            power_w: None,
            mode_duty_cycle: T::one(),
            duty_cycle: None,
            gain_dbi: T::zero(),
            f_mhz: None,
            options: ExposureOptions::default(),
        }
    }

    /// See [`calculate_rf_exposure`].
    pub fn calculate(&self) -> Result<Exposure<T>, MpeError>
    where
        T: FloatConst + FromPrimitive,
    {
        calculate_rf_exposure(
            self.power_w,
            self.mode_duty_cycle,
            self.duty_cycle,
            self.gain_dbi,
            self.f_mhz,
            self.options,
        )
    }
}

pub struct ExposureCalculatorBuilder<T = f64> {
    /// Transmitter power (watts, required).
    power_w: Option<T>,

    /// Fraction of time the radio is keyed at all (0.0..=1.0,
    /// defaults to 1.0).
    mode_duty_cycle: T,

    /// Transmit/receive timing (required).
    duty_cycle: Option<DutyCycle<T>>,

    /// Antenna gain (dBi, defaults to 0).
    gain_dbi: T,

    /// Operating frequency (MHz, required).
    f_mhz: Option<T>,

    options: ExposureOptions,
}

impl<T> ExposureCalculatorBuilder<T>
where
    T: Float,
{
    /// Transmitter power (watts, required).
    #[must_use]
    pub fn power(mut self, watts: T) -> Self {
        self.power_w = Some(watts);
        self
    }

    /// Fraction of time the radio is keyed at all (0.0..=1.0,
    /// defaults to 1.0).
    #[must_use]
    pub fn mode_duty_cycle(mut self, fraction: T) -> Self {
        self.mode_duty_cycle = fraction;
        self
    }

    /// Transmit/receive timing (required).
    #[must_use]
    pub fn duty_cycle(mut self, duty_cycle: DutyCycle<T>) -> Self {
        self.duty_cycle = Some(duty_cycle);
        self
    }

    /// Antenna gain (dBi, defaults to 0).
    #[must_use]
    pub fn gain(mut self, dbi: T) -> Self {
        self.gain_dbi = dbi;
        self
    }

    /// Operating frequency (MHz, required).
    #[must_use]
    pub fn freq(mut self, mhz: T) -> Self {
        self.f_mhz = Some(mhz);
        self
    }

    /// Defaults to [`Environment::Uncontrolled`].
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.options.environment = environment;
        self
    }

    /// Account for ground reflections (defaults to true).
    #[must_use]
    pub fn ground_reflection(mut self, ground_reflection: bool) -> Self {
        self.options.ground_reflection = ground_reflection;
        self
    }

    pub fn build(&self) -> Result<ExposureCalculator<T>, MpeError> {
        let power_w = self.power_w.ok_or(MpeError::Builder("power"))?;
        let duty_cycle = self.duty_cycle.ok_or(MpeError::Builder("duty_cycle"))?;
        let f_mhz = self.f_mhz.ok_or(MpeError::Builder("freq"))?;
        Ok(ExposureCalculator {
            power_w,
            mode_duty_cycle: self.mode_duty_cycle,
            duty_cycle,
            gain_dbi: self.gain_dbi,
            f_mhz,
            options: self.options,
        })
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::{calculate_rf_exposure, ExposureOptions};
    use crate::{DutyCycle, Environment};

    #[test]
    fn test_report_json_keys() {
        let options = ExposureOptions {
            environment: Environment::Controlled,
            ground_reflection: true,
        };
        let exposure =
            calculate_rf_exposure(1.0, 1.0, DutyCycle::new(6.0, 0.0), 0.0, 100.0, options).unwrap();
        assert_eq!(
            serde_json::to_string(&exposure.report()).unwrap(),
            r#"{"max_allowed_power_density":"1.0000","min_safe_distance_in_feet":"0.4683"}"#
        );
    }

    #[test]
    fn test_options_json() {
        let options = ExposureOptions {
            environment: Environment::Controlled,
            ground_reflection: false,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"environment":"controlled","ground_reflection":false}"#);
        assert_eq!(serde_json::from_str::<ExposureOptions>(&json).unwrap(), options);

        // Missing fields fall back to the regulatory defaults.
        assert_eq!(
            serde_json::from_str::<ExposureOptions>("{}").unwrap(),
            ExposureOptions::default()
        );
        assert_eq!(
            serde_json::from_str::<ExposureOptions>(r#"{"environment":"uncontrolled"}"#).unwrap(),
            ExposureOptions::default()
        );
    }
}
