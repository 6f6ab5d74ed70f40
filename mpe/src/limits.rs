//! FCC maximum permissible exposure limits (47 CFR § 1.1310, Table 1).

use crate::{
    error::MpeError,
    math::{as_f64, lit},
};
use log::trace;
use num_traits::{Float, FromPrimitive};

/// Lowest frequency, in MHz, with defined exposure limits.
pub const MIN_FREQ_MHZ: f64 = 0.3;

/// Highest frequency, in MHz, with defined exposure limits.
pub const MAX_FREQ_MHZ: f64 = 100_000.0;

/// Power density limits (mW/cm²) for a single frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureLimits<T = f64> {
    /// Occupational/controlled exposure limit.
    pub controlled: T,

    /// General population/uncontrolled exposure limit.
    pub uncontrolled: T,
}

/// How a band's limit varies with frequency `f` (MHz).
#[derive(Debug, Clone, Copy)]
enum Density {
    /// A constant limit.
    Flat(f64),
    /// `k / f²`
    InverseSquare(f64),
    /// `f / k`
    Proportional(f64),
}

impl Density {
    fn at<T>(self, f_mhz: T) -> T
    where
        T: Float + FromPrimitive,
    {
        match self {
            Density::Flat(k) => lit(k),
            Density::InverseSquare(k) => lit::<T>(k) / f_mhz.powi(2),
            Density::Proportional(k) => f_mhz / lit(k),
        }
    }
}

struct Band {
    low_mhz: f64,
    high_mhz: f64,
    /// Whether `high_mhz` itself belongs to this band.
    closed: bool,
    controlled: Density,
    uncontrolled: Density,
}

impl Band {
    fn contains<T>(&self, f_mhz: T) -> bool
    where
        T: Float + FromPrimitive,
    {
        let (low, high) = (lit::<T>(self.low_mhz), lit::<T>(self.high_mhz));
        f_mhz >= low && (f_mhz < high || (self.closed && f_mhz <= high))
    }
}

const BANDS: [Band; 6] = [
    Band {
        low_mhz: MIN_FREQ_MHZ,
        high_mhz: 1.34,
        closed: false,
        controlled: Density::Flat(100.0),
        uncontrolled: Density::Flat(100.0),
    },
    Band {
        low_mhz: 1.34,
        high_mhz: 3.0,
        closed: false,
        controlled: Density::Flat(100.0),
        uncontrolled: Density::InverseSquare(180.0),
    },
    Band {
        low_mhz: 3.0,
        high_mhz: 30.0,
        closed: false,
        controlled: Density::InverseSquare(900.0),
        uncontrolled: Density::InverseSquare(180.0),
    },
    Band {
        low_mhz: 30.0,
        high_mhz: 300.0,
        closed: false,
        controlled: Density::Flat(1.0),
        uncontrolled: Density::Flat(0.2),
    },
    Band {
        low_mhz: 300.0,
        high_mhz: 1500.0,
        closed: false,
        controlled: Density::Proportional(300.0),
        uncontrolled: Density::Proportional(1500.0),
    },
    Band {
        low_mhz: 1500.0,
        high_mhz: MAX_FREQ_MHZ,
        closed: true,
        controlled: Density::Flat(5.0),
        uncontrolled: Density::Flat(1.0),
    },
];

/// Returns the controlled and uncontrolled power density limits
/// (mW/cm²) for `f_mhz`.
///
/// # Errors
///
/// Fails for frequencies outside of `[0.3, 100_000]` MHz, where the
/// FCC does not define limits.
pub fn exposure_limits<T>(f_mhz: T) -> Result<ExposureLimits<T>, MpeError>
where
    T: Float + FromPrimitive,
{
    if f_mhz < lit(MIN_FREQ_MHZ) {
        return Err(MpeError::BelowLimits(as_f64(f_mhz)));
    }

    let band = BANDS
        .iter()
        .find(|band| band.contains(f_mhz))
        .ok_or_else(|| MpeError::AboveLimits(as_f64(f_mhz)))?;

    trace!(
        "{} MHz falls in band [{}, {}{}",
        as_f64(f_mhz),
        band.low_mhz,
        band.high_mhz,
        if band.closed { "]" } else { ")" }
    );

    Ok(ExposureLimits {
        controlled: band.controlled.at(f_mhz),
        uncontrolled: band.uncontrolled.at(f_mhz),
    })
}

#[cfg(test)]
mod tests {
    use super::{exposure_limits, ExposureLimits, MAX_FREQ_MHZ, MIN_FREQ_MHZ};
    use crate::MpeError;
    use approx::assert_relative_eq;

    fn assert_limits(f_mhz: f64, controlled: f64, uncontrolled: f64) {
        let ExposureLimits {
            controlled: c,
            uncontrolled: u,
        } = exposure_limits(f_mhz).unwrap();
        assert_relative_eq!(c, controlled, epsilon = 1e-12);
        assert_relative_eq!(u, uncontrolled, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(exposure_limits(0.299), Err(MpeError::BelowLimits(0.299)));
        assert_eq!(exposure_limits(-1.0), Err(MpeError::BelowLimits(-1.0)));
        assert_eq!(
            exposure_limits(100_000.001),
            Err(MpeError::AboveLimits(100_000.001))
        );
        assert!(matches!(
            exposure_limits(f64::NAN),
            Err(MpeError::AboveLimits(_))
        ));
    }

    #[test]
    fn test_range_edges() {
        assert_limits(MIN_FREQ_MHZ, 100.0, 100.0);
        assert_limits(MAX_FREQ_MHZ, 5.0, 1.0);
    }

    #[test]
    fn test_bands() {
        assert_limits(1.0, 100.0, 100.0);
        assert_limits(2.0, 100.0, 45.0);
        assert_limits(10.0, 9.0, 1.8);
        assert_limits(100.0, 1.0, 0.2);
        assert_limits(146.52, 1.0, 0.2);
        assert_limits(1000.0, 1000.0 / 300.0, 1000.0 / 1500.0);
        assert_limits(2400.0, 5.0, 1.0);
    }

    #[test]
    fn test_band_edges_are_half_open() {
        // Lower edge belongs to the upper band.
        assert_limits(1.34, 100.0, 180.0 / (1.34 * 1.34));
        assert_limits(3.0, 100.0, 20.0);
        assert_limits(30.0, 1.0, 0.2);
        assert_limits(300.0, 1.0, 0.2);
        assert_limits(1500.0, 5.0, 1.0);
    }

    #[test]
    fn test_1000_mhz_rounded() {
        let limits = exposure_limits(1000.0).unwrap();
        assert_eq!(format!("{:.4}", limits.controlled), "3.3333");
        assert_eq!(format!("{:.4}", limits.uncontrolled), "0.6667");
    }

    #[test]
    fn test_f32() {
        let limits = exposure_limits(10.0_f32).unwrap();
        assert_relative_eq!(limits.controlled, 9.0_f32);
        assert_relative_eq!(limits.uncontrolled, 1.8_f32);
    }
}
