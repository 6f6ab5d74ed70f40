use crate::limits::ExposureLimits;
use num_traits::{Float, FromPrimitive};

/// Regulatory exposure classification of the people near a
/// transmitter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Occupational exposure; people are aware of and can control
    /// their exposure.
    Controlled,

    /// General population exposure.
    #[default]
    Uncontrolled,
}

impl Environment {
    /// Returns the environment for a "controlled" flag.
    pub fn from_controlled(controlled: bool) -> Self {
        if controlled {
            Environment::Controlled
        } else {
            Environment::Uncontrolled
        }
    }

    /// Time window (minutes) over which exposure is averaged.
    pub fn averaging_interval_min<T>(self) -> T
    where
        T: Float + FromPrimitive,
    {
        match self {
            Environment::Controlled => crate::math::lit(6.0),
            Environment::Uncontrolled => crate::math::lit(30.0),
        }
    }

    /// Picks this environment's limit.
    pub fn select<T>(self, limits: ExposureLimits<T>) -> T {
        match self {
            Environment::Controlled => limits.controlled,
            Environment::Uncontrolled => limits.uncontrolled,
        }
    }
}
