//! Time averaging of a repeating transmit/receive cycle.

use crate::{error::MpeError, math::as_f64};
use log::trace;
use num_traits::Float;

/// One repetition of a transmit/receive pattern, in minutes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DutyCycle<T = f64> {
    /// Time spent transmitting (minutes).
    pub tx_min: T,

    /// Time spent receiving (minutes).
    pub rx_min: T,
}

impl<T: Float> DutyCycle<T> {
    pub fn new(tx_min: T, rx_min: T) -> Self {
        Self { tx_min, rx_min }
    }

    /// A transmitter that never stops transmitting.
    pub fn continuous() -> Self {
        Self {
            tx_min: T::infinity(),
            rx_min: T::zero(),
        }
    }

    /// Length of one complete tx + rx cycle (minutes).
    pub fn cycle_min(&self) -> T {
        self.tx_min + self.rx_min
    }

    /// See [`time_average_percent`].
    pub fn time_average(&self, interval_min: T) -> Result<T, MpeError> {
        time_average_percent(self.tx_min, self.rx_min, interval_min)
    }
}

/// Returns the fraction (`0.0..=1.0`) of `interval_min` spent
/// transmitting when repeating a `tx_min` on, `rx_min` off cycle from
/// the start of the interval.
///
/// A trailing partial cycle contributes transmit time up to the
/// lesser of its length and `tx_min`.
///
/// # Errors
///
/// Returns [`MpeError::EmptyDutyCycle`] when `tx_min + rx_min` is zero
/// and `tx_min` alone does not already cover the interval.
pub fn time_average_percent<T: Float>(tx_min: T, rx_min: T, interval_min: T) -> Result<T, MpeError> {
    let cycle = tx_min + rx_min;

    if tx_min >= interval_min {
        return Ok(T::one());
    }

    if cycle >= interval_min {
        return Ok(tx_min / interval_min);
    }

    if cycle == T::zero() {
        return Err(MpeError::EmptyDutyCycle);
    }

    let complete_cycles = (interval_min / cycle).floor();
    let tx_from_cycles = complete_cycles * tx_min;
    let remainder = interval_min % cycle;

    trace!(
        "{} complete cycles, {} min remainder in {} min",
        as_f64(complete_cycles),
        as_f64(remainder),
        as_f64(interval_min)
    );

    let tx_total = if tx_min > remainder {
        tx_from_cycles + remainder
    } else {
        tx_from_cycles + tx_min
    };
    Ok(tx_total / interval_min)
}

#[cfg(test)]
mod tests {
    use super::{time_average_percent, DutyCycle};
    use crate::MpeError;
    use approx::assert_relative_eq;

    #[test]
    fn test_tx_longer_than_interval() {
        assert_eq!(time_average_percent(10.0, 0.0, 6.0), Ok(1.0));
        assert_eq!(time_average_percent(6.0, 0.0, 6.0), Ok(1.0));
        assert_eq!(time_average_percent(30.0, 30.0, 30.0), Ok(1.0));
    }

    #[test]
    fn test_single_cycle_exceeds_interval() {
        assert_eq!(time_average_percent(3.0, 3.0, 4.0), Ok(0.75));
        assert_eq!(time_average_percent(2.0, 4.0, 6.0), Ok(2.0 / 6.0));
    }

    #[test]
    fn test_remainder_shorter_than_tx() {
        // 7 min cycles: 4 complete (16 min tx), 2 min left over.
        assert_relative_eq!(time_average_percent(4.0, 3.0, 30.0).unwrap(), 0.6);
        // No remainder at all.
        assert_relative_eq!(
            time_average_percent(1.0, 2.0, 30.0).unwrap(),
            10.0 / 30.0
        );
    }

    #[test]
    fn test_remainder_holds_full_tx() {
        let avg = time_average_percent(2.0, 2.0, 6.0).unwrap();
        assert_relative_eq!(avg, 4.0 / 6.0);
        assert_eq!(format!("{avg:.4}"), "0.6667");

        // 4 min cycles: 1 complete, 2 min remainder holds the 1 min tx.
        assert_relative_eq!(time_average_percent(1.0, 3.0, 6.0).unwrap(), 2.0 / 6.0);
    }

    #[test]
    fn test_empty_cycle() {
        assert_eq!(
            time_average_percent(0.0, 0.0, 6.0),
            Err(MpeError::EmptyDutyCycle)
        );
        // Zero length interval is trivially covered.
        assert_eq!(time_average_percent(0.0, 0.0, 0.0), Ok(1.0));
    }

    #[test]
    fn test_receive_only() {
        assert_eq!(time_average_percent(0.0, 1.0, 6.0), Ok(0.0));
    }

    #[test]
    fn test_duty_cycle_methods() {
        let duty = DutyCycle::new(2.0_f32, 2.0);
        assert_relative_eq!(duty.cycle_min(), 4.0);
        assert_relative_eq!(duty.time_average(6.0).unwrap(), 4.0 / 6.0);
        assert_eq!(DutyCycle::<f64>::continuous().time_average(30.0), Ok(1.0));
    }
}
