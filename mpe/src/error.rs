use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MpeError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("no exposure limits defined below 0.3 MHz, got {0} MHz")]
    BelowLimits(f64),

    #[error("no exposure limits defined above 100 GHz, got {0} MHz")]
    AboveLimits(f64),

    #[error("duty cycle has zero length (tx + rx == 0)")]
    EmptyDutyCycle,
}
