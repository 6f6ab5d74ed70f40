use clap::{Parser, Subcommand};

/// Evaluate transmitter RF exposure against FCC MPE limits.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Transmitter output power, in watts.
    #[arg(short, long, default_value_t = 100.0)]
    pub power: f64,

    /// Fraction of time the radio is keyed at all, independent of the
    /// tx/rx split.
    #[arg(short, long, default_value_t = 1.0)]
    pub mode_duty_cycle: f64,

    /// Minutes transmitting per cycle.
    #[arg(long, default_value_t = 1.0)]
    pub tx: f64,

    /// Minutes receiving per cycle.
    #[arg(long, default_value_t = 1.0)]
    pub rx: f64,

    /// Antenna gain, in dBi.
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub gain: f64,

    /// Operating frequency, in MHz.
    #[arg(short, long)]
    pub freq: f64,

    /// Evaluate for a controlled (occupational) environment.
    #[arg(short, long, default_value_t = false)]
    pub controlled: bool,

    /// Assume free space instead of worst case ground reflections.
    #[arg(long, default_value_t = false)]
    pub no_ground_reflection: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print a human readable summary.
    Text,

    /// Print the exposure report as JSON.
    Json,

    /// Print the controlled and uncontrolled limits for `--freq`.
    Limits,
}
