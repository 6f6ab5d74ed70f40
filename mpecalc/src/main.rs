mod options;

use anyhow::Error as AnyError;
use clap::Parser;
use log::info;
use mpe::{exposure_limits, DutyCycle, Environment, Exposure, ExposureCalculator, ExposureLimits};
use options::{Cli, Command as CliCmd};
use serde::Serialize;

fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();

    env_logger::init();

    match cli.cmd {
        CliCmd::Text => print_text(&evaluate(&cli)?),
        CliCmd::Json => print_json(&evaluate(&cli)?)?,
        CliCmd::Limits => print_limits(cli.freq, &exposure_limits(cli.freq)?)?,
    };
    Ok(())
}

fn evaluate(cli: &Cli) -> Result<Exposure, AnyError> {
    let Cli {
        power,
        mode_duty_cycle,
        tx,
        rx,
        gain,
        freq,
        controlled,
        no_ground_reflection,
        ..
    } = *cli;

    let environment = Environment::from_controlled(controlled);
    info!("evaluating {power} W at {freq} MHz, {tx} min tx / {rx} min rx, {environment:?}");

    let exposure = ExposureCalculator::builder()
        .power(power)
        .mode_duty_cycle(mode_duty_cycle)
        .duty_cycle(DutyCycle::new(tx, rx))
        .gain(gain)
        .freq(freq)
        .environment(environment)
        .ground_reflection(!no_ground_reflection)
        .build()?
        .calculate()?;
    Ok(exposure)
}

fn print_text(exposure: &Exposure) {
    let report = exposure.report();
    println!("Time average:        {:.4}", exposure.time_average);
    println!("Average power:       {:.1} mW", exposure.average_power_mw);
    println!("EIRP:                {:.1} mW", exposure.eirp_mw);
    println!("Ground reflection:   {}", exposure.ground_reflection_factor);
    println!(
        "Max power density:   {} mW/cm²",
        report.max_allowed_power_density
    );
    println!(
        "Min safe distance:   {} ft ({:.1} cm)",
        report.min_safe_distance_in_feet, exposure.min_safe_distance_cm
    );
}

fn print_json(exposure: &Exposure) -> Result<(), AnyError> {
    println!("{}", report_json(exposure)?);
    Ok(())
}

fn report_json(exposure: &Exposure) -> Result<String, AnyError> {
    Ok(serde_json::to_string(&exposure.report())?)
}

fn print_limits(freq: f64, limits: &ExposureLimits) -> Result<(), AnyError> {
    println!("{}", limits_json(freq, limits)?);
    Ok(())
}

fn limits_json(freq: f64, limits: &ExposureLimits) -> Result<String, AnyError> {
    #[derive(Serialize)]
    struct JsonEntry<'a> {
        freq_mhz: f64,
        #[serde(flatten)]
        limits: &'a ExposureLimits,
    }

    Ok(serde_json::to_string(&JsonEntry { freq_mhz: freq, limits })?)
}
