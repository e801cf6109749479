use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};
use tracing::debug;
use weather_core::{
    Config, DEFAULT_REPORT_FILE, OpenWeatherProvider, Report, WeatherProvider, fetch_batch,
    load_api_key,
};

use crate::prompt::{Prompt, Request, read_request};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather for a list of cities, with a saved report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an OpenWeatherMap API key in the config file.
    Configure,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Comma-separated city names. Prompted for when absent.
    #[arg(long)]
    pub cities: Option<String>,

    /// metric, imperial or standard. Prompted for when absent.
    #[arg(long)]
    pub unit: Option<String>,

    /// Where to write the report.
    #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => self.report.run().await,
        }
    }
}

impl ReportArgs {
    async fn run(self) -> Result<()> {
        run_report(
            self,
            connect_openweather,
            io::stdin().lock(),
            &mut io::stdout(),
            &mut io::stderr(),
        )
        .await
    }
}

fn connect_openweather() -> Result<OpenWeatherProvider> {
    let api_key = load_api_key()?;
    OpenWeatherProvider::new(api_key).context("Failed to build HTTP client")
}

/// Read the request, fetch every city, print the results and save the report.
///
/// `connect` runs only once the input is valid, so bad input never loads the
/// API key or reaches the network.
pub async fn run_report<P, F, R, O, E>(
    args: ReportArgs,
    connect: F,
    input: R,
    out: &mut O,
    err: &mut E,
) -> Result<()>
where
    P: WeatherProvider,
    F: FnOnce() -> Result<P>,
    R: BufRead,
    O: Write,
    E: Write,
{
    let Request { cities, unit } = {
        let mut prompt = Prompt::new(input, &mut *out);
        read_request(&mut prompt, args.cities, args.unit)?
    };
    debug!(count = cities.len(), %unit, "input accepted");

    let provider = connect()?;

    let batch = fetch_batch(&provider, &cities, unit).await;
    for line in batch.diagnostics() {
        writeln!(err, "{line}")?;
    }
    err.flush()?;

    let Some(report) = Report::new(&batch.records) else {
        writeln!(
            out,
            "No weather data was retrieved. Please check your city names and try again."
        )?;
        return Ok(());
    };

    report.write_console(out)?;
    out.flush()?;

    report.save(&args.output)?;
    writeln!(out, "\nWeather report has been saved to {}", args.output.display())?;

    Ok(())
}

fn configure() -> Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(inquire::required!("API key must not be empty"))
        .prompt()
        .context("Failed to read API key")?;

    let mut cfg = Config::load()?;
    cfg.set_api_key(api_key.trim().to_string());
    let path = cfg.save()?;

    println!("API key saved to {}", path.display());
    Ok(())
}
