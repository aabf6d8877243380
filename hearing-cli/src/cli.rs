use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hearing_core::{Conduction, Ear, Frequency};

/// Fill in, preview and export hearing-aid procurement reports.
///
/// The form is saved after every change and restored on the next run.
#[derive(Debug, Parser)]
#[command(name = "hearing-report", version, about)]
pub struct Cli {
    /// TOML settings file. Missing files are ignored.
    #[arg(long, default_value = "hearing-report.toml")]
    pub config: PathBuf,

    /// Storage backend (`sqlite` or `memory`).
    #[arg(long)]
    pub backend: Option<String>,

    /// Database connection string. For SQLite a file path or `:memory:`.
    #[arg(long)]
    pub db: Option<String>,

    /// Key the form is saved under.
    #[arg(long)]
    pub key: Option<String>,

    /// Log filter, a level or any `RUST_LOG` directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Do not write log output to stderr.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the reconciled report.
    Show {
        /// Print the form and preview as JSON instead.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List every field identifier with its current value.
    Fields,
    /// Set one form field, e.g. `set patientName "Ram Singh"`.
    Set { field: String, value: String },
    /// Manage hearing-aid trials.
    #[command(subcommand)]
    Trial(TrialCommand),
    /// Set one audiogram threshold; omit the level to clear it.
    Audiogram {
        #[arg(value_parser = parse_ear)]
        ear: Ear,
        #[arg(value_parser = parse_conduction)]
        conduction: Conduction,
        #[arg(value_parser = parse_frequency)]
        frequency: Frequency,
        #[arg(allow_negative_numbers = true)]
        db: Option<String>,
    },
    /// Delete the saved form.
    Clear,
    /// Print the saved form as JSON.
    Dump,
    /// Replace the form with the JSON in a file.
    Load { file: PathBuf },
    /// Spell out a whole number using Indian numbering.
    Words { value: String },
    /// Diagnosis for air and bone conduction averages.
    Diagnose {
        #[arg(allow_negative_numbers = true)]
        ac: i32,
        #[arg(allow_negative_numbers = true)]
        bc: i32,
    },
    /// Percentage off between MRP and discount price.
    Discount { mrp: String, price: String },
    /// Suggested PDF file name for the report.
    ExportName,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum TrialCommand {
    /// Add a trial; unspecified values start blank.
    Add {
        #[arg(long)]
        model: Option<String>,
        #[arg(long = "type")]
        device_type: Option<String>,
        #[arg(long)]
        fitting: Option<String>,
        #[arg(long)]
        sds: Option<String>,
        #[arg(long)]
        satisfaction: Option<String>,
        #[arg(long)]
        supplier: Option<String>,
    },
    /// Set one value of a trial, e.g. `trial set 2 satisfaction 8`.
    Set { id: u32, field: String, value: String },
    Remove { id: u32 },
    /// List trials in entry order with their ids.
    List,
}

fn parse_ear(s: &str) -> Result<Ear, String> {
    match s.to_ascii_lowercase().as_str() {
        "right" | "r" => Ok(Ear::Right),
        "left" | "l" => Ok(Ear::Left),
        _ => Err(format!("expected right or left, got '{s}'")),
    }
}

fn parse_conduction(s: &str) -> Result<Conduction, String> {
    Conduction::parse(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("expected ac or bc, got '{s}'"))
}

fn parse_frequency(s: &str) -> Result<Frequency, String> {
    s.parse()
        .ok()
        .and_then(Frequency::from_hz)
        .ok_or_else(|| format!("expected one of 250, 500, 1000, 2000, 4000, 8000, got '{s}'"))
}
