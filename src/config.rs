//! Command line surface and the resolved configuration of one run.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;
use clap::Parser;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::aggregate::{parse_event, AggregateOptions};
use crate::error::{Result, SmartPlotError};
use crate::export::ValueKind;
use crate::parsers::types::ParseOptions;
use crate::settings::UserSettings;

/// What gets written
#[derive(AsRefStr, Clone, Copy, Debug, Default, EnumString, PartialEq, Eq, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum OutputKind {
    /// One multi-page PDF document
    #[default]
    #[strum(serialize = "PDF")]
    #[serde(rename = "PDF")]
    Pdf,
    /// One PNG image per attribute
    #[strum(serialize = "PNG")]
    #[serde(rename = "PNG")]
    Png,
}

impl OutputKind {
    /// Output path used when neither the command line nor settings name one
    pub fn default_output(&self) -> PathBuf {
        match self {
            OutputKind::Pdf => PathBuf::from("report.pdf"),
            OutputKind::Png => PathBuf::from("."),
        }
    }
}

/// Which values of each attribute are plotted
#[derive(AsRefStr, Clone, Copy, Debug, Default, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ValueSelection {
    Raw,
    Normalized,
    #[default]
    Both,
}

impl ValueSelection {
    /// Panels in drawing order, top to bottom
    pub fn kinds(&self) -> &'static [ValueKind] {
        match self {
            ValueSelection::Raw => &[ValueKind::Raw],
            ValueSelection::Normalized => &[ValueKind::Normalized],
            ValueSelection::Both => &[ValueKind::Raw, ValueKind::Normalized],
        }
    }
}

/// Plot S.M.A.R.T. attribute logs written by smartd
#[derive(Debug, Parser)]
#[command(name = "smartplot")]
#[command(about = "Plot S.M.A.R.T. attribute logs written by smartd (--attributelog)")]
#[command(version)]
pub struct Cli {
    /// Attribute log file to read
    pub input: PathBuf,

    /// Write the PDF report to FILE (PNG: directory for the images)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format: PDF or PNG
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Mark an event in all charts (format: DD.MM.YYYY-HH:MM)
    #[arg(short, long, value_name = "DATE")]
    pub event: Option<String>,

    /// Only handle the last DAYS days until now
    #[arg(short = 'd', long = "days", value_name = "DAYS")]
    pub days: Option<u32>,

    /// Interpret read and seek error rates with the Seagate calculation
    #[arg(short, long)]
    pub seagate: bool,

    /// Only plot this attribute id (repeatable)
    #[arg(short, long = "attribute", value_name = "ID")]
    pub attributes: Vec<u8>,

    /// Values to plot: raw, normalized or both
    #[arg(long, value_name = "KIND")]
    pub values: Option<String>,

    /// Read settings from FILE instead of the user config directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Store format, output, and Seagate mode of this run as defaults
    #[arg(long)]
    pub save_settings: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Fully resolved parameters of one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: OutputKind,
    pub window_days: Option<u32>,
    pub event: Option<NaiveDateTime>,
    pub seagate: bool,
    pub values: ValueSelection,
    pub attributes: Option<Vec<u8>>,
    pub author: String,
}

impl RunConfig {
    /// Command line values win over settings, settings over built-in defaults.
    pub fn resolve(cli: &Cli, settings: &UserSettings) -> Result<Self> {
        let kind = match &cli.format {
            Some(text) => OutputKind::from_str(text).map_err(|_| {
                SmartPlotError::InvalidRunParameter(format!(
                    "invalid output format {:?} (expected PDF or PNG)",
                    text
                ))
            })?,
            None => settings.default_format,
        };

        let values = match &cli.values {
            Some(text) => ValueSelection::from_str(text).map_err(|_| {
                SmartPlotError::InvalidRunParameter(format!(
                    "invalid value selection {:?} (expected raw, normalized or both)",
                    text
                ))
            })?,
            None => ValueSelection::default(),
        };

        let event = cli.event.as_deref().map(parse_event).transpose()?;

        let output = cli
            .output
            .clone()
            .or_else(|| settings.default_output.clone())
            .unwrap_or_else(|| kind.default_output());

        let attributes = if cli.attributes.is_empty() {
            None
        } else {
            Some(cli.attributes.clone())
        };

        Ok(Self {
            input: cli.input.clone(),
            output,
            kind,
            window_days: cli.days,
            event,
            seagate: cli.seagate || settings.seagate,
            values,
            attributes,
            author: settings.author.clone(),
        })
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            window_days: self.window_days,
            seagate: self.seagate,
        }
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            event: self.event,
            attributes: self.attributes.clone(),
        }
    }

    /// File name of the input, as shown in reports
    pub fn source_name(&self) -> String {
        file_name(&self.input)
    }

    /// Settings that would reproduce this run's format, output and mode
    pub fn to_settings(&self, base: &UserSettings) -> UserSettings {
        UserSettings {
            default_format: self.kind,
            default_output: Some(self.output.clone()),
            seagate: self.seagate,
            ..base.clone()
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
