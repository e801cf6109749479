use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};
use tracing::debug;

use crate::{Weather, analysis::Summary};

pub const DEFAULT_REPORT_FILE: &str = "weather_report.txt";

/// A non-empty batch together with its highest/lowest summary.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    records: &'a [Weather],
    summary: Summary<'a>,
}

impl<'a> Report<'a> {
    /// `None` when there is nothing to report.
    pub fn new(records: &'a [Weather]) -> Option<Self> {
        Summary::of(records).map(|summary| Self { records, summary })
    }

    pub fn summary(&self) -> Summary<'a> {
        self.summary
    }

    /// Console form: the data blocks followed by the analysis.
    pub fn write_console<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nWeather Data:")?;
        for weather in self.records {
            writeln!(out, "{weather}")?;
        }
        write!(out, "\nAnalysis:\n{}", self.summary)
    }

    /// File form: a header, the data blocks, then the analysis.
    pub fn write_file_body<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Weather Report\n")?;
        for weather in self.records {
            writeln!(out, "{weather}")?;
        }
        write!(out, "\nAnalysis:\n{}", self.summary)
    }

    /// Write the report to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        let mut out = BufWriter::new(file);

        self.write_file_body(&mut out)
            .and_then(|()| out.flush())
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;

        debug!(path = %path.display(), "report saved");
        Ok(())
    }
}
