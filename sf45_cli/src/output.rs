use clap::Args;
use lwnx::{LoggedReading, ReadingSink};
use simple_eyre::Result;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

const CSV_HEADER: &str = "timestamp,distance_m,yaw_deg";

#[derive(Args)]
pub struct Output {
    /// Path to a CSV file where readings should be stored, overwritten if it exists
    #[clap(short, long, value_parser, default_value = "sf45b_log.csv", value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Don't print every reading to stdout
    #[clap(short, long)]
    pub quiet: bool,
}

impl Output {
    pub fn create_log(&self) -> Result<CsvLog<BufWriter<File>>> {
        log::debug!("Saving readings to {:?}", self.output);
        let file = File::create(self.output.as_path())?;
        Ok(CsvLog::new(BufWriter::new(file), !self.quiet)?)
    }
}

fn reading_to_csv(reading: &LoggedReading) -> String {
    format!("{},{},{}", reading.timestamp, reading.distance, reading.angle)
}

/// Appends readings as CSV rows, one row per reading
pub struct CsvLog<W: Write> {
    out: W,
    echo: bool,
}

impl<W: Write> CsvLog<W> {
    pub fn new(mut out: W, echo: bool) -> std::io::Result<Self> {
        writeln!(out, "{}", CSV_HEADER)?;
        out.flush()?;
        Ok(CsvLog { out, echo })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReadingSink for CsvLog<W> {
    fn append(&mut self, reading: &LoggedReading) -> lwnx::Result<()> {
        log::trace!("Formatting reading as CSV");
        writeln!(self.out, "{}", reading_to_csv(reading))?;
        if self.echo {
            println!(
                "{:.3}, {:.2} m, {:.2} deg",
                reading.timestamp, reading.distance, reading.angle
            );
        }
        Ok(())
    }

    fn flush(&mut self) -> lwnx::Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
