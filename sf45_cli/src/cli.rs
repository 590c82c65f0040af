use crate::{output::Output, serial::SerialConf};
use clap::{Args, Parser, Subcommand};
use lwnx::{Error, UpdateRate};
use num_traits::FromPrimitive;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get product name, firmware version and serial number
    Info(InfoConf),
    /// Stream distance readings into a CSV file until interrupted
    Log(LogConf),
    /// Disable streaming on a device that was left streaming
    StopStream(SerialConf),
}

#[derive(Args)]
pub struct InfoConf {
    /// How long to wait for each answer, in milliseconds
    #[clap(long, value_parser, default_value = "100")]
    pub query_timeout_ms: u64,

    #[clap(flatten)]
    pub serial: SerialConf,
}

#[derive(Args)]
pub struct LogConf {
    /// Update rate code, from 1 (50 Hz) up to 12 (5000 Hz)
    #[clap(short, long, value_parser = parse_update_rate, default_value = "1")]
    pub update_rate: UpdateRate,

    /// Delay between readings in milliseconds, 0 reads as fast as the device streams
    #[clap(long, value_parser, default_value = "0")]
    pub pace_ms: u64,

    #[clap(flatten)]
    pub output: Output,

    #[clap(flatten)]
    pub serial: SerialConf,
}

fn parse_update_rate(s: &str) -> Result<UpdateRate, Error> {
    let code: u8 = s
        .parse()
        .map_err(|_| Error::InvalidData("Update rate code is not a number"))?;
    FromPrimitive::from_u8(code).ok_or(Error::InvalidUpdateRate(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_valid_update_rates() {
        assert_eq!(assert_ok!(parse_update_rate("1")), UpdateRate::Hz50);
        assert_eq!(assert_ok!(parse_update_rate("12")), UpdateRate::Hz5000);
    }

    #[test]
    fn reject_invalid_update_rates() {
        assert_matches!(parse_update_rate("0"), Err(Error::InvalidUpdateRate(0)));
        assert_matches!(parse_update_rate("13"), Err(Error::InvalidUpdateRate(13)));
        assert_matches!(parse_update_rate("fast"), Err(Error::InvalidData(_)));
    }

    #[test]
    fn parse_log_defaults() {
        let cli = Cli::parse_from(["sf45", "log"]);
        match cli.command {
            Commands::Log(conf) => {
                assert_eq!(conf.update_rate, UpdateRate::Hz50);
                assert_eq!(conf.pace_ms, 0);
                assert_eq!(conf.output.output.to_str(), Some("sf45b_log.csv"));
                assert_eq!(conf.serial.serial, "/dev/ttyUSB0");
                assert_eq!(conf.serial.baud_rate, 921600);
                assert_eq!(conf.serial.timeout_ms, 100);
            }
            _ => panic!("Expected log subcommand"),
        }
    }
}
