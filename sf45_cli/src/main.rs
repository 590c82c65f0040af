mod cli;
mod output;
mod serial;

use clap::Parser;
use simple_eyre::Result;
use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

use cli::*;
use serial::SerialConf;
use lwnx::{Session, SessionConfig};

const STARTED_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

fn main() -> Result<()> {
    simple_eyre::install()?;
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match &cli.command {
        Commands::Info(conf) => get_info(conf),
        Commands::Log(conf) => log_readings(conf),
        Commands::StopStream(conf) => stop_stream(conf),
    }
}

/// Returns std::io::Write stream with coloring enabled if program is run interactively
fn get_stdout() -> StandardStream {
    StandardStream::stdout(if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    })
}

fn get_info(conf: &InfoConf) -> Result<()> {
    let mut lwnx = conf.serial.open_lwnx()?;
    let info = lwnx.product_info(Duration::from_millis(conf.query_timeout_ms))?;
    println!("{}", info);
    Ok(())
}

fn log_readings(conf: &LogConf) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || {
        log::info!("Interrupted, stopping");
        handler_flag.store(false, Ordering::SeqCst);
    })?;

    let lwnx = conf.serial.open_lwnx()?;
    let sink = conf.output.create_log()?;
    let config = SessionConfig {
        update_rate: conf.update_rate.code(),
        pace: Duration::from_millis(conf.pace_ms),
        ..SessionConfig::default()
    };
    let mut session = Session::new(lwnx, sink, config);

    let mut stdout = get_stdout();
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(
        &mut stdout,
        "Logging at {} from {}, press Ctrl+C to stop.",
        conf.update_rate,
        OffsetDateTime::now_utc().format(STARTED_FORMAT)?
    )?;
    stdout.reset()?;

    let summary = session.run(&running)?;

    if summary.misses > 0 {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    }
    writeln!(
        &mut stdout,
        "Saved {} readings to {:?}, {} without a valid reading.",
        summary.readings, conf.output.output, summary.misses
    )?;
    stdout.reset()?;
    Ok(())
}

fn stop_stream(conf: &SerialConf) -> Result<()> {
    let mut lwnx = conf.open_lwnx()?;
    lwnx.set_stream_enable(false, SessionConfig::default().command_timeout)?;
    println!("Streaming disabled.");
    Ok(())
}
