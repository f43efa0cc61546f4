use anyhow::{anyhow, Result};
use log::{debug, LevelFilter};
use std::path::Path;
use std::process;
use std::str::FromStr;

use otp_window::cmd;
use otp_window::config::Settings;
use otp_window::writer::OtpWriter;
use otp_window::Clock;

fn main() -> Result<()> {
    let matches = cmd::app().get_matches();

    let settings = match matches.value_of("config") {
        Some(path) => Settings::load(Path::new(path))?,
        None => Settings::load_default()?,
    };
    init_logger(&settings)?;
    debug!("settings: {:?}", settings);

    let totp = settings.totp();
    let mut writer = OtpWriter::new();

    if !cmd::run(&matches, &totp, &Clock::new(), &mut writer) {
        process::exit(1);
    }

    Ok(())
}

fn init_logger(settings: &Settings) -> Result<()> {
    let level = LevelFilter::from_str(&settings.log_level)
        .map_err(|_| anyhow!("unknown log level \"{}\"", settings.log_level))?;
    simple_logger::SimpleLogger::new().with_level(level).init()?;
    Ok(())
}
