use clap::{arg, command, ArgMatches, Command};

use crate::secret::Secret;
use crate::totp::{unix_time, GetTime, Totp};
use crate::writer::OutErr;

pub mod code;
pub mod demo;
pub mod secret;
pub mod server;
pub mod verify;

pub enum CommandType {
    Secret,
    Code,
    Server,
    Verify,
    Demo,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Secret => "secret",
            CommandType::Code => "code",
            CommandType::Server => "server",
            CommandType::Verify => "verify",
            CommandType::Demo => "demo",
        }
    }
}

pub fn app() -> Command<'static> {
    command!()
        .about("Time-windowed one-time passwords")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            arg!(--config <PATH> "Settings file (default ~/.otp-window/config.toml)")
                .required(false)
                .global(true),
        )
        .subcommands([
            secret::subcommand(),
            code::subcommand(),
            server::subcommand(),
            verify::subcommand(),
            demo::subcommand(),
        ])
}

/// Dispatches to the selected command. False when the command failed or the
/// code was rejected.
pub fn run<W>(matches: &ArgMatches, totp: &Totp, clock: &impl GetTime, writer: &mut W) -> bool
where
    W: OutErr,
{
    match matches.subcommand() {
        Some(("secret", args)) => secret::run_secret(args, writer),
        Some(("code", args)) => code::run_code(args, totp, clock, writer),
        Some(("server", args)) => server::run_server(args, totp, clock, writer),
        Some(("verify", args)) => verify::run_verify(args, totp, clock, writer),
        Some(("demo", args)) => demo::run_demo(args, totp, clock, writer),
        _ => {
            writer.write_err("Unknown command\n");
            false
        }
    }
}

pub(crate) fn key_arg() -> clap::Arg<'static> {
    arg!(-k --key <KEY> "Base32 secret key")
        .required(true)
        .validator(crate::secret::is_base32_key)
}

pub(crate) fn timestamp_arg() -> clap::Arg<'static> {
    arg!(-t --timestamp <SECS> "Seconds since the Unix epoch (defaults to now)").required(false)
}

pub(crate) fn read_key(args: &ArgMatches) -> Result<Secret, String> {
    let key = args
        .value_of("key")
        .ok_or_else(|| String::from("Secret key is required"))?;

    Secret::from_base32(key).map_err(|err| format!("{}", err))
}

pub(crate) fn read_now(args: &ArgMatches, clock: &impl GetTime) -> Result<u64, String> {
    match args.value_of("timestamp") {
        Some(timestamp) => timestamp
            .parse::<u64>()
            .map_err(|err| format!("Unable to parse timestamp: {}", err)),
        None => Ok(unix_time(clock)),
    }
}
