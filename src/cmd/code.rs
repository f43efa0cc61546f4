use clap::{command, ArgMatches, Command};

use super::{key_arg, read_key, read_now, timestamp_arg, CommandType};
use crate::totp::{GetTime, Totp};
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Code.as_str())
        .about("Show the one-time password for the current window")
        .args(&[key_arg(), timestamp_arg()])
}

pub fn run_code<W>(code_args: &ArgMatches, totp: &Totp, clock: &impl GetTime, writer: &mut W) -> bool
where
    W: OutErr,
{
    let (secret, now) = match (read_key(code_args), read_now(code_args, clock)) {
        (Ok(secret), Ok(now)) => (secret, now),
        (Err(err), _) | (_, Err(err)) => {
            writer.write_err(&format!("{}\n", err));
            return false;
        }
    };

    writer.write(&format!("{}\n", totp.code_at(&secret, now)));
    true
}
