use clap::{command, ArgMatches, Command};

use super::{key_arg, read_key, read_now, timestamp_arg, CommandType};
use crate::totp::{GetTime, Totp};
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Server.as_str())
        .about("Show the codes accepted for the previous, current and next window")
        .args(&[key_arg(), timestamp_arg()])
}

pub fn run_server<W>(
    server_args: &ArgMatches,
    totp: &Totp,
    clock: &impl GetTime,
    writer: &mut W,
) -> bool
where
    W: OutErr,
{
    let (secret, now) = match (read_key(server_args), read_now(server_args, clock)) {
        (Ok(secret), Ok(now)) => (secret, now),
        (Err(err), _) | (_, Err(err)) => {
            writer.write_err(&format!("{}\n", err));
            return false;
        }
    };

    let candidates = totp.server_codes_at(&secret, now);
    for code in candidates.codes() {
        writer.write(&format!("{}\n", code));
    }
    true
}
