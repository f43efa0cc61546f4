use clap::{arg, command, ArgMatches, Command};
use log::info;

use super::{key_arg, read_key, read_now, timestamp_arg, CommandType};
use crate::totp::{verify, GetTime, Totp};
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Verify.as_str())
        .about("Check a one-time password against the accepted windows")
        .args(&[
            key_arg(),
            arg!(-c --code <CODE> "One-time password to verify").required(true),
            timestamp_arg(),
        ])
}

pub fn run_verify<W>(
    verify_args: &ArgMatches,
    totp: &Totp,
    clock: &impl GetTime,
    writer: &mut W,
) -> bool
where
    W: OutErr,
{
    let code = match verify_args.value_of("code") {
        Some(code) => code,
        _ => {
            writer.write_err("Code is required\n");
            return false;
        }
    };

    let (secret, now) = match (read_key(verify_args), read_now(verify_args, clock)) {
        (Ok(secret), Ok(now)) => (secret, now),
        (Err(err), _) | (_, Err(err)) => {
            writer.write_err(&format!("{}\n", err));
            return false;
        }
    };

    if verify(&totp.server_codes_at(&secret, now), code) {
        info!("code accepted");
        writer.write(&format!("{} valid\n", code));
        true
    } else {
        info!("code rejected");
        writer.write_err("Invalid code\n");
        false
    }
}
