use clap::{arg, command, ArgMatches, Command};

use super::CommandType;
use crate::secret::{Secret, DEFAULT_SECRET_LEN};
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Secret.as_str())
        .about("Generate a Base32 secret key")
        .args(&[arg!(-l --length <BYTES> "Key length in bytes")
            .required(false)
            .default_value("24")])
}

pub fn run_secret<W>(secret_args: &ArgMatches, writer: &mut W) -> bool
where
    W: OutErr,
{
    let length = match secret_args.value_of("length").map(str::parse::<usize>) {
        Some(Ok(length)) if length > 0 => length,
        Some(Ok(_)) => {
            writer.write_err("Key length must be at least 1 byte\n");
            return false;
        }
        Some(Err(err)) => {
            writer.write_err(&format!("Unable to parse length: {}\n", err));
            return false;
        }
        None => DEFAULT_SECRET_LEN,
    };

    writer.write(&format!("{}\n", Secret::generate(length).to_base32()));
    true
}
