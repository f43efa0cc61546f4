use clap::{command, ArgMatches, Command};

use super::{key_arg, read_key, CommandType};
use crate::secret::{Secret, DEFAULT_SECRET_LEN};
use crate::totp::{unix_time, verify, GetTime, Totp};
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Demo.as_str())
        .about("Issue a secret, show its code and verify what the user types back")
        .args(&[key_arg().required(false)])
}

pub fn run_demo<W>(demo_args: &ArgMatches, totp: &Totp, clock: &impl GetTime, writer: &mut W) -> bool
where
    W: OutErr,
{
    let secret = if demo_args.is_present("key") {
        match read_key(demo_args) {
            Ok(secret) => secret,
            Err(err) => {
                writer.write_err(&format!("{}\n", err));
                return false;
            }
        }
    } else {
        let secret = Secret::generate(DEFAULT_SECRET_LEN);
        writer.write(&format!("Your secret key: {}\n", secret.to_base32()));
        secret
    };

    let code = totp.code_at(&secret, unix_time(clock));
    writer.write(&format!(
        "Here is your OTP, valid for {} seconds: {}\n",
        totp.step(),
        code
    ));

    writer.write("Enter OTP: ");
    let input = match writer.read_line() {
        Ok(input) => input,
        Err(err) => {
            writer.write_err(&format!("Unable to read OTP: {}\n", err));
            return false;
        }
    };

    // The clock is read again, as a verifier would on receipt
    let candidates = totp.server_codes_at(&secret, unix_time(clock));
    if verify(&candidates, &input) {
        writer.write("Code accepted\n");
        true
    } else {
        writer.write_err("Code rejected\n");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::CommandType::Demo;
    use crate::tests::constants::*;
    use crate::tests::mocks::*;
    use crate::tests::utils::get_cmd_args;

    #[test]
    fn accepts_the_code_it_showed() {
        let mut writer = MockOtpWriter::with_input(&["432081"]);

        let arg_vec = vec!["otp-window", Demo.as_str(), "-k", TOTP_KEY];
        let args = get_cmd_args(Demo.as_str(), subcommand(), &arg_vec).unwrap();

        assert!(run_demo(&args, &Totp::default(), &MockClock::new(), &mut writer));

        let expected_output =
            "Here is your OTP, valid for 30 seconds: 432081\nEnter OTP: Code accepted\n";
        assert_eq!(String::from_utf8(writer.out).unwrap(), expected_output);
        assert_eq!(writer.err, Vec::new());
    }

    #[test]
    fn rejects_a_wrong_code() {
        let mut writer = MockOtpWriter::with_input(&["123456"]);

        let arg_vec = vec!["otp-window", Demo.as_str(), "-k", TOTP_KEY];
        let args = get_cmd_args(Demo.as_str(), subcommand(), &arg_vec).unwrap();

        assert!(!run_demo(&args, &Totp::default(), &MockClock::new(), &mut writer));
        assert_eq!(String::from_utf8(writer.err).unwrap(), "Code rejected\n");
    }

    #[test]
    fn issues_a_secret_when_none_given() {
        let mut writer = MockOtpWriter::with_input(&[""]);

        let arg_vec = vec!["otp-window", Demo.as_str()];
        let args = get_cmd_args(Demo.as_str(), subcommand(), &arg_vec).unwrap();

        assert!(!run_demo(&args, &Totp::default(), &MockClock::new(), &mut writer));

        let out = String::from_utf8(writer.out).unwrap();
        let key = out
            .lines()
            .next()
            .and_then(|line| line.strip_prefix("Your secret key: "))
            .unwrap();
        assert_eq!(Secret::from_base32(key).unwrap().len(), DEFAULT_SECRET_LEN);
    }

    #[test]
    fn reports_closed_input() {
        let mut writer = MockOtpWriter::new();

        let arg_vec = vec!["otp-window", Demo.as_str(), "-k", TOTP_KEY];
        let args = get_cmd_args(Demo.as_str(), subcommand(), &arg_vec).unwrap();

        assert!(!run_demo(&args, &Totp::default(), &MockClock::new(), &mut writer));
        assert!(String::from_utf8(writer.err)
            .unwrap()
            .starts_with("Unable to read OTP"));
    }
}
