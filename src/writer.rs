use std::io::{self, BufRead, Error, ErrorKind, Stderr, Stdin, Stdout, Write};

pub struct OtpWriter {
    pub out: Stdout,
    pub err: Stderr,
    pub input: Stdin,
}

impl OtpWriter {
    pub fn new() -> Self {
        OtpWriter {
            out: io::stdout(),
            err: io::stderr(),
            input: io::stdin(),
        }
    }
}

impl Default for OtpWriter {
    fn default() -> Self {
        OtpWriter::new()
    }
}

/// Console seam used by the commands, so tests can script the user.
pub trait OutErr {
    fn write_err(&mut self, s: &str);
    fn write(&mut self, s: &str);
    /// One line of user input without its line terminator.
    fn read_line(&mut self) -> io::Result<String>;
}

impl OutErr for OtpWriter {
    fn write_err(&mut self, s: &str) {
        match self.err.write_all(s.as_bytes()) {
            Ok(_) => (),
            Err(e) => eprintln!("{}", e),
        }
    }

    fn write(&mut self, s: &str) {
        let written = self
            .out
            .write_all(s.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = written {
            eprintln!("{}", e);
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        read_trimmed_line(&mut self.input.lock())
    }
}

// A closed input reads zero bytes
fn read_trimmed_line(reader: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::new(ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}
