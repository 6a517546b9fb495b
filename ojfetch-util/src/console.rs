use std::env;
use std::io::{self, Write};

use console::{style, Term};

#[derive(Debug)]
enum Inner {
    Term(Term),
    Buf(Vec<u8>),
    Sink(io::Sink),
}

/// Destination of every status line printed while talking to a service.
///
/// Request lines, status descriptions and prompts all go through here so that
/// stdout stays reserved for command outcomes.
#[derive(Debug)]
pub struct Console {
    inner: Inner,
    verbose: bool,
}

impl Console {
    pub fn term() -> Self {
        Self::with_inner(Inner::Term(Term::stderr()))
    }

    pub fn buf() -> Self {
        Self::with_inner(Inner::Buf(Vec::new()))
    }

    pub fn sink() -> Self {
        Self::with_inner(Inner::Sink(io::sink()))
    }

    fn with_inner(inner: Inner) -> Self {
        Self {
            inner,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn take_buf(self) -> Option<Vec<u8>> {
        match self.inner {
            Inner::Buf(buf) => Some(buf),
            _ => None,
        }
    }

    #[inline(always)]
    fn as_mut_write(&mut self) -> &mut dyn Write {
        match self.inner {
            Inner::Term(ref mut w) => w,
            Inner::Buf(ref mut w) => w,
            Inner::Sink(ref mut w) => w,
        }
    }

    fn is_term(&self) -> bool {
        matches!(self.inner, Inner::Term(_))
    }

    fn write_line(&mut self, mark: &str, message: &str) -> io::Result<()> {
        writeln!(self, "{} {}", mark, message)
    }

    pub fn status(&mut self, message: &str) -> io::Result<()> {
        self.write_line("[x]", message)
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        self.write_line("[*]", message)
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        if self.is_term() {
            let mark = style("[+]").green().to_string();
            self.write_line(&mark, message)
        } else {
            self.write_line("[+]", message)
        }
    }

    pub fn failure(&mut self, message: &str) -> io::Result<()> {
        if self.is_term() {
            let mark = style("[-]").red().to_string();
            self.write_line(&mark, message)
        } else {
            self.write_line("[-]", message)
        }
    }

    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(self, "WARN: {}", message)
    }

    pub fn debug(&mut self, message: &str) -> io::Result<()> {
        if self.verbose {
            writeln!(self, "DEBUG: {}", message)
        } else {
            Ok(())
        }
    }

    pub fn get_env_or_prompt_and_read(
        &mut self,
        env_name: &str,
        prompt: &str,
        is_password: bool,
    ) -> io::Result<String> {
        if let Ok(val) = env::var(env_name) {
            writeln!(
                self,
                "{}{:16} (read from env {})",
                prompt,
                if is_password { "********" } else { &val },
                env_name
            )?;
            return Ok(val);
        };
        self.prompt_and_read(prompt, is_password)
    }

    fn read_user(&mut self, is_password: bool) -> io::Result<String> {
        match &self.inner {
            Inner::Term(term) => {
                if is_password {
                    term.read_secure_line()
                } else {
                    term.read_line()
                }
            }
            _ => Ok(String::from("")),
        }
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self, "{}", prompt)?;
        self.flush()?;
        Ok(())
    }

    fn prompt_and_read(&mut self, prompt: &str, is_password: bool) -> io::Result<String> {
        self.prompt(prompt)?;
        self.read_user(is_password)
    }
}

impl Write for Console {
    #[inline(always)]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.as_mut_write().write(buf)
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        self.as_mut_write().flush()
    }
}
