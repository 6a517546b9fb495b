use std::{fmt, io};

use anyhow::{anyhow, Context as _};
use serde::Serialize;
use structopt::StructOpt;

use crate::service::{Act, HttpSession};
use crate::{Config, Console, OutputFormat, Registry, Result};

mod fetch;
mod login;
mod show;

pub use fetch::{FetchOpt, FetchOutcome};
pub use login::{LoginOpt, LoginOutcome};
pub use show::{ShowOpt, ShowOutcome};

pub trait Outcome: OutcomeSerialize {
    fn is_error(&self) -> bool;
}

pub trait OutcomeSerialize: fmt::Display + fmt::Debug {
    fn write_json(&self, writer: &mut dyn io::Write) -> Result<()>;

    fn write_yaml(&self, writer: &mut dyn io::Write) -> Result<()>;

    fn print(&self, stdout: &mut dyn io::Write, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Default => writeln!(stdout, "{}", self)?,
            OutputFormat::Debug => writeln!(stdout, "{:?}", self)?,
            OutputFormat::Json => {
                self.write_json(stdout)?;
                writeln!(stdout)?;
            }
            OutputFormat::Yaml => self.write_yaml(stdout)?,
        }
        Ok(())
    }
}

impl<T: Serialize + fmt::Display + fmt::Debug> OutcomeSerialize for T {
    fn write_json(&self, writer: &mut dyn io::Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).context("Could not print outcome as json")
    }

    fn write_yaml(&self, writer: &mut dyn io::Write) -> Result<()> {
        serde_yaml::to_writer(writer, self).context("Could not print outcome as yaml")
    }
}

pub trait Run {
    fn run(
        &self,
        conf: &Config,
        registry: &Registry,
        cnsl: &mut Console,
    ) -> Result<Box<dyn Outcome>>;
}

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub enum Cmd {
    /// Shows current config
    Show(ShowOpt),
    /// Logs in to the service a problem url belongs to
    Login(LoginOpt),
    /// Fetches sample cases of a problem
    Fetch(FetchOpt),
}

impl Run for Cmd {
    fn run(
        &self,
        conf: &Config,
        registry: &Registry,
        cnsl: &mut Console,
    ) -> Result<Box<dyn Outcome>> {
        match self {
            Self::Show(opt) => Ok(Box::new(opt.run(conf)?)),
            Self::Login(opt) => Ok(Box::new(opt.run(conf, registry, cnsl)?)),
            Self::Fetch(opt) => Ok(Box::new(opt.run(conf, registry, cnsl)?)),
        }
    }
}

fn find_actor(registry: &Registry, url: &str) -> Result<Box<dyn Act>> {
    registry
        .find(url)
        .ok_or_else(|| anyhow!("Could not find service for url : {}", url))
}

fn build_session(conf: &Config) -> Result<HttpSession> {
    conf.build_session().context("Could not build http session")
}
