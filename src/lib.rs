#![warn(clippy::all)]

#[macro_use]
extern crate strum;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use structopt::StructOpt;
use strum::VariantNames;

mod cmd;
mod config;
mod registry;

use ojfetch_util::{model, service};

use cmd::{Cmd, Outcome as _, OutcomeSerialize as _, Run as _};
pub use config::{Config, SessionConfig};
pub use ojfetch_util::Console;
pub use registry::{FromUrl, Registry};

pub type Error = anyhow::Error;
pub type Result<T> = anyhow::Result<T>;

#[derive(
    EnumString, EnumVariantNames, IntoStaticStr, Debug, Copy, Clone, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    Default,
    Debug,
    Json,
    Yaml,
}

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct Opt {
    #[structopt(flatten)]
    global_opt: GlobalOpt,
    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct GlobalOpt {
    /// Path to config file [default: <config dir>/ojfetch/config.yaml]
    #[structopt(long, global = true, env = "OJFETCH_CONFIG")]
    config: Option<PathBuf>,
    /// Format of the outcome printed to stdout
    #[structopt(
        long,
        global = true,
        default_value = "default",
        possible_values = &OutputFormat::VARIANTS,
    )]
    output_format: OutputFormat,
    /// Hides status messages
    #[structopt(long, short = "q", global = true)]
    quiet: bool,
    /// Shows debug messages
    #[structopt(long, short = "v", global = true)]
    verbose: bool,
}

impl Opt {
    pub fn is_quiet(&self) -> bool {
        self.global_opt.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.global_opt.verbose
    }

    /// Runs the command and prints its outcome. Returns whether the outcome is an error.
    pub fn run(&self, stdout: &mut dyn Write, cnsl: &mut Console) -> Result<bool> {
        let conf = match &self.global_opt.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .context("Could not load config")?;
        let registry = Registry::with_defaults();

        let outcome = self.cmd.run(&conf, &registry, cnsl)?;
        outcome.print(stdout, self.global_opt.output_format)?;
        Ok(outcome.is_error())
    }
}
