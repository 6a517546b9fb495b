use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{build_session, find_actor, Outcome};
use crate::model::{Sample, Service};
use crate::{Config, Console, Registry, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct FetchOpt {
    /// Url of the problem
    #[structopt(name = "url")]
    url: String,
    /// Directory to save sample files into
    #[structopt(long, short = "d", default_value = "test")]
    dir: PathBuf,
    /// Overwrites existing sample files
    #[structopt(long, short = "w")]
    overwrite: bool,
}

impl FetchOpt {
    pub fn run(
        &self,
        conf: &Config,
        registry: &Registry,
        cnsl: &mut Console,
    ) -> Result<FetchOutcome> {
        let actor = find_actor(registry, &self.url)?;
        let mut session = build_session(conf)?;
        let samples = actor.download(&mut session, cnsl)?;
        if samples.is_empty() {
            cnsl.warn("Found no sample cases")?;
        }
        let saved = save_samples(&self.dir, &samples, self.overwrite, cnsl)
            .context("Could not save sample files")?;

        Ok(FetchOutcome {
            service: Service::new(actor.service_kind()),
            url: actor.url().to_string(),
            samples,
            saved,
        })
    }
}

fn sample_paths(dir: &Path, sample: &Sample) -> (PathBuf, PathBuf) {
    let stem = format!("sample-{}", sample.name());
    (
        dir.join(format!("{}.in", stem)),
        dir.join(format!("{}.out", stem)),
    )
}

fn save_samples(
    dir: &Path,
    samples: &[Sample],
    overwrite: bool,
    cnsl: &mut Console,
) -> Result<Vec<PathBuf>> {
    if !samples.is_empty() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Could not create directory : {}", dir.display()))?;
    }
    let mut saved = vec![];
    for sample in samples {
        let (in_path, out_path) = sample_paths(dir, sample);
        for (path, content) in &[(in_path, sample.input()), (out_path, sample.output())] {
            if path.exists() && !overwrite {
                cnsl.warn(&format!("File already exists, skipped : {}", path.display()))?;
                continue;
            }
            fs::write(path, content)
                .with_context(|| format!("Could not write file : {}", path.display()))?;
            cnsl.status(&format!("Saved to {}", path.display()))?;
            saved.push(path.clone());
        }
    }
    Ok(saved)
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchOutcome {
    service: Service,
    url: String,
    samples: Vec<Sample>,
    saved: Vec<PathBuf>,
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Successfully fetched {} sample(s) from {}",
            self.samples.len(),
            self.url
        )
    }
}

impl Outcome for FetchOutcome {
    fn is_error(&self) -> bool {
        false
    }
}
