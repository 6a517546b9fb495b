#![warn(clippy::all)]

#[macro_use]
extern crate strum;

mod actor;
mod page;
mod problem;

use ojfetch_util::{model, service, Console};

pub use actor::CodeforcesActor;
pub use problem::{CodeforcesProblem, ProblemKind};

pub type Error = anyhow::Error;
pub type Result<T> = anyhow::Result<T>;
