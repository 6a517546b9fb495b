#![warn(clippy::all)]

#[macro_use]
extern crate strum;

pub mod console;
mod macros;
pub mod model;
pub mod service;

pub use console::Console;

pub type Error = anyhow::Error;
pub type Result<T> = anyhow::Result<T>;
