mod sample;
mod service;

pub use sample::*;
pub use service::*;
