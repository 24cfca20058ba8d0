pub mod app;
pub mod config;
pub mod errors;
pub mod filter;
pub mod metadata;
pub mod params;
mod runner;
pub mod seq;
pub mod server;
pub mod services;

use crate::errors::ContigFilterError;

pub fn run() -> Result<(), ContigFilterError> {
    runner::run()
}
