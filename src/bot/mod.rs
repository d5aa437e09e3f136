pub use self::config::{Config, ConfigError};
pub use self::dispatcher::{run_dispatcher, Command};

pub mod config;
pub mod processor;
pub mod services;
pub mod state;
pub mod steps;

mod constants;
mod dispatcher;
mod drive;
mod handlers;
mod redis;
mod sheets;
mod utils;

#[cfg(test)]
mod test_utils;
