pub mod config;
pub mod database;
pub mod dispatch;
pub mod errors;
pub mod seed;
pub mod services;

pub use config::{Command, Config};
pub use dispatch::{dispatch, run, Outcome};
pub use errors::SeederError;
