use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use url::Url;

use crate::errors::SeederError;

/// Sentinel collection name selecting every collection in the database.
pub const ALL_COLLECTIONS: &str = "all";

/// Seeder configuration, built once from process arguments and never mutated.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "mongo-seeder",
    author,
    version,
    about = "Create or drop MongoDB collections from a directory of JSON seed files",
    long_about = None
)]
pub struct Config {
    /// Username for connecting to MongoDB
    #[arg(long, env = "SEEDER_USERNAME", default_value = "")]
    pub username: String,

    /// Password for connecting to MongoDB
    #[arg(long, env = "SEEDER_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// MongoDB host
    #[arg(long, env = "SEEDER_HOST", default_value = "localhost")]
    pub host: String,

    /// MongoDB port
    #[arg(long, env = "SEEDER_PORT", default_value = "27017")]
    pub port: String,

    /// Database name
    #[arg(long, alias = "dbanme", env = "SEEDER_DBNAME", default_value = "test")]
    pub dbname: String,

    /// Command to execute [up / down]
    #[arg(long, env = "SEEDER_COMMAND", default_value = "up")]
    pub command: String,

    /// Seeder path
    #[arg(long, env = "SEEDER_PATH", default_value = "./seed")]
    pub path: String,

    /// Collection name [all / name / comma,separated,names]
    #[arg(long, env = "SEEDER_COLLECTION", default_value = ALL_COLLECTIONS)]
    pub collection: String,

    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Seconds to wait for the server before giving up on the connection
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            host: "localhost".to_string(),
            port: "27017".to_string(),
            dbname: "test".to_string(),
            command: "up".to_string(),
            path: "./seed".to_string(),
            collection: ALL_COLLECTIONS.to_string(),
            log_level: "info".to_string(),
            timeout_secs: 5,
        }
    }
}

/// The two supported commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Create collections from the seed directory.
    Up,
    /// Drop the database or the selected collections.
    Down,
}

impl FromStr for Command {
    type Err = SeederError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Command::Up),
            "down" => Ok(Command::Down),
            other => Err(SeederError::InvalidCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Up => write!(f, "up"),
            Command::Down => write!(f, "down"),
        }
    }
}

/// Which collections `down` removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionSelection {
    All,
    Named(Vec<String>),
}

impl CollectionSelection {
    pub fn parse(value: &str) -> Self {
        if value == ALL_COLLECTIONS {
            return CollectionSelection::All;
        }

        CollectionSelection::Named(
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl Config {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn command(&self) -> Result<Command, SeederError> {
        self.command.parse()
    }

    pub fn selection(&self) -> CollectionSelection {
        CollectionSelection::parse(&self.collection)
    }

    pub fn seed_path(&self) -> Result<PathBuf, SeederError> {
        if self.path.trim().is_empty() {
            return Err(SeederError::Config("seeder path is empty".to_string()));
        }
        Ok(PathBuf::from(&self.path))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Empty username and password together mean no authentication.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// Build the connection URI. Credentials are percent-encoded.
    pub fn connection_uri(&self) -> Result<String, SeederError> {
        let base = format!("mongodb://{}:{}", self.host, self.port);
        let mut uri = Url::parse(&base).map_err(|e| {
            SeederError::Config(format!("invalid host or port {}:{}: {}", self.host, self.port, e))
        })?;

        if self.has_credentials() {
            uri.set_username(&self.username)
                .map_err(|_| SeederError::Config("username cannot be set on URI".to_string()))?;
            uri.set_password(Some(&self.password))
                .map_err(|_| SeederError::Config("password cannot be set on URI".to_string()))?;
        }

        Ok(uri.to_string())
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }
}
