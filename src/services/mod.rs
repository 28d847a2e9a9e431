pub mod migrator;
pub mod teardown;

pub use migrator::{migrate, MigrationReport};
pub use teardown::{take_down, take_down_all, take_down_collections, TeardownReport};
