// MongoDB modules
#[cfg(test)]
pub mod memory;
pub mod mongodb;
pub mod target;

// Re-export commonly used types
pub use self::mongodb::MongoDbClient;
pub use target::SeedTarget;
