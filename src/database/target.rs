use async_trait::async_trait;
use mongodb::options::CreateCollectionOptions;

use crate::errors::CollectionError;

/// Collection-level operations the executors need from a database.
#[async_trait]
pub trait SeedTarget: Send + Sync {
    /// Name of the selected database.
    fn name(&self) -> &str;

    async fn create_collection(
        &self,
        name: &str,
        options: &CreateCollectionOptions,
    ) -> Result<(), CollectionError>;

    async fn drop_database(&self) -> Result<(), CollectionError>;

    async fn drop_collection(&self, name: &str) -> Result<(), CollectionError>;

    /// Release the connection. Called once after the command has run.
    async fn close(&self) {}
}

#[async_trait]
impl<'a, T> SeedTarget for &'a T
where
    T: SeedTarget + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn create_collection(
        &self,
        name: &str,
        options: &CreateCollectionOptions,
    ) -> Result<(), CollectionError> {
        (**self).create_collection(name, options).await
    }

    async fn drop_database(&self) -> Result<(), CollectionError> {
        (**self).drop_database().await
    }

    async fn drop_collection(&self, name: &str) -> Result<(), CollectionError> {
        (**self).drop_collection(name).await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
