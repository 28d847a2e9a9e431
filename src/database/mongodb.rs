use crate::config::Config;
use crate::database::target::SeedTarget;
use crate::errors::{CollectionError, SeederError};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bson::{doc, Document};
use log::{debug, error, info};
use mongodb::{
    error::{Error as MongoError, ErrorKind},
    options::{ClientOptions, CreateCollectionOptions},
    Client, Database as MongoDatabase,
};

/// Server error code for `NamespaceExists`.
const NAMESPACE_EXISTS: i32 = 48;

/// MongoDB client wrapper bound to one selected database
#[derive(Debug, Clone)]
pub struct MongoDbClient {
    client: Client,
    database: MongoDatabase,
}

impl MongoDbClient {
    /// Connect, select the configured database and verify it answers a ping.
    pub async fn connect(config: &Config) -> Result<Self, SeederError> {
        let connection_string = config.connection_uri()?;
        Self::init(config, &connection_string)
            .await
            .map_err(SeederError::Connection)
    }

    async fn init(config: &Config, connection_string: &str) -> Result<Self> {
        let database_name = config.dbname.clone();

        info!(
            "Connecting to MongoDB at {}:{} with database {}{}",
            config.host,
            config.port,
            database_name,
            if config.has_credentials() {
                " (authenticated)"
            } else {
                ""
            }
        );

        let mut client_options = ClientOptions::parse(connection_string)
            .await
            .map_err(|e| anyhow!("Failed to parse MongoDB connection string: {}", e))?;
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.connect_timeout = Some(config.timeout());
        client_options.server_selection_timeout = Some(config.timeout());

        let client = Client::with_options(client_options)
            .map_err(|e| anyhow!("Failed to create MongoDB client: {}", e))?;

        let database = client.database(&database_name);

        // Test connection
        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => info!(
                "Successfully connected to MongoDB database: {}",
                database_name
            ),
            Err(e) => {
                error!("Ping to database {} failed: {}", database_name, e);
                client.shutdown().await;
                return Err(anyhow!("ping to database {} failed: {}", database_name, e));
            }
        }

        Ok(Self { client, database })
    }

}

#[async_trait]
impl SeedTarget for MongoDbClient {
    fn name(&self) -> &str {
        self.database.name()
    }

    async fn create_collection(
        &self,
        name: &str,
        options: &CreateCollectionOptions,
    ) -> Result<(), CollectionError> {
        self.database
            .create_collection(name)
            .with_options(options.clone())
            .await
            .map_err(|e| classify(name, &e))
    }

    async fn drop_database(&self) -> Result<(), CollectionError> {
        self.database
            .drop()
            .await
            .map_err(|e| classify(self.database.name(), &e))
    }

    async fn drop_collection(&self, name: &str) -> Result<(), CollectionError> {
        self.database
            .collection::<Document>(name)
            .drop()
            .await
            .map_err(|e| classify(name, &e))
    }

    /// Close every pooled connection.
    async fn close(&self) {
        debug!("Closing MongoDB connection");
        self.client.clone().shutdown().await;
    }
}

fn classify(collection: &str, error: &MongoError) -> CollectionError {
    let code = match *error.kind {
        ErrorKind::Command(ref command_error) => Some(command_error.code),
        _ => None,
    };
    classify_message(collection, code, &error.to_string())
}

/// Server errors carry a typed code; anything else falls back to the message.
fn classify_message(collection: &str, code: Option<i32>, message: &str) -> CollectionError {
    let already_exists = match code {
        Some(code) => code == NAMESPACE_EXISTS,
        None => message.contains("exists"),
    };

    if already_exists {
        CollectionError::AlreadyExists(collection.to_string())
    } else {
        CollectionError::Failed {
            collection: collection.to_string(),
            message: message.to_string(),
        }
    }
}
