use chrono::Local;
use log::{error, info, warn};

use crate::database::SeedTarget;
use crate::errors::{CollectionError, SeederError};
use crate::seed::SeedSet;

/// Outcome of a completed migration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub created: Vec<String>,
    /// Collections that already existed.
    pub skipped: Vec<String>,
}

/// Create one collection per seed.
///
/// A collection that already exists is logged and skipped. Any other failure
/// stops the batch: later seeds are not attempted and collections created so
/// far are left in place.
pub async fn migrate<T>(target: &T, seeds: &SeedSet) -> Result<MigrationReport, SeederError>
where
    T: SeedTarget + ?Sized,
{
    let mut report = MigrationReport::default();

    for (collection, options) in seeds {
        info!("Migrating {} at {}", collection, Local::now());

        match target.create_collection(collection, options).await {
            Ok(()) => report.created.push(collection.clone()),
            Err(CollectionError::AlreadyExists(_)) => {
                warn!("Failed to migrate {}: collection already exists", collection);
                report.skipped.push(collection.clone());
            }
            Err(e) => {
                error!("Migration of {} failed: {}", collection, e);
                info!("Migration finished with errors at {}", Local::now());
                return Err(SeederError::MigrationAborted {
                    collection: collection.clone(),
                    message: e.to_string(),
                    created: report.created,
                });
            }
        }
    }

    info!(
        "Migration finished at {} ({} created, {} skipped)",
        Local::now(),
        report.created.len(),
        report.skipped.len()
    );
    Ok(report)
}
