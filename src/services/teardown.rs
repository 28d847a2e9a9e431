use log::{error, info};

use crate::config::CollectionSelection;
use crate::database::SeedTarget;
use crate::errors::{CollectionError, SeederError};

/// Outcome of a `down` run. Every requested drop is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub dropped: Vec<String>,
    pub failed: Vec<CollectionError>,
}

impl TeardownReport {
    pub fn into_result(self) -> Result<Self, SeederError> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        Err(SeederError::TeardownFailed {
            failed: self
                .failed
                .iter()
                .map(|e| match e {
                    CollectionError::AlreadyExists(name) => name.clone(),
                    CollectionError::Failed { collection, .. } => collection.clone(),
                })
                .collect(),
        })
    }
}

pub async fn take_down<T>(target: &T, selection: &CollectionSelection) -> TeardownReport
where
    T: SeedTarget + ?Sized,
{
    match selection {
        CollectionSelection::All => take_down_all(target).await,
        CollectionSelection::Named(names) => take_down_collections(target, names).await,
    }
}

/// Drop the whole database.
pub async fn take_down_all<T>(target: &T) -> TeardownReport
where
    T: SeedTarget + ?Sized,
{
    let mut report = TeardownReport::default();

    match target.drop_database().await {
        Ok(()) => {
            info!("All collections in {} are deleted", target.name());
            report.dropped.push(target.name().to_string());
        }
        Err(e) => {
            error!("Failed to drop database {}: {}", target.name(), e);
            report.failed.push(e);
        }
    }

    report
}

/// Drop each named collection. A failure does not stop the others.
pub async fn take_down_collections<T>(target: &T, names: &[String]) -> TeardownReport
where
    T: SeedTarget + ?Sized,
{
    let mut report = TeardownReport::default();

    for name in names {
        match target.drop_collection(name).await {
            Ok(()) => {
                info!("{} is deleted", name);
                report.dropped.push(name.clone());
            }
            Err(e) => {
                error!("Failed to drop {}: {}", name, e);
                report.failed.push(e);
            }
        }
    }

    report
}
