use std::fs::{self, DirEntry};
use std::path::Path;

use log::{debug, error, info, warn};
use mongodb::options::CreateCollectionOptions;

use super::SeedSet;
use crate::errors::SeederError;

/// Authoring template that is never loaded, at the top level only.
pub const TEMPLATE_FILE: &str = "template.json";

/// Read every seed under `path`.
///
/// Top-level files become seeds named after the file, minus everything from
/// the first `.`. Subdirectories are scanned one level further and their files
/// are added to the same set; deeper directories are ignored. `template.json`
/// is skipped at the top level but not inside subdirectories.
///
/// Entries are visited in file-name order, so when two files resolve to the
/// same collection the one visited last wins. Any unreadable or undecodable
/// file fails the whole read; an unreadable subdirectory is only logged.
pub fn read_seeds(path: &Path) -> Result<SeedSet, SeederError> {
    let mut seeds = SeedSet::new();

    let entries = sorted_entries(path).map_err(|source| {
        error!("Failed to read seed directory {}: {}", path.display(), source);
        SeederError::SeedDirectory {
            path: path.to_path_buf(),
            source,
        }
    })?;

    for entry in entries {
        let entry_path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if entry_path.is_dir() {
            read_nested(&entry_path, &mut seeds)?;
        } else if file_name == TEMPLATE_FILE {
            debug!("Skipping template {}", entry_path.display());
        } else {
            append_seed(&mut seeds, &file_name, &entry_path)?;
        }
    }

    info!("Loaded {} seed(s) from {}", seeds.len(), path.display());
    Ok(seeds)
}

fn read_nested(dir: &Path, seeds: &mut SeedSet) -> Result<(), SeederError> {
    let entries = match sorted_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Skipping unreadable seed directory {}: {}", dir.display(), e);
            return Ok(());
        }
    };

    for entry in entries {
        let entry_path = entry.path();
        if entry_path.is_dir() {
            debug!("Ignoring nested directory {}", entry_path.display());
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        append_seed(seeds, &file_name, &entry_path)?;
    }

    Ok(())
}

fn append_seed(seeds: &mut SeedSet, file_name: &str, path: &Path) -> Result<(), SeederError> {
    let collection = collection_name(file_name);
    if collection.is_empty() {
        debug!("Skipping {}: no collection name", path.display());
        return Ok(());
    }

    let content = fs::read(path).map_err(|source| {
        error!("Failed to read seed file {}: {}", path.display(), source);
        SeederError::SeedFile {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let options: CreateCollectionOptions = serde_json::from_slice(&content).map_err(|source| {
        error!("Failed to decode seed file {}: {}", path.display(), source);
        SeederError::SeedDecode {
            path: path.to_path_buf(),
            source,
        }
    })?;

    debug!("Seed {} loaded from {}", collection, path.display());
    seeds.insert(collection.to_string(), options);
    Ok(())
}

/// `users.json` -> `users`, `orders.v2.json` -> `orders`.
pub fn collection_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(DirEntry::file_name);
    Ok(entries)
}
