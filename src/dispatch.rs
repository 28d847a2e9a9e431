use std::future::Future;

use chrono::Local;
use log::info;

use crate::config::{Command, Config};
use crate::database::SeedTarget;
use crate::errors::SeederError;
use crate::seed::read_seeds;
use crate::services::{migrate, take_down, MigrationReport, TeardownReport};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Migrated(MigrationReport),
    TornDown(TeardownReport),
}

/// Validate the command, open a target with `connect` and dispatch to it.
///
/// An invalid command fails before `connect` is called. The target is closed
/// whether or not the command succeeds.
pub async fn run<T, F, Fut>(config: &Config, connect: F) -> Result<Outcome, SeederError>
where
    T: SeedTarget,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, SeederError>>,
{
    let command = config.command()?;

    let target = connect().await?;
    info!("Running {} against {}", command, target.name());

    let result = dispatch(command, config, &target).await;
    target.close().await;
    result
}

/// Run one command against `target`.
pub async fn dispatch<T>(
    command: Command,
    config: &Config,
    target: &T,
) -> Result<Outcome, SeederError>
where
    T: SeedTarget + ?Sized,
{
    match command {
        Command::Up => {
            info!("Migration started at {}", Local::now());
            let seeds = read_seeds(&config.seed_path()?)?;
            let report = migrate(target, &seeds).await?;
            Ok(Outcome::Migrated(report))
        }
        Command::Down => {
            let report = take_down(target, &config.selection()).await;
            Ok(Outcome::TornDown(report.into_result()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::{MemoryTarget, Operation};
    use std::fs;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::TempDir;

    fn config_for(dir: &TempDir, command: &str, collection: &str) -> Config {
        Config {
            command: command.to_string(),
            path: dir.path().to_string_lossy().into_owned(),
            collection: collection.to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_up_reads_seeds_and_creates_collections() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("users.json"), "{}").unwrap();
        fs::write(dir.path().join("template.json"), "{}").unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        fs::write(dir.path().join("logs/events.json"), r#"{"capped": true, "size": 1024}"#)
            .unwrap();
        let config = config_for(&dir, "up", "all");
        let target = MemoryTarget::new();

        let outcome = dispatch(config.command().unwrap(), &config, &target)
            .await
            .unwrap();

        match outcome {
            Outcome::Migrated(report) => assert_eq!(report.created, vec!["events", "users"]),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(target.collections(), vec!["events", "users"]);
    }

    #[tokio::test]
    async fn test_malformed_seed_creates_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "{ broken").unwrap();
        fs::write(dir.path().join("c.json"), "{}").unwrap();
        let config = config_for(&dir, "up", "all");
        let target = MemoryTarget::new();

        let err = dispatch(Command::Up, &config, &target).await.unwrap_err();

        assert!(matches!(err, SeederError::SeedDecode { .. }));
        assert_eq!(err.exit_code(), 3);
        assert!(target.operations().is_empty());
    }

    #[tokio::test]
    async fn test_down_with_selection() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, "down", "x,y");
        let target = MemoryTarget::with_collections(&["x", "y", "z"]);

        dispatch(Command::Down, &config, &target).await.unwrap();

        assert_eq!(target.collections(), vec!["z"]);
    }

    #[tokio::test]
    async fn test_down_all_drops_database() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, "down", "all");
        let target = MemoryTarget::with_collections(&["x", "y"]);

        dispatch(Command::Down, &config, &target).await.unwrap();

        assert_eq!(target.operations(), vec![Operation::DropDatabase]);
        assert!(target.collections().is_empty());
    }

    #[tokio::test]
    async fn test_partial_teardown_is_an_error_after_all_attempts() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, "down", "x,y");
        let target = MemoryTarget::with_collections(&["x", "y"]).failing_on("x", "boom");

        let err = dispatch(Command::Down, &config, &target).await.unwrap_err();

        assert_eq!(err.exit_code(), 6);
        assert_eq!(target.collections(), vec!["x"]);
    }

    #[tokio::test]
    async fn test_invalid_command_never_connects() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, "sideways", "all");
        let connected = AtomicBool::new(false);

        let err = run(&config, || async {
            connected.store(true, Ordering::SeqCst);
            Ok(MemoryTarget::with_collections(&["x"]))
        })
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "sideways is invalid command");
        assert_eq!(err.exit_code(), 2);
        assert!(!connected.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_run_connects_dispatches_and_closes() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, "down", "x");
        let target = MemoryTarget::with_collections(&["x", "y"]);

        let outcome = run(&config, || async { Ok(&target) }).await.unwrap();

        assert!(matches!(outcome, Outcome::TornDown(_)));
        assert_eq!(
            target.operations(),
            vec![Operation::DropCollection("x".into()), Operation::Close]
        );
        assert_eq!(target.collections(), vec!["y"]);
    }

    #[tokio::test]
    async fn test_connection_failure_stops_the_run() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, "up", "all");

        let err = run(&config, || async {
            Err::<MemoryTarget, _>(SeederError::Connection(anyhow::anyhow!("refused")))
        })
        .await
        .unwrap_err();

        assert_eq!(err.exit_code(), 4);
    }
}
