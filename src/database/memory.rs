use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::options::CreateCollectionOptions;

use crate::database::target::SeedTarget;
use crate::errors::CollectionError;

/// Operation recorded by [`MemoryTarget`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create(String),
    DropDatabase,
    DropCollection(String),
    Close,
}

#[derive(Debug, Default)]
struct State {
    collections: BTreeSet<String>,
    operations: Vec<Operation>,
}

/// In-memory database used to exercise the executors.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    state: Mutex<State>,
    failures: BTreeMap<String, String>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collections(names: &[&str]) -> Self {
        let target = Self::new();
        target
            .state
            .lock()
            .unwrap()
            .collections
            .extend(names.iter().map(|n| n.to_string()));
        target
    }

    /// Every operation on `name` fails with `message`.
    pub fn failing_on(mut self, name: &str, message: &str) -> Self {
        self.failures.insert(name.to_string(), message.to_string());
        self
    }

    pub fn collections(&self) -> Vec<String> {
        self.state.lock().unwrap().collections.iter().cloned().collect()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    fn injected_failure(&self, name: &str) -> Result<(), CollectionError> {
        match self.failures.get(name) {
            Some(message) => Err(CollectionError::Failed {
                collection: name.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SeedTarget for MemoryTarget {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create_collection(
        &self,
        name: &str,
        _options: &CreateCollectionOptions,
    ) -> Result<(), CollectionError> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(Operation::Create(name.to_string()));
        self.injected_failure(name)?;
        if !state.collections.insert(name.to_string()) {
            return Err(CollectionError::AlreadyExists(name.to_string()));
        }
        Ok(())
    }

    async fn drop_database(&self) -> Result<(), CollectionError> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(Operation::DropDatabase);
        state.collections.clear();
        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> Result<(), CollectionError> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(Operation::DropCollection(name.to_string()));
        self.injected_failure(name)?;
        state.collections.remove(name);
        Ok(())
    }

    async fn close(&self) {
        self.state.lock().unwrap().operations.push(Operation::Close);
    }
}
