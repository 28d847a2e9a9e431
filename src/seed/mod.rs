pub mod reader;

use std::collections::btree_map::{self, BTreeMap};

use mongodb::options::CreateCollectionOptions;

pub use reader::{read_seeds, TEMPLATE_FILE};

/// Collection-creation options keyed by collection name.
#[derive(Debug, Clone, Default)]
pub struct SeedSet {
    seeds: BTreeMap<String, CreateCollectionOptions>,
}

impl SeedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a seed, replacing any earlier seed with the same name.
    pub fn insert(&mut self, collection: String, options: CreateCollectionOptions) {
        self.seeds.insert(collection, options);
    }

    pub fn get(&self, collection: &str) -> Option<&CreateCollectionOptions> {
        self.seeds.get(collection)
    }

    pub fn names(&self) -> Vec<&str> {
        self.seeds.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, CreateCollectionOptions> {
        self.seeds.iter()
    }
}

impl<'a> IntoIterator for &'a SeedSet {
    type Item = (&'a String, &'a CreateCollectionOptions);
    type IntoIter = btree_map::Iter<'a, String, CreateCollectionOptions>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, CreateCollectionOptions)> for SeedSet {
    fn from_iter<I: IntoIterator<Item = (String, CreateCollectionOptions)>>(iter: I) -> Self {
        Self {
            seeds: iter.into_iter().collect(),
        }
    }
}
