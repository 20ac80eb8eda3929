/// In-memory backend for the cat store
///
/// Keeps cats in insertion order behind a `tokio::sync::Mutex` and mirrors
/// the MongoDB semantics: lookups and single-document writes act on the first
/// matching name, `add_feature` behaves like `$addToSet`, and the collection
/// counts as existing once `ensure_collection` has run.
use crate::error::StoreResult;
use crate::models::cat::Cat;
use crate::store::CatStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    created: bool,
    cats: Vec<Cat>,
}

/// A cat collection held in memory
#[derive(Debug)]
pub struct MemoryCatStore {
    name: String,
    state: Mutex<State>,
}

impl MemoryCatStore {
    pub fn new(name: impl Into<String>) -> Self {
        MemoryCatStore {
            name: name.into(),
            state: Mutex::new(State::default()),
        }
    }

    /// Snapshot of the stored cats
    pub async fn cats(&self) -> Vec<Cat> {
        self.state.lock().await.cats.clone()
    }
}

#[async_trait]
impl CatStore for MemoryCatStore {
    fn collection_name(&self) -> &str {
        &self.name
    }

    async fn ensure_collection(&self) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        let created = !state.created;
        state.created = true;
        Ok(created)
    }

    async fn insert(&self, cat: Cat) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        let mut state = self.state.lock().await;
        state.created = true;
        state.cats.push(cat.with_id(id));
        Ok(id)
    }

    async fn find_all(&self) -> StoreResult<Vec<Cat>> {
        Ok(self.cats().await)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Cat>> {
        let state = self.state.lock().await;
        Ok(state.cats.iter().find(|cat| cat.name == name).cloned())
    }

    async fn update_age(&self, name: &str, age: i32) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        match state.cats.iter_mut().find(|cat| cat.name == name) {
            Some(cat) => {
                cat.age = age.into();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn add_feature(&self, name: &str, feature: &str) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        let Some(cat) = state.cats.iter_mut().find(|cat| cat.name == name) else {
            return Ok(0);
        };
        if !cat.features.iter().any(|existing| existing == feature) {
            cat.features.push(feature.to_string());
        }
        Ok(1)
    }

    async fn delete_by_name(&self, name: &str) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        match state.cats.iter().position(|cat| cat.name == name) {
            Some(index) => {
                state.cats.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        let deleted = state.cats.len() as u64;
        state.cats.clear();
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(list: &[&str]) -> Vec<String> {
        list.iter().map(|f| f.to_string()).collect()
    }

    #[tokio::test]
    async fn test_ensure_collection_reports_creation_once() {
        let store = MemoryCatStore::new("cats");
        assert!(store.ensure_collection().await.unwrap());
        assert!(!store.ensure_collection().await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryCatStore::new("cats");
        let first = store.insert(Cat::new("Tom", 3, vec![])).await.unwrap();
        let second = store.insert(Cat::new("Tom", 5, vec![])).await.unwrap();
        assert_ne!(first, second);

        let cats = store.find_all().await.unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].id, Some(first));
    }

    #[tokio::test]
    async fn test_writes_act_on_first_match() {
        let store = MemoryCatStore::new("cats");
        store.insert(Cat::new("Tom", 3, vec![])).await.unwrap();
        store.insert(Cat::new("Tom", 5, vec![])).await.unwrap();

        assert_eq!(store.update_age("Tom", 9).await.unwrap(), 1);
        let cats = store.cats().await;
        assert_eq!(cats[0].age, 9);
        assert_eq!(cats[1].age, 5);

        assert_eq!(store.delete_by_name("Tom").await.unwrap(), 1);
        let cats = store.cats().await;
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].age, 5);
    }

    #[tokio::test]
    async fn test_add_feature_has_set_semantics() {
        let store = MemoryCatStore::new("cats");
        store
            .insert(Cat::new("Tom", 3, features(&["grey", "loud"])))
            .await
            .unwrap();

        assert_eq!(store.add_feature("Tom", "loud").await.unwrap(), 1);
        assert_eq!(store.add_feature("Tom", "fluffy").await.unwrap(), 1);

        let tom = store.find_by_name("Tom").await.unwrap().unwrap();
        assert_eq!(tom.features, features(&["grey", "loud", "fluffy"]));
    }

    #[tokio::test]
    async fn test_missing_name_matches_nothing() {
        let store = MemoryCatStore::new("cats");
        assert_eq!(store.update_age("Ghost", 1).await.unwrap(), 0);
        assert_eq!(store.add_feature("Ghost", "invisible").await.unwrap(), 0);
        assert_eq!(store.delete_by_name("Ghost").await.unwrap(), 0);
        assert!(store.find_by_name("Ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_all_counts_removed() {
        let store = MemoryCatStore::new("cats");
        assert_eq!(store.delete_all().await.unwrap(), 0);

        store.insert(Cat::new("Tom", 3, vec![])).await.unwrap();
        store.insert(Cat::new("Kit", 1, vec![])).await.unwrap();
        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
