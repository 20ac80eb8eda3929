/// Cat store contract and backends
///
/// [`CatStore`] is the seam between the menu commands and the storage
/// backend. Name lookups, updates and deletes act on the first document whose
/// `name` matches exactly; counts returned are matched (updates) or deleted
/// document counts.
///
/// # Backends
///
/// - [`MongoCatStore`]: a MongoDB collection
/// - [`MemoryCatStore`]: an ordered in-memory list with the same semantics
///
/// # Example
///
/// ```
/// use dbdesk_cats::models::cat::Cat;
/// use dbdesk_cats::store::{CatStore, MemoryCatStore};
///
/// # async fn example() -> dbdesk_cats::StoreResult<()> {
/// let store = MemoryCatStore::new("cats");
/// store.insert(Cat::new("Tom", 3, vec!["grey".to_string()])).await?;
/// assert_eq!(store.update_age("Tom", 4).await?, 1);
/// # Ok(())
/// # }
/// ```
use crate::error::StoreResult;
use crate::models::cat::Cat;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

pub mod memory;
pub mod mongo;

pub use memory::MemoryCatStore;
pub use mongo::MongoCatStore;

/// Operations on the cat collection
#[async_trait]
pub trait CatStore: Send + Sync {
    /// Name of the underlying collection
    fn collection_name(&self) -> &str;

    /// Creates the collection when it does not exist yet
    ///
    /// Returns `true` if it was created, `false` if it already existed.
    async fn ensure_collection(&self) -> StoreResult<bool>;

    /// Inserts a cat and returns its new id
    async fn insert(&self, cat: Cat) -> StoreResult<ObjectId>;

    /// Returns every cat in storage order
    async fn find_all(&self) -> StoreResult<Vec<Cat>>;

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Cat>>;

    /// Sets the age of the first cat with this name
    async fn update_age(&self, name: &str, age: i32) -> StoreResult<u64>;

    /// Adds a feature unless the cat already has it
    ///
    /// Returns the matched count: 1 even when the feature was already there.
    async fn add_feature(&self, name: &str, feature: &str) -> StoreResult<u64>;

    async fn delete_by_name(&self, name: &str) -> StoreResult<u64>;

    /// Deletes every cat in the collection
    async fn delete_all(&self) -> StoreResult<u64>;
}
