/// MongoDB backend for the cat store
///
/// The client is created lazily by the driver: building a [`MongoCatStore`]
/// never touches the network, so an unreachable server surfaces as an error
/// from the first operation (normally [`CatStore::ensure_collection`]).
use crate::config::MongoSettings;
use crate::error::StoreResult;
use crate::models::cat::Cat;
use crate::store::CatStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

/// A cat collection on a MongoDB server
#[derive(Clone)]
pub struct MongoCatStore {
    database: Database,
    collection: Collection<Cat>,
}

impl MongoCatStore {
    /// Creates a store for `settings.db_name` / `settings.collect`
    pub async fn connect(settings: &MongoSettings) -> StoreResult<Self> {
        info!(
            host = %settings.domain,
            port = settings.port,
            database = %settings.db_name,
            "Creating MongoDB client"
        );

        let client = Client::with_uri_str(settings.connection_uri()).await?;
        Ok(Self::from_database(
            client.database(&settings.db_name),
            &settings.collect,
        ))
    }

    /// Creates a store over an existing database handle
    pub fn from_database(database: Database, collection: &str) -> Self {
        let collection = database.collection::<Cat>(collection);
        MongoCatStore {
            database,
            collection,
        }
    }
}

#[async_trait]
impl CatStore for MongoCatStore {
    fn collection_name(&self) -> &str {
        self.collection.name()
    }

    async fn ensure_collection(&self) -> StoreResult<bool> {
        let existing = self.database.list_collection_names(None).await?;
        if existing.iter().any(|name| name == self.collection.name()) {
            debug!(collection = self.collection.name(), "Collection exists");
            return Ok(false);
        }

        self.database
            .create_collection(self.collection.name(), None)
            .await?;
        info!(collection = self.collection.name(), "Collection created");
        Ok(true)
    }

    async fn insert(&self, cat: Cat) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        self.collection.insert_one(cat.with_id(id), None).await?;
        Ok(id)
    }

    async fn find_all(&self) -> StoreResult<Vec<Cat>> {
        let cursor = self.collection.find(None, None).await?;
        let cats: Vec<Cat> = cursor.try_collect().await?;
        Ok(cats)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Cat>> {
        Ok(self.collection.find_one(doc! { "name": name }, None).await?)
    }

    async fn update_age(&self, name: &str, age: i32) -> StoreResult<u64> {
        let result = self
            .collection
            .update_one(doc! { "name": name }, doc! { "$set": { "age": age } }, None)
            .await?;
        Ok(result.matched_count)
    }

    async fn add_feature(&self, name: &str, feature: &str) -> StoreResult<u64> {
        let result = self
            .collection
            .update_one(
                doc! { "name": name },
                doc! { "$addToSet": { "features": feature } },
                None,
            )
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_by_name(&self, name: &str) -> StoreResult<u64> {
        let result = self
            .collection
            .delete_one(doc! { "name": name }, None)
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let result = self.collection.delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }
}
