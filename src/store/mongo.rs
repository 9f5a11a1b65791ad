//! MongoDB-backed document store
//!
//! One collection of post documents keyed by an integer `id` field. The
//! client is built once at startup and pools connections internally.
//!
//! The conditional insert rides on a unique index over `id`: a plain
//! `insert_one` either succeeds or fails with a duplicate-key write error
//! (code 11000), which maps to `InsertOutcome::AlreadyExists`. There is no
//! separate existence check anywhere, so concurrent inserts for the same id
//! cannot both land.

use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document as BsonDocument};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use std::time::Duration;
use tracing::{debug, info};

use super::{DocumentStore, InsertOutcome, StoreError};
use crate::types::{Document, PostId};

/// Mongo write error code for a unique-index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Store adapter over a shared MongoDB client.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<BsonDocument>,
}

impl MongoStore {
    /// Connect to MongoDB and bind to the posts collection.
    ///
    /// `op_timeout` bounds server selection and connection setup; a store
    /// that cannot be reached within it reports `Unavailable` rather than
    /// hanging the request.
    pub async fn connect(
        url: &str,
        database: &str,
        collection: &str,
        op_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| StoreError::Unavailable(format!("invalid mongodb url: {}", e)))?;
        options.server_selection_timeout = Some(op_timeout);
        options.connect_timeout = Some(op_timeout);

        let client =
            Client::with_options(options).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let collection = client.database(database).collection(collection);

        debug!(url = url, database = database, "Connected to MongoDB");
        Ok(Self { collection })
    }

    /// Create the unique index on `id` that `insert_if_absent` relies on.
    ///
    /// Idempotent; called once at startup.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_index(index, None)
            .await
            .map_err(|e| StoreError::Unavailable(format!("index creation failed: {}", e)))?;

        info!(collection = %self.collection.name(), "Unique id index ensured");
        Ok(())
    }

    fn to_bson(id: PostId, doc: &Document) -> Result<BsonDocument, StoreError> {
        let mut bdoc = mongodb::bson::to_document(doc)
            .map_err(|e| StoreError::Convert(e.to_string()))?;
        // The unique index keys on an integer `id`; pin the field to the
        // parsed id regardless of how the origin encoded it.
        bdoc.insert("id", Bson::Int64(id.as_i64()));
        Ok(bdoc)
    }

    fn from_bson(mut bdoc: BsonDocument) -> Document {
        // `_id` is Mongo's synthetic key, not part of the payload.
        bdoc.remove("_id");
        bdoc.into_iter()
            .map(|(k, v)| (k, serde_json::Value::from(v)))
            .collect()
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Document>, StoreError> {
        let found = self
            .collection
            .find_one(doc! { "id": id.as_i64() }, None)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(found.map(Self::from_bson))
    }

    async fn insert_if_absent(
        &self,
        id: PostId,
        doc: &Document,
    ) -> Result<InsertOutcome, StoreError> {
        let bdoc = Self::to_bson(id, doc)?;

        match self.collection.insert_one(bdoc, None).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::AlreadyExists),
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE
    )
}
