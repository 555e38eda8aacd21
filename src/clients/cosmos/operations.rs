//! Per-resource operations on [`CosmosClient`].
//!
//! These are thin compositions over the generic verbs and the feed engine:
//! they build the resource path, shape the request body, and pick the
//! resource kind. System resources (databases, collections, scripts, users,
//! permissions, offers) are returned as raw JSON; documents decode into the
//! caller's type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clients::cosmos::{CosmosClient, CosmosError, CosmosResponse, SqlQuery};
use crate::clients::{RequestOptions, ResponseHeaders};
use crate::feed::{FeedResponse, ProtocolError, ResourceKind};

/// Access granted by a permission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionMode {
    /// Read, write and delete.
    All,
    /// Read only.
    Read,
}

/// When a trigger runs relative to its operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerType {
    /// Runs before the operation.
    Pre,
    /// Runs after the operation, in the same transaction.
    Post,
}

/// Operation a trigger is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerOperation {
    /// Every write operation.
    All,
    /// Document creation.
    Create,
    /// Document replacement.
    Replace,
    /// Document deletion.
    Delete,
}

fn database_path(db: &str) -> String {
    ResourceKind::Databases.item_path("", db)
}

fn collection_path(db: &str, coll: &str) -> String {
    ResourceKind::Collections.item_path(&database_path(db), coll)
}

fn user_path(db: &str, user: &str) -> String {
    ResourceKind::Users.item_path(&database_path(db), user)
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, CosmosError> {
    Ok(serde_json::to_value(value).map_err(ProtocolError::from)?)
}

impl CosmosClient {
    // Databases

    /// Creates a database. Throughput set in `options` is provisioned on it.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn create_database(
        &self,
        id: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        self.post(&ResourceKind::Databases.feed_path(""), json!({ "id": id }), options)
            .await
    }

    /// Reads a database.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn get_database(
        &self,
        id: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        self.get(&database_path(id), options).await
    }

    /// Lists all databases of the account.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn list_databases(
        &self,
        options: &RequestOptions,
    ) -> Result<FeedResponse<Value>, CosmosError> {
        self.list(ResourceKind::Databases, "", options).await
    }

    /// Deletes a database and everything in it.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn delete_database(
        &self,
        id: &str,
        options: &RequestOptions,
    ) -> Result<ResponseHeaders, CosmosError> {
        self.delete(&database_path(id), options).await
    }

    // Collections

    /// Creates a collection partitioned on `partition_key_path` (e.g. `/tenant`).
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn create_collection(
        &self,
        db: &str,
        id: &str,
        partition_key_path: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        let body = json!({
            "id": id,
            "partitionKey": { "paths": [partition_key_path], "kind": "Hash" }
        });
        let path = ResourceKind::Collections.feed_path(&database_path(db));
        self.post(&path, body, options).await
    }

    /// Reads a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn get_collection(
        &self,
        db: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        self.get(&collection_path(db, id), options).await
    }

    /// Lists the collections of a database.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn list_collections(
        &self,
        db: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<Value>, CosmosError> {
        self.list(ResourceKind::Collections, &database_path(db), options)
            .await
    }

    /// Deletes a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn delete_collection(
        &self,
        db: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<ResponseHeaders, CosmosError> {
        self.delete(&collection_path(db, id), options).await
    }

    // Documents

    /// Creates a document.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the document cannot be serialized or the
    /// request fails.
    pub async fn create_document<T: Serialize + DeserializeOwned>(
        &self,
        db: &str,
        coll: &str,
        document: &T,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<T>, CosmosError> {
        let path = ResourceKind::Documents.feed_path(&collection_path(db, coll));
        self.post(&path, to_body(document)?, options).await
    }

    /// Creates a document, or replaces the one with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the document cannot be serialized or the
    /// request fails.
    pub async fn upsert_document<T: Serialize + DeserializeOwned>(
        &self,
        db: &str,
        coll: &str,
        document: &T,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<T>, CosmosError> {
        let options = options.clone().upsert();
        self.create_document(db, coll, document, &options).await
    }

    /// Replaces an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the document cannot be serialized or the
    /// request fails.
    pub async fn replace_document<T: Serialize + DeserializeOwned>(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        document: &T,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<T>, CosmosError> {
        let path = ResourceKind::Documents.item_path(&collection_path(db, coll), id);
        self.put(&path, to_body(document)?, options).await
    }

    /// Reads a document.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails or the body does not
    /// decode into `T`.
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<T>, CosmosError> {
        let path = ResourceKind::Documents.item_path(&collection_path(db, coll), id);
        self.get(&path, options).await
    }

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn delete_document(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<ResponseHeaders, CosmosError> {
        let path = ResourceKind::Documents.item_path(&collection_path(db, coll), id);
        self.delete(&path, options).await
    }

    /// Lists all documents of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        db: &str,
        coll: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<T>, CosmosError> {
        self.list(ResourceKind::Documents, &collection_path(db, coll), options)
            .await
    }

    /// Queries the documents of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn query_documents<T: DeserializeOwned>(
        &self,
        db: &str,
        coll: &str,
        query: impl Into<SqlQuery>,
        options: &RequestOptions,
    ) -> Result<FeedResponse<T>, CosmosError> {
        self.query(ResourceKind::Documents, &collection_path(db, coll), query, options)
            .await
    }

    /// Reads the change feed of a collection.
    ///
    /// Set `If-None-Match` in `options` to the etag of an earlier read
    /// (`FeedResponse::headers().etag`) to only receive later changes, and a
    /// partition key range id to read one range. When nothing changed the
    /// service answers `304 Not Modified` and the result is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn read_change_feed<T: DeserializeOwned>(
        &self,
        db: &str,
        coll: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<T>, CosmosError> {
        let options = options.clone().change_feed();
        self.list(ResourceKind::Documents, &collection_path(db, coll), &options)
            .await
    }

    // Server-side scripts

    /// Creates a stored procedure from its JavaScript source.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn create_stored_procedure(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        body: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        let path = ResourceKind::StoredProcedures.feed_path(&collection_path(db, coll));
        self.post(&path, json!({ "id": id, "body": body }), options)
            .await
    }

    /// Lists the stored procedures of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn list_stored_procedures(
        &self,
        db: &str,
        coll: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<Value>, CosmosError> {
        self.list(ResourceKind::StoredProcedures, &collection_path(db, coll), options)
            .await
    }

    /// Deletes a stored procedure.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn delete_stored_procedure(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<ResponseHeaders, CosmosError> {
        let path = ResourceKind::StoredProcedures.item_path(&collection_path(db, coll), id);
        self.delete(&path, options).await
    }

    /// Executes a stored procedure with positional parameters.
    ///
    /// Stored procedures run inside one partition; set the partition key in
    /// `options`.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails or the result does not
    /// decode into `T`.
    pub async fn execute_stored_procedure<T: DeserializeOwned>(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        params: &[Value],
        options: &RequestOptions,
    ) -> Result<CosmosResponse<T>, CosmosError> {
        let path = ResourceKind::StoredProcedures.item_path(&collection_path(db, coll), id);
        self.post(&path, Value::Array(params.to_vec()), options)
            .await
    }

    /// Creates a user-defined function from its JavaScript source.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn create_user_defined_function(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        body: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        let path = ResourceKind::UserDefinedFunctions.feed_path(&collection_path(db, coll));
        self.post(&path, json!({ "id": id, "body": body }), options)
            .await
    }

    /// Lists the user-defined functions of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn list_user_defined_functions(
        &self,
        db: &str,
        coll: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<Value>, CosmosError> {
        self.list(
            ResourceKind::UserDefinedFunctions,
            &collection_path(db, coll),
            options,
        )
        .await
    }

    /// Deletes a user-defined function.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn delete_user_defined_function(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<ResponseHeaders, CosmosError> {
        let path = ResourceKind::UserDefinedFunctions.item_path(&collection_path(db, coll), id);
        self.delete(&path, options).await
    }

    /// Creates a trigger from its JavaScript source.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_trigger(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        body: &str,
        trigger_type: TriggerType,
        operation: TriggerOperation,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        let body = json!({
            "id": id,
            "body": body,
            "triggerType": trigger_type,
            "triggerOperation": operation,
        });
        let path = ResourceKind::Triggers.feed_path(&collection_path(db, coll));
        self.post(&path, body, options).await
    }

    /// Lists the triggers of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn list_triggers(
        &self,
        db: &str,
        coll: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<Value>, CosmosError> {
        self.list(ResourceKind::Triggers, &collection_path(db, coll), options)
            .await
    }

    /// Deletes a trigger.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn delete_trigger(
        &self,
        db: &str,
        coll: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<ResponseHeaders, CosmosError> {
        let path = ResourceKind::Triggers.item_path(&collection_path(db, coll), id);
        self.delete(&path, options).await
    }

    // Users and permissions

    /// Creates a user in a database.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn create_user(
        &self,
        db: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        let path = ResourceKind::Users.feed_path(&database_path(db));
        self.post(&path, json!({ "id": id }), options).await
    }

    /// Lists the users of a database.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn list_users(
        &self,
        db: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<Value>, CosmosError> {
        self.list(ResourceKind::Users, &database_path(db), options)
            .await
    }

    /// Grants `user` access to the resource at `resource_link`
    /// (e.g. `dbs/MyDb/colls/Orders`).
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn create_permission(
        &self,
        db: &str,
        user: &str,
        id: &str,
        mode: PermissionMode,
        resource_link: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        let body = json!({
            "id": id,
            "permissionMode": mode,
            "resource": resource_link,
        });
        let path = ResourceKind::Permissions.feed_path(&user_path(db, user));
        self.post(&path, body, options).await
    }

    /// Reads a permission, including a freshly issued resource token.
    ///
    /// The token's validity is set with
    /// [`RequestOptions::resource_token_expiry_seconds`].
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Validation`] for an expiry outside the allowed
    /// range, before any request is sent, and [`CosmosError`] if the request
    /// fails.
    pub async fn get_permission(
        &self,
        db: &str,
        user: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        let path = ResourceKind::Permissions.item_path(&user_path(db, user), id);
        self.get(&path, options).await
    }

    /// Lists the permissions of a user, each with a resource token.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Validation`] for an expiry outside the allowed
    /// range, before any request is sent, and [`CosmosError`] if any page
    /// fails.
    pub async fn list_permissions(
        &self,
        db: &str,
        user: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<Value>, CosmosError> {
        self.list(ResourceKind::Permissions, &user_path(db, user), options)
            .await
    }

    // Partition key ranges

    /// Lists the physical partition key ranges of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn list_partition_key_ranges(
        &self,
        db: &str,
        coll: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<Value>, CosmosError> {
        self.list(
            ResourceKind::PartitionKeyRanges,
            &collection_path(db, coll),
            options,
        )
        .await
    }

    // Offers

    /// Lists the throughput offers of the account.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if any page fails.
    pub async fn list_offers(
        &self,
        options: &RequestOptions,
    ) -> Result<FeedResponse<Value>, CosmosError> {
        self.list(ResourceKind::Offers, "", options).await
    }

    /// Reads an offer by its resource id.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn get_offer(
        &self,
        id: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        self.get(&ResourceKind::Offers.item_path("", id), options)
            .await
    }

    /// Replaces an offer, e.g. to change provisioned throughput.
    ///
    /// `offer` is the full offer resource as read with [`get_offer`](Self::get_offer),
    /// with its `content` updated.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn replace_offer(
        &self,
        id: &str,
        offer: Value,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<Value>, CosmosError> {
        self.put(&ResourceKind::Offers.item_path("", id), offer, options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(database_path("D1"), "/dbs/D1");
        assert_eq!(collection_path("D1", "C1"), "/dbs/D1/colls/C1");
        assert_eq!(user_path("D1", "U1"), "/dbs/D1/users/U1");
    }

    #[test]
    fn test_script_enums_serialize_as_service_names() {
        assert_eq!(serde_json::to_value(TriggerType::Pre).unwrap(), "Pre");
        assert_eq!(serde_json::to_value(TriggerOperation::Replace).unwrap(), "Replace");
        assert_eq!(serde_json::to_value(PermissionMode::Read).unwrap(), "Read");
    }

    #[test]
    fn test_to_body_serializes_documents() {
        #[derive(Serialize)]
        struct Order {
            id: &'static str,
            total: u32,
        }

        let body = to_body(&Order { id: "o-1", total: 42 }).unwrap();
        assert_eq!(body, json!({"id": "o-1", "total": 42}));
    }
}
