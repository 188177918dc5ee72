// Resource client: CRUD over the `/ewa/{resource}` collections.
//
// Each call renders a `Query` into a request, performs exactly one round
// trip through the transport, and strips the `{ "d": [...] }` collection
// envelope before handing records back.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

/// Typed access to resource collections.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    transport: Transport,
}

impl ResourceClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Fetch every record the query selects.
    pub async fn get_many<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, Error> {
        debug!(resource = query.resource(), "fetching records");
        let resp = self
            .transport
            .execute(&query.to_request(Method::GET, None))
            .await?;
        decode(unwrap_collection(resp.body))
    }

    /// Fetch the record addressed by an id query, or `None` if the server
    /// returns nothing for it.
    pub async fn get_by_id<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>, Error> {
        let records: Vec<T> = self.get_many(query).await?;
        Ok(records.into_iter().next())
    }

    /// Insert a record and return what the server created.
    pub async fn create<T: DeserializeOwned>(&self, query: &Query, body: Value) -> Result<T, Error> {
        debug!(resource = query.resource(), "creating record");
        let resp = self
            .transport
            .execute(&query.to_request(Method::POST, Some(body)))
            .await?;
        decode(unwrap_single(resp.body))
    }

    /// Patch every record the query selects.
    pub async fn patch(&self, query: &Query, body: Value) -> Result<(), Error> {
        debug!(resource = query.resource(), "patching records");
        self.transport
            .execute(&query.to_request(Method::PATCH, Some(body)))
            .await?;
        Ok(())
    }

    /// Delete every record the query selects.
    pub async fn delete(&self, query: &Query) -> Result<(), Error> {
        debug!(resource = query.resource(), "deleting records");
        self.transport
            .execute(&query.to_request(Method::DELETE, None))
            .await?;
        Ok(())
    }
}

// ── Envelope handling ───────────────────────────────────────────────

/// Strip `{ "d": [...] }`; a bare array passes through, null becomes empty.
fn unwrap_collection(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("d") {
            Some(inner) => inner,
            None => Value::Array(vec![Value::Object(map)]),
        },
        Value::Null => Value::Array(Vec::new()),
        other => other,
    }
}

/// Creation responses are usually the bare record, but some deployments
/// wrap it in the collection envelope.
fn unwrap_single(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("d") {
            Some(Value::Array(items)) => items.into_iter().next().unwrap_or(Value::Null),
            Some(other) => other,
            None => Value::Object(map),
        },
        other => other,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value.clone()).map_err(|e| {
        let body = value.to_string();
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}
