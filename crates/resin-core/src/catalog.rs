// ── Device-type catalog ──
//
// Read-only list of supported device types. The list itself comes from
// outside (the API's `/config` endpoint by default); the lookups below are
// pure functions over whatever list the catalog returned.

use async_trait::async_trait;
use resin_api::{Method, Transport};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CoreError;

/// Static metadata for one device type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceTypeManifest {
    pub slug: String,
    pub name: String,
    /// Remaining catalog fields (architecture, install instructions, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceTypeManifest {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Source of the device-type list.
#[async_trait]
pub trait DeviceTypeCatalog: Send + Sync {
    async fn device_types(&self) -> Result<Vec<DeviceTypeManifest>, CoreError>;
}

// ── Remote catalog ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct RemoteConfig {
    #[serde(rename = "deviceTypes", default)]
    device_types: Vec<DeviceTypeManifest>,
}

/// Reads `deviceTypes` from `GET /config` on every call.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    transport: Transport,
}

impl RemoteCatalog {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl DeviceTypeCatalog for RemoteCatalog {
    async fn device_types(&self) -> Result<Vec<DeviceTypeManifest>, CoreError> {
        debug!("fetching device types");
        let resp = self.transport.send(Method::GET, "/config", None).await?;
        let config: RemoteConfig = serde_json::from_value(resp.body.clone()).map_err(|e| {
            resin_api::Error::Deserialization {
                message: format!("unexpected /config shape: {e}"),
                body: resp.body.to_string(),
            }
        })?;
        Ok(config.device_types)
    }
}

// ── Static catalog ──────────────────────────────────────────────────

/// Fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    device_types: Vec<DeviceTypeManifest>,
}

impl StaticCatalog {
    pub fn new(device_types: Vec<DeviceTypeManifest>) -> Self {
        Self { device_types }
    }
}

#[async_trait]
impl DeviceTypeCatalog for StaticCatalog {
    async fn device_types(&self) -> Result<Vec<DeviceTypeManifest>, CoreError> {
        Ok(self.device_types.clone())
    }
}

// ── Lookups ─────────────────────────────────────────────────────────

pub fn find_by_slug<'a>(
    device_types: &'a [DeviceTypeManifest],
    slug: &str,
) -> Option<&'a DeviceTypeManifest> {
    device_types.iter().find(|dt| dt.slug == slug)
}

/// Canonical slug for a display name or a slug. Display names win when a
/// string matches both.
pub fn resolve_slug(device_types: &[DeviceTypeManifest], name_or_slug: &str) -> Option<String> {
    device_types
        .iter()
        .find(|dt| dt.name == name_or_slug)
        .or_else(|| find_by_slug(device_types, name_or_slug))
        .map(|dt| dt.slug.clone())
}
