// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::application::Application;
use super::link::Link;
use super::null_as_default;
use crate::error::CoreError;

/// A device record as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: u64,
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub device_type: String,
    /// Owning application; expanded when the query asked for it.
    #[serde(default)]
    pub application: Link<Application>,
    /// Space-separated address list, VPN address included.
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub vpn_address: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_online: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_web_accessible: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_time: Option<DateTime<Utc>>,
}

impl Device {
    /// Addresses reachable on the device's local network: every entry of
    /// `ip_address` except the VPN address, in their original order.
    pub fn local_ip_addresses(&self) -> Vec<String> {
        let vpn = self.vpn_address.as_deref();
        self.ip_address
            .as_deref()
            .unwrap_or_default()
            .split(' ')
            .filter(|addr| !addr.is_empty() && Some(*addr) != vpn)
            .map(str::to_owned)
            .collect()
    }
}

/// A device plus the name of the application it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceView {
    #[serde(flatten)]
    pub device: Device,
    pub application_name: String,
}

impl DeviceView {
    /// Build from a record fetched with the `application` expansion.
    pub fn from_expanded(device: Device) -> Result<Self, CoreError> {
        let application_name = device
            .application
            .first()
            .map(|app| app.app_name.clone())
            .ok_or_else(|| CoreError::MissingExpansion {
                uuid: device.uuid.clone(),
            })?;
        Ok(Self {
            device,
            application_name,
        })
    }
}
