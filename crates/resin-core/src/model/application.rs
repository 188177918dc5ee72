// ── Application domain types ──

use serde::{Deserialize, Serialize};

use super::device::Device;
use super::link::Link;

/// An application record as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: u64,
    pub app_name: String,
    pub device_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Present only when the query expanded `device`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Link<Device>>,
}

impl Application {
    /// Devices inlined by a `device` expansion; empty when not expanded.
    pub fn devices(&self) -> &[Device] {
        self.device
            .as_ref()
            .and_then(Link::expanded)
            .unwrap_or_default()
    }
}

/// An application together with counters derived from its device set.
///
/// The counters are computed when the summary is built and are not stored
/// anywhere server-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationSummary {
    #[serde(flatten)]
    pub application: Application,
    pub online_devices: usize,
    pub devices_length: usize,
}

impl From<Application> for ApplicationSummary {
    fn from(application: Application) -> Self {
        let devices = application.devices();
        let online_devices = devices.iter().filter(|d| d.is_online).count();
        let devices_length = devices.len();
        Self {
            application,
            online_devices,
            devices_length,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn device(id: u64, online: bool) -> serde_json::Value {
        json!({
            "id": id,
            "uuid": format!("uuid-{id}"),
            "name": format!("dev-{id}"),
            "device_type": "raspberry-pi",
            "application": { "__deferred": {}, "__id": 1 },
            "is_online": online
        })
    }

    #[test]
    fn summary_counts_online_devices() {
        let app: Application = serde_json::from_value(json!({
            "id": 1,
            "app_name": "Fleet",
            "device_type": "raspberry-pi",
            "device": [device(1, true), device(2, false), device(3, true)]
        }))
        .unwrap();

        let summary = ApplicationSummary::from(app);
        assert_eq!(summary.online_devices, 2);
        assert_eq!(summary.devices_length, 3);
    }

    #[test]
    fn summary_without_devices_is_zero() {
        for raw in [
            json!({ "id": 1, "app_name": "Empty", "device_type": "raspberry-pi" }),
            json!({ "id": 1, "app_name": "Empty", "device_type": "raspberry-pi", "device": [] }),
        ] {
            let app: Application = serde_json::from_value(raw).unwrap();
            let summary = ApplicationSummary::from(app);
            assert_eq!(summary.online_devices, 0);
            assert_eq!(summary.devices_length, 0);
        }
    }

    #[test]
    fn summary_serializes_flat() {
        let app: Application = serde_json::from_value(json!({
            "id": 4,
            "app_name": "Flat",
            "device_type": "intel-edison"
        }))
        .unwrap();
        let value = serde_json::to_value(ApplicationSummary::from(app)).unwrap();
        assert_eq!(value["app_name"], "Flat");
        assert_eq!(value["devices_length"], 0);
    }
}
