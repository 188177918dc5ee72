// ── Device model ──
//
// Domain operations over the `device` resource, device-type lookups against
// the catalog, public device URLs and registration. Lookups by uuid always
// expand the owning application so views can report its name.

use std::sync::Arc;

use resin_api::{Direction, Filter, Method, Query};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::application::ApplicationModel;
use crate::catalog::{self, DeviceTypeManifest};
use crate::client::Context;
use crate::error::CoreError;
use crate::model::{Device, DeviceView};
use crate::registration;

const RESOURCE: &str = "device";

/// Handle for device operations. Cheap to clone.
#[derive(Clone)]
pub struct DeviceModel {
    ctx: Arc<Context>,
    applications: ApplicationModel,
}

impl DeviceModel {
    pub(crate) fn new(ctx: Arc<Context>) -> Self {
        let applications = ApplicationModel::new(Arc::clone(&ctx));
        Self { ctx, applications }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Every device visible to the session, ordered by name.
    pub async fn get_all(&self) -> Result<Vec<DeviceView>, CoreError> {
        self.fetch_views(Query::new(RESOURCE)).await
    }

    /// Every device of one application, ordered by name.
    pub async fn get_all_by_application(
        &self,
        application_name: &str,
    ) -> Result<Vec<DeviceView>, CoreError> {
        self.applications.get(application_name).await?;
        self.fetch_views(Query::new(RESOURCE).where_eq(
            "application",
            Filter::new().eq("app_name", application_name),
        ))
        .await
    }

    /// The device with this uuid.
    pub async fn get(&self, uuid: &str) -> Result<DeviceView, CoreError> {
        let query = Query::new(RESOURCE)
            .where_eq("uuid", uuid)
            .expand("application");
        let devices: Vec<Device> = self.ctx.resources.get_many(&query).await?;
        let device = devices
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::device_not_found(uuid))?;
        DeviceView::from_expanded(device)
    }

    /// All devices sharing a display name. Names are not unique.
    ///
    /// Results come back ordered by name like every other device listing.
    pub async fn get_by_name(&self, name: &str) -> Result<Vec<DeviceView>, CoreError> {
        let views = self
            .fetch_views(Query::new(RESOURCE).where_eq("name", name))
            .await?;
        if views.is_empty() {
            return Err(CoreError::device_not_found(name));
        }
        Ok(views)
    }

    pub async fn get_name(&self, uuid: &str) -> Result<String, CoreError> {
        Ok(self.get(uuid).await?.device.name)
    }

    pub async fn get_application_name(&self, uuid: &str) -> Result<String, CoreError> {
        Ok(self.get(uuid).await?.application_name)
    }

    pub async fn has(&self, uuid: &str) -> Result<bool, CoreError> {
        match self.get(uuid).await {
            Ok(_) => Ok(true),
            Err(CoreError::DeviceNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn is_online(&self, uuid: &str) -> Result<bool, CoreError> {
        Ok(self.get(uuid).await?.device.is_online)
    }

    /// Local network addresses of an online device, VPN address excluded.
    pub async fn get_local_ip_addresses(&self, uuid: &str) -> Result<Vec<String>, CoreError> {
        let view = self.get(uuid).await?;
        if !view.device.is_online {
            return Err(CoreError::DeviceOffline {
                uuid: uuid.to_owned(),
            });
        }
        Ok(view.device.local_ip_addresses())
    }

    // ── Writes ───────────────────────────────────────────────────────

    pub async fn remove(&self, uuid: &str) -> Result<(), CoreError> {
        self.ensure_exists(uuid).await?;
        info!(uuid, "removing device");
        self.ctx.resources.delete(&by_uuid(uuid)).await?;
        Ok(())
    }

    /// Blink the device's identification LED.
    pub async fn identify(&self, uuid: &str) -> Result<(), CoreError> {
        self.ensure_exists(uuid).await?;
        debug!(uuid, "identifying device");
        self.ctx
            .transport()
            .send(Method::POST, "/blink", Some(&json!({ "uuid": uuid })))
            .await?;
        Ok(())
    }

    pub async fn rename(&self, uuid: &str, new_name: &str) -> Result<(), CoreError> {
        self.update(uuid, json!({ "name": new_name })).await
    }

    pub async fn note(&self, uuid: &str, note: &str) -> Result<(), CoreError> {
        self.update(uuid, json!({ "note": note })).await
    }

    /// Move a device to another application of the same device type.
    pub async fn move_to(&self, uuid: &str, application_name: &str) -> Result<(), CoreError> {
        let (view, application) =
            tokio::try_join!(self.get(uuid), self.applications.get(application_name))?;

        if view.device.device_type != application.device_type {
            return Err(CoreError::IncompatibleDeviceType {
                application: application_name.to_owned(),
                device_type: view.device.device_type,
                application_device_type: application.device_type,
            });
        }

        info!(uuid, application = application_name, "moving device");
        self.ctx
            .resources
            .patch(&by_uuid(uuid), json!({ "application": application.id }))
            .await?;
        Ok(())
    }

    /// Restart the device's application container. Returns the API's reply.
    pub async fn restart(&self, uuid: &str) -> Result<Value, CoreError> {
        let view = self.get(uuid).await?;
        info!(uuid, id = view.device.id, "restarting device");
        let resp = self
            .ctx
            .transport()
            .send(
                Method::POST,
                &format!("/device/{}/restart", view.device.id),
                None,
            )
            .await?;
        Ok(resp.body)
    }

    // ── Device types ─────────────────────────────────────────────────

    /// Display name for a device type slug.
    pub async fn get_display_name(&self, slug: &str) -> Result<Option<String>, CoreError> {
        let device_types = self.ctx.catalog.device_types().await?;
        Ok(catalog::find_by_slug(&device_types, slug).map(|dt| dt.name.clone()))
    }

    /// Canonical slug for a display name or slug.
    pub async fn get_device_slug(&self, name_or_slug: &str) -> Result<Option<String>, CoreError> {
        let device_types = self.ctx.catalog.device_types().await?;
        Ok(catalog::resolve_slug(&device_types, name_or_slug))
    }

    pub async fn get_supported_device_types(&self) -> Result<Vec<String>, CoreError> {
        let device_types = self.ctx.catalog.device_types().await?;
        Ok(device_types.into_iter().map(|dt| dt.name).collect())
    }

    pub async fn get_manifest_by_slug(&self, slug: &str) -> Result<DeviceTypeManifest, CoreError> {
        let device_types = self.ctx.catalog.device_types().await?;
        device_types
            .into_iter()
            .find(|dt| dt.slug == slug)
            .ok_or_else(|| CoreError::UnsupportedDeviceType {
                slug: slug.to_owned(),
            })
    }

    pub async fn get_manifest_by_application(
        &self,
        application_name: &str,
    ) -> Result<DeviceTypeManifest, CoreError> {
        let application = self.applications.get(application_name).await?;
        self.get_manifest_by_slug(&application.device_type).await
    }

    // ── Registration ─────────────────────────────────────────────────

    pub fn generate_uuid(&self) -> String {
        registration::generate_uuid()
    }

    /// Register a new device with a pre-generated uuid.
    pub async fn register(
        &self,
        application_name: &str,
        uuid: &str,
    ) -> Result<Device, CoreError> {
        registration::register(&self.ctx, &self.applications, application_name, uuid).await
    }

    // ── Public URL ───────────────────────────────────────────────────

    pub async fn has_device_url(&self, uuid: &str) -> Result<bool, CoreError> {
        Ok(self.get(uuid).await?.device.is_web_accessible)
    }

    pub async fn get_device_url(&self, uuid: &str) -> Result<String, CoreError> {
        if !self.has_device_url(uuid).await? {
            return Err(CoreError::DeviceNotWebAccessible {
                uuid: uuid.to_owned(),
            });
        }
        Ok(self.ctx.config.device_url(uuid))
    }

    pub async fn enable_device_url(&self, uuid: &str) -> Result<(), CoreError> {
        self.update(uuid, json!({ "is_web_accessible": true })).await
    }

    pub async fn disable_device_url(&self, uuid: &str) -> Result<(), CoreError> {
        self.update(uuid, json!({ "is_web_accessible": false })).await
    }

    // ── Helpers ──────────────────────────────────────────────────────

    async fn ensure_exists(&self, uuid: &str) -> Result<(), CoreError> {
        if self.has(uuid).await? {
            Ok(())
        } else {
            Err(CoreError::device_not_found(uuid))
        }
    }

    async fn update(&self, uuid: &str, body: Value) -> Result<(), CoreError> {
        self.ensure_exists(uuid).await?;
        debug!(uuid, %body, "updating device");
        self.ctx.resources.patch(&by_uuid(uuid), body).await?;
        Ok(())
    }

    async fn fetch_views(&self, query: Query) -> Result<Vec<DeviceView>, CoreError> {
        let query = query
            .expand("application")
            .order_by("name", Direction::Asc);
        let devices: Vec<Device> = self.ctx.resources.get_many(&query).await?;
        debug!(count = devices.len(), "fetched devices");
        devices.into_iter().map(DeviceView::from_expanded).collect()
    }
}

fn by_uuid(uuid: &str) -> Query {
    Query::new(RESOURCE).where_eq("uuid", uuid)
}
