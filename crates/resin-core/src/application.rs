// ── Application model ──
//
// Domain operations over the `application` resource. Every lookup by name
// goes through `get`, so a missing application surfaces as
// `ApplicationNotFound` before any follow-up request is made.

use std::sync::Arc;

use resin_api::{Direction, Method, Query};
use secrecy::SecretString;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::catalog;
use crate::client::Context;
use crate::error::CoreError;
use crate::model::{Application, ApplicationSummary};

const RESOURCE: &str = "application";

/// Handle for application operations. Cheap to clone.
#[derive(Clone)]
pub struct ApplicationModel {
    ctx: Arc<Context>,
}

impl ApplicationModel {
    pub(crate) fn new(ctx: Arc<Context>) -> Self {
        Self { ctx }
    }

    /// All applications of the current user, ordered by name, with device
    /// counters derived from the expanded device set.
    pub async fn get_all(&self) -> Result<Vec<ApplicationSummary>, CoreError> {
        let user_id = self.ctx.session.user_id().await?;
        let query = Query::new(RESOURCE)
            .where_eq("user", user_id)
            .expand("device")
            .order_by("app_name", Direction::Asc);

        let applications: Vec<Application> = self.ctx.resources.get_many(&query).await?;
        debug!(count = applications.len(), "fetched applications");
        Ok(applications
            .into_iter()
            .map(ApplicationSummary::from)
            .collect())
    }

    /// The application with this exact name.
    pub async fn get(&self, name: &str) -> Result<Application, CoreError> {
        let query = Query::new(RESOURCE).where_eq("app_name", name);
        let applications: Vec<Application> = self.ctx.resources.get_many(&query).await?;
        applications
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::application_not_found(name))
    }

    pub async fn has(&self, name: &str) -> Result<bool, CoreError> {
        match self.get(name).await {
            Ok(_) => Ok(true),
            Err(CoreError::ApplicationNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn has_any(&self) -> Result<bool, CoreError> {
        Ok(!self.get_all().await?.is_empty())
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Application, CoreError> {
        let application: Option<Application> = self
            .ctx
            .resources
            .get_by_id(&Query::by_id(RESOURCE, id))
            .await?;
        application.ok_or_else(|| CoreError::application_not_found(id))
    }

    /// Create an application for a device type given by display name or slug.
    pub async fn create(&self, name: &str, device_type: &str) -> Result<Application, CoreError> {
        let device_types = self.ctx.catalog.device_types().await?;
        let slug = catalog::resolve_slug(&device_types, device_type).ok_or_else(|| {
            CoreError::InvalidDeviceType {
                identifier: device_type.to_owned(),
            }
        })?;

        info!(name, device_type = %slug, "creating application");
        let created = self
            .ctx
            .resources
            .create(
                &Query::new(RESOURCE),
                json!({ "app_name": name, "device_type": slug }),
            )
            .await?;
        Ok(created)
    }

    pub async fn remove(&self, name: &str) -> Result<(), CoreError> {
        self.get(name).await?;
        info!(name, "removing application");
        self.ctx
            .resources
            .delete(&Query::new(RESOURCE).where_eq("app_name", name))
            .await?;
        Ok(())
    }

    /// Restart every device of the application.
    pub async fn restart(&self, name: &str) -> Result<(), CoreError> {
        let application = self.get(name).await?;
        info!(name, id = application.id, "restarting application");
        self.ctx
            .transport()
            .send(
                Method::POST,
                &format!("/application/{}/restart", application.id),
                None,
            )
            .await?;
        Ok(())
    }

    /// Mint a new API key scoped to the application.
    ///
    /// Every call issues a fresh key. A reply that is not a non-empty
    /// string is a deserialization error.
    pub async fn get_api_key(&self, name: &str) -> Result<SecretString, CoreError> {
        let application = self.get(name).await?;
        debug!(name, id = application.id, "generating application API key");
        let resp = self
            .ctx
            .transport()
            .send(
                Method::POST,
                &format!("/application/{}/generate-api-key", application.id),
                None,
            )
            .await?;

        match resp.body {
            Value::String(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
            other => Err(resin_api::Error::Deserialization {
                message: "expected an API key string".into(),
                body: other.to_string(),
            }
            .into()),
        }
    }
}
