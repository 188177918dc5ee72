// ── Device registration ──
//
// A device is provisioned in two steps: the UUID is generated locally, then
// a single create request is signed with a freshly minted application API
// key. Nothing here retries; a failed registration is retried by the caller
// with a new UUID.

use rand::RngCore;
use rand::rngs::OsRng;
use resin_api::Query;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, info};

use crate::application::ApplicationModel;
use crate::client::Context;
use crate::error::CoreError;
use crate::model::Device;

/// Random bytes behind a device UUID.
pub const UUID_BYTES: usize = 31;

/// Length of a hex-encoded device UUID.
pub const UUID_LENGTH: usize = UUID_BYTES * 2;

/// Generate a new device UUID: 62 lowercase hex characters from the OS RNG.
pub fn generate_uuid() -> String {
    let mut bytes = [0u8; UUID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Whether `uuid` has the shape produced by [`generate_uuid`].
pub fn is_valid_uuid(uuid: &str) -> bool {
    uuid.len() == UUID_LENGTH
        && uuid
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Body of the device create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub user: u64,
    pub application: u64,
    pub device_type: String,
    pub uuid: String,
}

pub(crate) async fn register(
    ctx: &Context,
    applications: &ApplicationModel,
    application_name: &str,
    uuid: &str,
) -> Result<Device, CoreError> {
    debug!(application = application_name, uuid, "resolving registration inputs");
    let (user, api_key, application) = tokio::try_join!(
        ctx.session.user_id(),
        applications.get_api_key(application_name),
        applications.get(application_name),
    )?;

    let request = RegistrationRequest {
        user,
        application: application.id,
        device_type: application.device_type,
        uuid: uuid.to_owned(),
    };
    let body = serde_json::to_value(&request).map_err(|e| CoreError::Config {
        message: format!("cannot encode registration request: {e}"),
    })?;

    info!(
        application = application_name,
        uuid,
        device_type = %request.device_type,
        "registering device"
    );
    let query = Query::new("device").param("apikey", api_key.expose_secret());
    let device = ctx.resources.create(&query, body).await?;
    Ok(device)
}
