// ── Client facade ──
//
// `Resin` owns the shared context every model handle reads from: the
// resource client, the session, the device-type catalog and the runtime
// configuration. Handles are thin `Arc` wrappers and hold no state of
// their own between calls.

use std::fmt;
use std::sync::Arc;

use resin_api::{ResourceClient, TokenStore, Transport};

use crate::application::ApplicationModel;
use crate::catalog::{DeviceTypeCatalog, RemoteCatalog};
use crate::config::ClientConfig;
use crate::device::DeviceModel;
use crate::error::CoreError;
use crate::os::OsModel;
use crate::session::SessionContext;

/// Shared state behind every model handle.
pub(crate) struct Context {
    pub(crate) resources: ResourceClient,
    pub(crate) session: Arc<dyn SessionContext>,
    pub(crate) catalog: Arc<dyn DeviceTypeCatalog>,
    pub(crate) config: ClientConfig,
}

impl Context {
    pub(crate) fn transport(&self) -> &Transport {
        self.resources.transport()
    }
}

/// Entry point to the resin API.
///
/// ```no_run
/// # async fn run() -> Result<(), resin_core::CoreError> {
/// let resin = resin_core::Resin::new(resin_core::ClientConfig::default())?;
/// for app in resin.applications().get_all().await? {
///     println!("{} ({} devices)", app.application.app_name, app.devices_length);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Resin {
    ctx: Arc<Context>,
}

impl Resin {
    /// Build a client backed by the HTTP transport. The session is decoded
    /// from `config.token` and device types come from the API's `/config`.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let token = Arc::new(
            config
                .token
                .clone()
                .map(TokenStore::with_token)
                .unwrap_or_default(),
        );
        let transport = Transport::new(
            config.api_url.clone(),
            Arc::clone(&token),
            &config.transport_config(),
        )?;
        let catalog = Arc::new(RemoteCatalog::new(transport.clone()));
        Ok(Self::from_parts(transport, token, catalog, config))
    }

    /// Assemble a client from caller-supplied parts.
    pub fn from_parts(
        transport: Transport,
        session: Arc<dyn SessionContext>,
        catalog: Arc<dyn DeviceTypeCatalog>,
        config: ClientConfig,
    ) -> Self {
        Self {
            ctx: Arc::new(Context {
                resources: ResourceClient::new(transport),
                session,
                catalog,
                config,
            }),
        }
    }

    pub fn applications(&self) -> ApplicationModel {
        ApplicationModel::new(Arc::clone(&self.ctx))
    }

    pub fn devices(&self) -> DeviceModel {
        DeviceModel::new(Arc::clone(&self.ctx))
    }

    pub fn os(&self) -> OsModel {
        OsModel::new(Arc::clone(&self.ctx))
    }

    pub fn session(&self) -> &Arc<dyn SessionContext> {
        &self.ctx.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.ctx.config
    }

    /// The token store the transport authenticates with.
    pub fn token(&self) -> &Arc<TokenStore> {
        self.ctx.transport().token()
    }
}

impl fmt::Debug for Resin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resin")
            .field("api_url", &self.ctx.config.api_url.as_str())
            .finish_non_exhaustive()
    }
}
