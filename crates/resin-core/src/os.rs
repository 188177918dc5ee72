// OS image downloads from the image maker service.

use std::sync::Arc;

use resin_api::{ByteStream, Method};
use tracing::info;
use url::Url;

use crate::client::Context;
use crate::error::CoreError;

#[derive(Clone)]
pub struct OsModel {
    ctx: Arc<Context>,
}

impl OsModel {
    pub(crate) fn new(ctx: Arc<Context>) -> Self {
        Self { ctx }
    }

    /// Image maker URL for a device type slug. The image path is absolute,
    /// so any path on the configured base is replaced.
    pub fn image_url(&self, device_type: &str) -> Result<Url, CoreError> {
        Ok(self
            .ctx
            .config
            .image_maker_url
            .join(&format!("/api/v1/image/{device_type}/"))?)
    }

    /// Stream the OS image for a device type. The caller decides where the
    /// bytes go; nothing is buffered here.
    pub async fn download(&self, device_type: &str) -> Result<ByteStream, CoreError> {
        let url = self.image_url(device_type)?;
        info!(device_type, %url, "downloading OS image");
        Ok(self.ctx.transport().stream(Method::GET, url).await?)
    }
}
