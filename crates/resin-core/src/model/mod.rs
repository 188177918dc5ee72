// ── Domain model ──
//
// Records as the API returns them, plus the read-time views that carry
// derived fields. Views wrap a fetched record; they never write into it.

pub mod application;
pub mod device;
pub mod link;

pub use application::{Application, ApplicationSummary};
pub use device::{Device, DeviceView};
pub use link::Link;

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
