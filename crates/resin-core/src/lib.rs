// resin-core: Application and device models for the resin fleet API
//
// `Resin` is the entry point. It hands out model handles that share one
// transport, one session context and one device-type catalog:
//
//   Resin ─┬─ ApplicationModel   (application CRUD, restart, API keys)
//          ├─ DeviceModel        (device CRUD, actions, URLs, registration)
//          └─ OsModel            (OS image downloads)

pub mod application;
pub mod callback;
pub mod catalog;
pub mod client;
pub mod config;
pub mod device;
pub mod error;
pub mod model;
pub mod os;
pub mod registration;
pub mod session;

pub use resin_api;

pub use application::ApplicationModel;
pub use callback::spawn_with_callback;
pub use catalog::{DeviceTypeCatalog, DeviceTypeManifest, RemoteCatalog, StaticCatalog};
pub use client::Resin;
pub use config::ClientConfig;
pub use device::DeviceModel;
pub use error::CoreError;
pub use model::{Application, ApplicationSummary, Device, DeviceView, Link};
pub use os::OsModel;
pub use registration::{RegistrationRequest, generate_uuid, is_valid_uuid};
pub use session::{SessionContext, StaticSession};
