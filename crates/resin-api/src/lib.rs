// resin-api: Async transport, query builder and resource client for the resin fleet API

pub mod auth;
pub mod error;
pub mod query;
pub mod resource;
pub mod transport;

pub use auth::{TokenClaims, TokenStore};
pub use error::Error;
pub use query::{Direction, Filter, FilterValue, OrderBy, Query, Request, Selector};
pub use resource::ResourceClient;
pub use transport::{ByteStream, Response, Transport, TransportConfig};

pub use reqwest::Method;
