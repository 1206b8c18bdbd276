//! HTTP surface and serving helpers behind the `orgchart` binary.

pub mod http_api;
pub mod server_security;

pub use http_api::{router, ApiError, AppState};
pub use server_security::resolve_guarded_bind_addr;
