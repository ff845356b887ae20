pub mod auth;
pub mod json;
pub mod response;

pub use auth::{identity_gate, AuthenticatedUser, GateError};
pub use json::ApiJson;
pub use response::{ApiResponse, ApiResult};
