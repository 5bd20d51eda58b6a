// Authentication
//
// Identities are issued by an external provider. This module only verifies
// access tokens and exposes the caller as an extractor.

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::{AuthConfig, AuthMode, JwtConfig};
pub use jwt::JwtService;
pub use middleware::{AuthError, AuthState, AuthUser, FromRef, OptionalAuthUser};
