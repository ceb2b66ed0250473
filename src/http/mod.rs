//! Authenticated HTTP session
//!
//! Provides the session object used to talk to one tenant deployment:
//! a shared base URL, default headers, a TLS-verification policy, and the
//! auth headers installed by login.

mod session;

pub use session::{ApiSession, LoginResponse, SessionConfig, SessionConfigBuilder};
