//! Authentication module for Taskgate.
//!
//! Two pieces: a stateless token verifier and the request gate that applies
//! it in front of protected routes. Credential issuance lives outside this
//! service; all we answer is whether a presented token is intact and
//! unexpired.

mod middleware;
mod token;

pub use middleware::*;
pub use token::*;
