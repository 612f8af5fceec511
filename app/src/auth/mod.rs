//! Authentication module
//!
//! Resolves the signed-in user from the backend-issued ID token.

mod token;

pub use token::{IdTokenClaims, TokenAuth};
