//! Tally Auth Core - Authentication business logic
//!
//! Registration and login against the credential store, Argon2id password
//! hashing, HS256 bearer tokens, and resolution of tokens to the acting
//! user.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::*;
pub use error::*;
pub use service::*;
pub use token::*;
