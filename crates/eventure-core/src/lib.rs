//! Progression and social-graph rules for Eventure.
//!
//! Every operation takes the storage handle and any other collaborator
//! explicitly, plus the id of an already-authenticated user. Each operation
//! either commits all of its writes or none of them.

pub mod badges;
pub mod credentials;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod memories;
pub mod progression;
pub mod social;

#[cfg(test)]
pub(crate) mod testing;

pub use credentials::{Argon2Credentials, CredentialStore};
pub use error::{CoreError, ErrorKind};

pub type Result<T> = std::result::Result<T, CoreError>;
