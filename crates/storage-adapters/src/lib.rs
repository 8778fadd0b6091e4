//! Infrastructure adapters behind the `domains` storage ports.
//!
//! In-memory adapters are always compiled; Postgres and S3 sit behind the
//! `db-postgres` and `media-s3` features, mirroring how the binary is
//! composed.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

#[cfg(feature = "media-s3")]
pub mod s3;
