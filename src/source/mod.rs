//! Loading the two static resources: the record array and the geography.
//!
//! Loads never fail outward. Any fetch or parse error is logged and the
//! caller receives an empty sequence.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::geo::{parse_geography, Geography};
use crate::logging::{log_load_failure, log_loaded};
use crate::record::Record;

mod dir;
mod http;

pub use dir::DirSource;
pub use http::HttpSource;

#[derive(Debug)]
pub enum LoadError {
    /// Transport failure before a response arrived.
    Fetch { resource: String, reason: String },
    /// Non-success HTTP status.
    Status { resource: String, status: u16 },
    /// The bytes did not parse into the expected shape.
    Parse { resource: String, reason: String },
    /// Local read failure.
    Io { resource: String, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Fetch { resource, reason } => write!(f, "fetch {} failed: {}", resource, reason),
            LoadError::Status { resource, status } => write!(f, "fetch {} returned status {}", resource, status),
            LoadError::Parse { resource, reason } => write!(f, "parse {} failed: {}", resource, reason),
            LoadError::Io { resource, reason } => write!(f, "read {} failed: {}", resource, reason),
        }
    }
}

impl std::error::Error for LoadError {}

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Raw bytes of the named resource.
    async fn load_bytes(&self, name: &str) -> Result<Vec<u8>, LoadError>;
}

#[async_trait]
impl<T: DataSource + ?Sized> DataSource for Box<T> {
    async fn load_bytes(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        (**self).load_bytes(name).await
    }
}

pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn parse_records(name: &str, bytes: &[u8]) -> Result<Vec<Record>, LoadError> {
    serde_json::from_slice(bytes).map_err(|e| LoadError::Parse {
        resource: name.to_string(),
        reason: e.to_string(),
    })
}

pub async fn try_load_records<S: DataSource + ?Sized>(
    source: &S,
    name: &str,
) -> Result<Vec<Record>, LoadError> {
    let bytes = source.load_bytes(name).await?;
    let records = parse_records(name, &bytes)?;
    log_loaded(name, bytes.len(), &fingerprint(&bytes), records.len());
    Ok(records)
}

/// Records from `name`, or empty on any failure.
pub async fn load_records<S: DataSource + ?Sized>(source: &S, name: &str) -> Vec<Record> {
    match try_load_records(source, name).await {
        Ok(records) => records,
        Err(err) => {
            log_load_failure(name, &err);
            Vec::new()
        }
    }
}

/// Geography from `name`, or an empty collection on any failure.
pub async fn load_geography<S: DataSource + ?Sized>(
    source: &S,
    name: &str,
    property: &str,
) -> Geography {
    let result = match source.load_bytes(name).await {
        Ok(bytes) => parse_geography(&bytes, property)
            .map(|geo| {
                log_loaded(name, bytes.len(), &fingerprint(&bytes), geo.features.len());
                geo
            })
            .map_err(|e| LoadError::Parse {
                resource: name.to_string(),
                reason: e.to_string(),
            }),
        Err(err) => Err(err),
    };
    result.unwrap_or_else(|err| {
        log_load_failure(name, &err);
        Geography::default()
    })
}
