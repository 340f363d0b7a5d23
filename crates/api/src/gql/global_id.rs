//! Relay global object identifiers.
//!
//! A global ID is `base64("{TypeName}:{local_id}")`. Clients treat it as
//! opaque; the server uses the type name to route `node(id:)` lookups.

use std::fmt::Display;

use async_graphql::ID;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlobalIdError {
    #[error("Invalid global ID: {0:?}")]
    Malformed(String),

    #[error("Expected a {expected} ID but got a {actual} ID")]
    WrongType {
        expected: &'static str,
        actual: String,
    },

    #[error("Invalid {type_name} ID: {local_id:?}")]
    InvalidLocalId { type_name: String, local_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalId {
    pub type_name: String,
    pub local_id: String,
}

impl GlobalId {
    pub fn new(type_name: impl Into<String>, local_id: impl Display) -> Self {
        Self {
            type_name: type_name.into(),
            local_id: local_id.to_string(),
        }
    }

    pub fn encode(&self) -> ID {
        ID(STANDARD.encode(format!("{}:{}", self.type_name, self.local_id)))
    }

    pub fn decode(id: &str) -> Result<Self, GlobalIdError> {
        let malformed = || GlobalIdError::Malformed(id.to_string());

        let bytes = STANDARD.decode(id).map_err(|_| malformed())?;
        let plain = String::from_utf8(bytes).map_err(|_| malformed())?;
        let (type_name, local_id) = plain.split_once(':').ok_or_else(malformed)?;
        if type_name.is_empty() || local_id.is_empty() {
            return Err(malformed());
        }

        Ok(Self::new(type_name, local_id))
    }

    /// Decode and require a specific type name.
    pub fn decode_as(id: &str, expected: &'static str) -> Result<Self, GlobalIdError> {
        let gid = Self::decode(id)?;
        if gid.type_name != expected {
            return Err(GlobalIdError::WrongType {
                expected,
                actual: gid.type_name,
            });
        }
        Ok(gid)
    }

    pub fn to_uuid(&self) -> Result<Uuid, GlobalIdError> {
        Uuid::parse_str(&self.local_id).map_err(|_| GlobalIdError::InvalidLocalId {
            type_name: self.type_name.clone(),
            local_id: self.local_id.clone(),
        })
    }
}

/// Encode a local id under `type_name`.
pub fn to_global_id(type_name: &str, local_id: impl Display) -> ID {
    GlobalId::new(type_name, local_id).encode()
}

/// Decode a global id of type `expected` into the row's uuid.
pub fn uuid_from_global_id(id: &ID, expected: &'static str) -> Result<Uuid, GlobalIdError> {
    GlobalId::decode_as(id.as_str(), expected)?.to_uuid()
}
