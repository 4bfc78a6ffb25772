//! Association domain errors
//!
//! Every failure is either a validation short-circuit raised before any
//! network call (`InvalidParameter`) or a direct propagation of a transport
//! failure (`Transport`, `Lookup`). Nothing is retried or swallowed.

use thiserror::Error;

use core_kernel::{ObjectId, ObjectType, PortError};

use crate::registry::DefinitionCode;

/// Errors that can occur in the association domain
#[derive(Debug, Error)]
pub enum AssociationError {
    /// A caller-supplied parameter was rejected before any request was sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A request to HubSpot failed
    #[error("Transport failure: {0}")]
    Transport(#[from] PortError),

    /// Loading one of the associated objects failed; the whole expansion is
    /// abandoned
    #[error("Lookup of {object_type} {id} failed: {source}")]
    Lookup {
        object_type: ObjectType,
        id: ObjectId,
        #[source]
        source: PortError,
    },
}

impl AssociationError {
    /// Creates an InvalidParameter error for a definition code
    pub fn definition_not_supported(code: DefinitionCode) -> Self {
        AssociationError::InvalidParameter(format!("Definition not supported: {}", code))
    }

    /// Creates an InvalidParameter error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        AssociationError::InvalidParameter(message.into())
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, AssociationError::InvalidParameter(_))
    }

    /// HTTP status behind a transport or lookup failure, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AssociationError::Transport(source) | AssociationError::Lookup { source, .. } => {
                source.status_code()
            }
            AssociationError::InvalidParameter(_) => None,
        }
    }
}
