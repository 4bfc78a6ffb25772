//! HubSpot Associations CLI
//!
//! Argument parsing and command execution for the `hubspot-assoc` binary.
//! Commands run against an `AssociationClient`, so they can be exercised
//! with any transport.
//!
//! # Example
//!
//! ```bash
//! HUBSPOT_ACCESS_TOKEN=pat-... hubspot-assoc list --resource-id 42 --definition 3
//! hubspot-assoc create --from 42 --to 7 --definition 3
//! hubspot-assoc types --from-type deals --to-type contacts
//! ```

pub mod config;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use core_kernel::{ObjectId, PortError};
use domain_association::{AssociationClient, AssociationError, DefinitionCode, ListOptions};

/// Manage HubSpot associations from the command line
#[derive(Debug, Parser)]
#[command(name = "hubspot-assoc", version, about = "HubSpot association tools")]
pub struct Cli {
    /// Print compact JSON instead of pretty JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List the objects associated with a resource
    List {
        /// Source object identifier
        #[arg(long)]
        resource_id: u64,

        /// Legacy definition code
        #[arg(long)]
        definition: u32,

        /// Cursor from a previous page
        #[arg(long)]
        offset: Option<u64>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Print identifiers without loading each object
        #[arg(long)]
        raw: bool,
    },

    /// Associate two objects under a legacy definition code
    Create {
        #[arg(long)]
        from: u64,

        #[arg(long)]
        to: u64,

        #[arg(long)]
        definition: u32,
    },

    /// Remove a legacy association
    Delete {
        #[arg(long)]
        from: u64,

        #[arg(long)]
        to: u64,

        #[arg(long)]
        definition: u32,
    },

    /// List the relationship labels between two object types
    Types {
        /// e.g. `deals`
        #[arg(long)]
        from_type: String,

        /// e.g. `contacts`
        #[arg(long)]
        to_type: String,
    },
}

/// Runs one command and returns what should be printed
///
/// # Errors
///
/// Returns the client's error unchanged.
pub async fn execute(
    client: &AssociationClient,
    command: Command,
) -> Result<Value, AssociationError> {
    match command {
        Command::List {
            resource_id,
            definition,
            offset,
            limit,
            raw,
        } => {
            let options = ListOptions {
                offset,
                limit,
                dont_expand: raw,
            };
            let associations = client
                .all(ObjectId::new(resource_id), DefinitionCode::new(definition), options)
                .await?;
            serde_json::to_value(associations)
                .map_err(|e| PortError::transformation(e.to_string()).into())
        }
        Command::Create { from, to, definition } => {
            client
                .create(ObjectId::new(from), ObjectId::new(to), DefinitionCode::new(definition))
                .await?;
            Ok(json!({"created": {"from": from, "to": to, "definition": definition}}))
        }
        Command::Delete { from, to, definition } => {
            client
                .delete(ObjectId::new(from), ObjectId::new(to), DefinitionCode::new(definition))
                .await?;
            Ok(json!({"deleted": {"from": from, "to": to, "definition": definition}}))
        }
        Command::Types { from_type, to_type } => {
            let types = client.types(&from_type, &to_type).await?;
            Ok(json!(types.names().collect::<Vec<_>>()))
        }
    }
}

/// Formats command output
pub fn render(value: &Value, compact: bool) -> String {
    if compact {
        value.to_string()
    } else {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}
