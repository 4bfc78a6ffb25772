//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! HubSpot associations test suite.
//!
//! # Modules
//!
//! - `mock_transport`: A scripted, recording `Transport` implementation
//! - `fixtures`: Response bodies shaped like HubSpot's
//! - `assertions`: Assertion helpers for recorded requests

pub mod mock_transport;
pub mod fixtures;
pub mod assertions;

pub use mock_transport::*;
pub use fixtures::*;
pub use assertions::*;
