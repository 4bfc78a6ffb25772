//! Identifiers and object kinds for CRM entities
//!
//! HubSpot identifies objects with positive integers. The legacy endpoints
//! emit them as JSON numbers while the v3 endpoints emit them as strings, so
//! `ObjectId` accepts both on the way in and always writes a number.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Identifier of a CRM object (company, contact, deal, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Creates an identifier from its numeric value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ObjectId> for u64 {
    fn from(id: ObjectId) -> u64 {
        id.0
    }
}

struct ObjectIdVisitor;

impl<'de> Visitor<'de> for ObjectIdVisitor {
    type Value = ObjectId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a string holding one")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ObjectId, E> {
        Ok(ObjectId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ObjectId, E> {
        u64::try_from(v)
            .map(ObjectId)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ObjectId, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ObjectIdVisitor)
    }
}

/// Kind of CRM object that can sit on either side of an association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Company,
    Contact,
    Deal,
    Engagement,
    Ticket,
}

impl ObjectType {
    /// Every known object kind
    pub const ALL: [ObjectType; 5] = [
        ObjectType::Company,
        ObjectType::Contact,
        ObjectType::Deal,
        ObjectType::Engagement,
        ObjectType::Ticket,
    ];

    /// Name used in typed-API paths (`/crm/v3/associations/:from/:to/...`)
    pub fn api_name(&self) -> &'static str {
        match self {
            ObjectType::Company => "companies",
            ObjectType::Contact => "contacts",
            ObjectType::Deal => "deals",
            ObjectType::Engagement => "engagements",
            ObjectType::Ticket => "tickets",
        }
    }

    /// Human readable singular name
    pub fn label(&self) -> &'static str {
        match self {
            ObjectType::Company => "Company",
            ObjectType::Contact => "Contact",
            ObjectType::Deal => "Deal",
            ObjectType::Engagement => "Engagement",
            ObjectType::Ticket => "Ticket",
        }
    }
}

impl AsRef<str> for ObjectType {
    fn as_ref(&self) -> &str {
        self.api_name()
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ObjectType {
    type Err = CoreError;

    /// Accepts singular or plural names in any case (`deal`, `Deals`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ObjectType::ALL
            .into_iter()
            .find(|t| name == t.api_name() || name == t.label().to_ascii_lowercase())
            .ok_or_else(|| CoreError::validation(format!("Unknown object type: {}", s)))
    }
}
