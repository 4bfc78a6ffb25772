//! Association resolver
//!
//! Retrieves the identifiers associated with a source object under a
//! definition code and, unless raw mode is requested, loads each identifier
//! into a full object.
//!
//! # Cost
//!
//! A page of K identifiers costs exactly `1 + K` requests when expanded: one
//! listing call plus one lookup per identifier. Walking every page of a large
//! association therefore costs N listing calls plus M lookups. HubSpot offers
//! no bulk fetch-by-id for these object kinds, so lookups are not batched.
//!
//! # Concurrency
//!
//! Lookups run one at a time by default. `ExpansionOptions::concurrency`
//! allows up to that many lookups in flight for a single page; results are
//! still returned in listing order, and the first failure still aborts the
//! whole call.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, instrument};

use core_kernel::{
    decode_response, ApiRequest, CrmObject, LookupTable, ObjectId, ObjectLookup, ObjectType,
    Transport,
};

use crate::error::AssociationError;
use crate::paths::ASSOCIATIONS_PATH;
use crate::registry::{resolve_target_type, DefinitionCode};

/// Options for `AssociationResolver::all`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Cursor returned by the previous page
    pub offset: Option<u64>,
    /// Page size
    pub limit: Option<u32>,
    /// Return the bare listing instead of loading each object
    pub dont_expand: bool,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips expansion
    pub fn dont_expand(mut self) -> Self {
        self.dont_expand = true;
        self
    }
}

/// How many lookups of one page may be in flight at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    pub concurrency: usize,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

impl ExpansionOptions {
    /// Up to `concurrency` lookups at once (values below 1 mean 1)
    pub fn concurrent(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }
}

/// One page of the legacy listing endpoint
///
/// A body without `results` is not a page and fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationPage {
    pub results: Vec<ObjectId>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub has_more: bool,
}

/// A listing page exactly as HubSpot returned it
///
/// Serializes to the original body, including fields the typed page does
/// not model.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAssociations {
    pub page: AssociationPage,
    pub body: Value,
}

impl RawAssociations {
    pub fn into_body(self) -> Value {
        self.body
    }
}

impl Serialize for RawAssociations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

/// A page whose identifiers were loaded into objects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedAssociations {
    pub associations: Vec<CrmObject>,
    pub offset: Option<u64>,
    pub has_more: bool,
}

/// Result of `AssociationResolver::all`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Associations {
    /// Returned when expansion was skipped
    Raw(RawAssociations),
    Expanded(ExpandedAssociations),
}

impl Associations {
    pub fn offset(&self) -> Option<u64> {
        match self {
            Associations::Raw(raw) => raw.page.offset,
            Associations::Expanded(expanded) => expanded.offset,
        }
    }

    pub fn has_more(&self) -> bool {
        match self {
            Associations::Raw(raw) => raw.page.has_more,
            Associations::Expanded(expanded) => expanded.has_more,
        }
    }

    /// Number of identifiers or objects on this page
    pub fn len(&self) -> usize {
        match self {
            Associations::Raw(raw) => raw.page.results.len(),
            Associations::Expanded(expanded) => expanded.associations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_expanded(self) -> Option<ExpandedAssociations> {
        match self {
            Associations::Expanded(expanded) => Some(expanded),
            Associations::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> Option<RawAssociations> {
        match self {
            Associations::Raw(raw) => Some(raw),
            Associations::Expanded(_) => None,
        }
    }
}

/// Lists and expands legacy associations
#[derive(Clone)]
pub struct AssociationResolver {
    transport: Arc<dyn Transport>,
    lookups: Arc<LookupTable>,
    expansion: ExpansionOptions,
}

impl AssociationResolver {
    /// Creates a resolver
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport used for the listing call
    /// * `lookups` - Lookups used to load each associated object
    pub fn new(transport: Arc<dyn Transport>, lookups: Arc<LookupTable>) -> Self {
        Self {
            transport,
            lookups,
            expansion: ExpansionOptions::default(),
        }
    }

    /// Sets how many lookups may run at once
    pub fn with_expansion(mut self, expansion: ExpansionOptions) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn expansion(&self) -> ExpansionOptions {
        self.expansion
    }

    /// Retrieves one page of associations for `resource_id`
    ///
    /// # Arguments
    ///
    /// * `resource_id` - The source object
    /// * `code` - Definition code naming the relationship
    /// * `options` - Pagination and the raw-mode switch
    ///
    /// # Returns
    ///
    /// `Associations::Raw` carrying the listing body unmodified when
    /// `options.dont_expand` is set, otherwise `Associations::Expanded` with
    /// one loaded object per identifier, in listing order.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` when the code has no target type, or expansion is
    ///   requested for a type with no registered lookup; no request is sent
    /// - `Transport` when the listing call fails or its body is not a page
    /// - `Lookup` when any single lookup fails; no partial result is returned
    #[instrument(skip_all, fields(resource_id = %resource_id, code = %code))]
    pub async fn all(
        &self,
        resource_id: ObjectId,
        code: DefinitionCode,
        options: ListOptions,
    ) -> Result<Associations, AssociationError> {
        let target = resolve_target_type(code)?;
        let lookup = if options.dont_expand {
            None
        } else {
            Some(self.lookup_for(target)?)
        };

        let body = self
            .fetch_body(resource_id, code, options.offset, options.limit)
            .await?;
        let page = decode_page(body.clone())?;

        let Some(lookup) = lookup else {
            return Ok(Associations::Raw(RawAssociations { page, body }));
        };

        let associations = self.expand(&lookup, &page.results).await?;
        Ok(Associations::Expanded(ExpandedAssociations {
            associations,
            offset: page.offset,
            has_more: page.has_more,
        }))
    }

    /// Retrieves one raw page without expanding it
    ///
    /// The definition code is validated against the registry first.
    pub async fn list_page(
        &self,
        resource_id: ObjectId,
        code: DefinitionCode,
        offset: Option<u64>,
        limit: Option<u32>,
    ) -> Result<AssociationPage, AssociationError> {
        resolve_target_type(code)?;
        let body = self.fetch_body(resource_id, code, offset, limit).await?;
        decode_page(body)
    }

    /// Loads every identifier through `lookup`, preserving order
    ///
    /// Stops at the first failed lookup.
    pub async fn expand(
        &self,
        lookup: &ObjectLookup,
        ids: &[ObjectId],
    ) -> Result<Vec<CrmObject>, AssociationError> {
        let object_type = lookup.object_type();
        debug!(
            count = ids.len(),
            %object_type,
            concurrency = self.expansion.concurrency,
            "Expanding associations"
        );

        stream::iter(ids.iter().copied())
            .map(|id| async move {
                lookup
                    .lookup(id)
                    .await
                    .map_err(|source| AssociationError::Lookup {
                        object_type,
                        id,
                        source,
                    })
            })
            .buffered(self.expansion.concurrency.max(1))
            .try_collect()
            .await
    }

    fn lookup_for(&self, target: ObjectType) -> Result<ObjectLookup, AssociationError> {
        self.lookups.get(target).cloned().ok_or_else(|| {
            AssociationError::invalid(format!("No lookup registered for {}", target))
        })
    }

    async fn fetch_body(
        &self,
        resource_id: ObjectId,
        code: DefinitionCode,
        offset: Option<u64>,
        limit: Option<u32>,
    ) -> Result<Value, AssociationError> {
        let request = ApiRequest::get(ASSOCIATIONS_PATH)
            .path_param("resource_id", resource_id)
            .path_param("definition_id", code)
            .query_opt("offset", offset)
            .query_opt("limit", limit);

        Ok(self.transport.execute(request).await?)
    }
}

fn decode_page(body: Value) -> Result<AssociationPage, AssociationError> {
    let page: AssociationPage = decode_response(body)?;
    debug!(
        results = page.results.len(),
        has_more = page.has_more,
        "Association page received"
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_decodes_camel_case() {
        let page: AssociationPage =
            serde_json::from_str(r#"{"results":[1,"2"],"offset":2,"hasMore":true}"#).unwrap();
        assert_eq!(page.results, vec![ObjectId::new(1), ObjectId::new(2)]);
        assert_eq!(page.offset, Some(2));
        assert!(page.has_more);
    }

    #[test]
    fn test_page_requires_results() {
        let err = decode_page(serde_json::json!({"status": "error"})).unwrap_err();
        assert!(matches!(
            err,
            AssociationError::Transport(core_kernel::PortError::Transformation { .. })
        ));
    }

    #[test]
    fn test_raw_serializes_original_body() {
        let body = serde_json::json!({"results": [7], "hasMore": false, "portalId": 1});
        let raw = Associations::Raw(RawAssociations {
            page: decode_page(body.clone()).unwrap(),
            body: body.clone(),
        });
        assert_eq!(serde_json::to_value(&raw).unwrap(), body);
        assert_eq!(raw.offset(), None);
    }

    #[test]
    fn test_expanded_serializes_like_the_api() {
        let expanded = Associations::Expanded(ExpandedAssociations {
            associations: vec![],
            offset: Some(5),
            has_more: false,
        });
        let value = serde_json::to_value(&expanded).unwrap();
        assert_eq!(value, serde_json::json!({"associations": [], "offset": 5, "hasMore": false}));
    }

    #[test]
    fn test_concurrency_floor() {
        assert_eq!(ExpansionOptions::concurrent(0).concurrency, 1);
        assert_eq!(ExpansionOptions::default().concurrency, 1);
    }

    #[test]
    fn test_list_options_builder() {
        let options = ListOptions::new().offset(10).limit(50).dont_expand();
        assert_eq!(options.offset, Some(10));
        assert_eq!(options.limit, Some(50));
        assert!(options.dont_expand);
    }
}
