//! Association client
//!
//! `AssociationClient` is the entry point callers use. It shapes write
//! requests for both API generations and delegates reads to the
//! `AssociationResolver`.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_association::{AssociationClient, AssociationRecord, DEAL_TO_CONTACT};
//!
//! let client = AssociationClient::new(transport, lookups);
//! client.batch_create(&[AssociationRecord::new(deal_id, contact_id, DEAL_TO_CONTACT)]).await?;
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use core_kernel::{decode_response, ApiRequest, LookupTable, ObjectId, Transport};

use crate::error::AssociationError;
use crate::paths::{
    BATCH_CREATE_PATH, BATCH_CREATE_V2_PATH, BATCH_DELETE_PATH, BATCH_DELETE_V2_PATH, TYPES_PATH,
};
use crate::registry::{validate_legacy_code, DefinitionCode};
use crate::request::{
    build_legacy_batch, build_typed_batch, AssociationRecord, AssociationTypeList,
    TypedAssociationRecord,
};
use crate::resolver::{
    AssociationPage, AssociationResolver, Associations, ExpansionOptions, ListOptions,
};

/// Creates, deletes and lists HubSpot associations
#[derive(Clone)]
pub struct AssociationClient {
    transport: Arc<dyn Transport>,
    resolver: AssociationResolver,
}

impl AssociationClient {
    /// Creates a client
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport every request goes through
    /// * `lookups` - Lookups used when expanding associations
    pub fn new(transport: Arc<dyn Transport>, lookups: LookupTable) -> Self {
        let resolver = AssociationResolver::new(transport.clone(), Arc::new(lookups));
        Self { transport, resolver }
    }

    /// Sets how many lookups may run at once during expansion
    pub fn with_expansion(mut self, expansion: ExpansionOptions) -> Self {
        self.resolver = self.resolver.with_expansion(expansion);
        self
    }

    pub fn resolver(&self) -> &AssociationResolver {
        &self.resolver
    }

    // ========================================================================
    // Legacy (definition code) writes
    // ========================================================================

    /// Associates two objects under a legacy definition code
    ///
    /// # Errors
    ///
    /// `InvalidParameter` without sending anything when `code > 100`.
    pub async fn create(
        &self,
        from_id: ObjectId,
        to_id: ObjectId,
        code: DefinitionCode,
    ) -> Result<Value, AssociationError> {
        validate_legacy_code(code)?;
        self.batch_create(&[AssociationRecord::new(from_id, to_id, code)]).await
    }

    /// Removes one legacy association
    pub async fn delete(
        &self,
        from_id: ObjectId,
        to_id: ObjectId,
        code: DefinitionCode,
    ) -> Result<Value, AssociationError> {
        self.batch_delete(&[AssociationRecord::new(from_id, to_id, code)]).await
    }

    /// Creates many legacy associations in one call
    ///
    /// The endpoint answers without a structured body, so the response is
    /// read in raw mode and returned as-is (`Value::Null` when empty).
    #[instrument(skip_all, fields(count = records.len()))]
    pub async fn batch_create(
        &self,
        records: &[AssociationRecord],
    ) -> Result<Value, AssociationError> {
        self.legacy_batch(BATCH_CREATE_PATH, records).await
    }

    /// Deletes many legacy associations in one call
    #[instrument(skip_all, fields(count = records.len()))]
    pub async fn batch_delete(
        &self,
        records: &[AssociationRecord],
    ) -> Result<Value, AssociationError> {
        self.legacy_batch(BATCH_DELETE_PATH, records).await
    }

    async fn legacy_batch(
        &self,
        path: &'static str,
        records: &[AssociationRecord],
    ) -> Result<Value, AssociationError> {
        for record in records {
            validate_legacy_code(record.definition_id)?;
        }
        let request = ApiRequest::put(path)
            .json(&build_legacy_batch(records))?
            .raw_response();

        debug!(path, "Sending legacy association batch");
        Ok(self.transport.execute(request).await?)
    }

    // ========================================================================
    // Typed (object pair) writes
    // ========================================================================

    /// Creates many typed associations between `from_type` and `to_type`
    ///
    /// # Arguments
    ///
    /// * `records` - Associations carrying a relationship label each
    /// * `from_type` - Object type name on the "from" side (e.g. `deals`)
    /// * `to_type` - Object type name on the "to" side (e.g. `contacts`)
    #[instrument(
        skip_all,
        fields(count = records.len(), from = from_type.as_ref(), to = to_type.as_ref())
    )]
    pub async fn batch_create_v2(
        &self,
        records: &[TypedAssociationRecord],
        from_type: impl AsRef<str>,
        to_type: impl AsRef<str>,
    ) -> Result<Value, AssociationError> {
        self.typed_batch(BATCH_CREATE_V2_PATH, records, from_type.as_ref(), to_type.as_ref())
            .await
    }

    /// Archives many typed associations between `from_type` and `to_type`
    #[instrument(
        skip_all,
        fields(count = records.len(), from = from_type.as_ref(), to = to_type.as_ref())
    )]
    pub async fn batch_delete_v2(
        &self,
        records: &[TypedAssociationRecord],
        from_type: impl AsRef<str>,
        to_type: impl AsRef<str>,
    ) -> Result<Value, AssociationError> {
        self.typed_batch(BATCH_DELETE_V2_PATH, records, from_type.as_ref(), to_type.as_ref())
            .await
    }

    async fn typed_batch(
        &self,
        path: &'static str,
        records: &[TypedAssociationRecord],
        from_type: &str,
        to_type: &str,
    ) -> Result<Value, AssociationError> {
        let request = ApiRequest::post(path)
            .path_param("fromObjectType", from_type)
            .path_param("toObjectType", to_type)
            .json(&build_typed_batch(records))?;

        Ok(self.transport.execute(request).await?)
    }

    /// Lists the relationship labels valid between two object types
    ///
    /// The returned names are the values accepted by
    /// `TypedAssociationRecord::association_type`.
    pub async fn types(
        &self,
        from_type: impl AsRef<str>,
        to_type: impl AsRef<str>,
    ) -> Result<AssociationTypeList, AssociationError> {
        let request = ApiRequest::get(TYPES_PATH)
            .path_param("fromObjectType", from_type.as_ref())
            .path_param("toObjectType", to_type.as_ref());

        let body = self.transport.execute(request).await?;
        Ok(decode_response(body)?)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Retrieves, and by default expands, one page of associations
    ///
    /// See `AssociationResolver::all`.
    pub async fn all(
        &self,
        resource_id: ObjectId,
        code: DefinitionCode,
        options: ListOptions,
    ) -> Result<Associations, AssociationError> {
        self.resolver.all(resource_id, code, options).await
    }

    /// Retrieves one raw page of associated identifiers
    pub async fn list_page(
        &self,
        resource_id: ObjectId,
        code: DefinitionCode,
        offset: Option<u64>,
        limit: Option<u32>,
    ) -> Result<AssociationPage, AssociationError> {
        self.resolver.list_page(resource_id, code, offset, limit).await
    }
}
