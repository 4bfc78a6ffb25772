//! Association endpoint paths

pub const BATCH_CREATE_PATH: &str = "/crm-associations/v1/associations/create-batch";
pub const BATCH_DELETE_PATH: &str = "/crm-associations/v1/associations/delete-batch";
pub const ASSOCIATIONS_PATH: &str =
    "/crm-associations/v1/associations/:resource_id/HUBSPOT_DEFINED/:definition_id";
pub const BATCH_CREATE_V2_PATH: &str =
    "/crm/v3/associations/:fromObjectType/:toObjectType/batch/create";
pub const BATCH_DELETE_V2_PATH: &str =
    "/crm/v3/associations/:fromObjectType/:toObjectType/batch/archive";
pub const TYPES_PATH: &str = "/crm/v3/associations/:fromObjectType/:toObjectType/types";
