//! Test Fixtures
//!
//! Response bodies shaped like the ones HubSpot returns, for scripting a
//! `MockTransport` or a wiremock server.

use serde_json::{json, Value};

/// Listing and write responses of the associations API
pub struct AssociationFixtures;

impl AssociationFixtures {
    /// One page of the legacy listing endpoint
    pub fn page(ids: &[u64], offset: u64, has_more: bool) -> Value {
        json!({
            "results": ids,
            "offset": offset,
            "hasMore": has_more,
        })
    }

    /// A final page with no results
    pub fn empty_page() -> Value {
        Self::page(&[], 0, false)
    }

    /// Type discovery response listing `names`, with ids numbered from 1
    pub fn types(names: &[&str]) -> Value {
        let results: Vec<Value> = names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({"id": (i + 1).to_string(), "name": name}))
            .collect();
        json!({ "results": results })
    }

    /// Typed batch write response
    pub fn batch_result(count: usize) -> Value {
        json!({
            "status": "COMPLETE",
            "results": vec![json!({}); count],
        })
    }
}

/// Single-object responses of the object endpoints
pub struct ObjectFixtures;

impl ObjectFixtures {
    /// `GET /companies/v2/companies/:company_id`
    pub fn company(id: u64, name: &str) -> Value {
        json!({
            "portalId": 62515,
            "companyId": id,
            "isDeleted": false,
            "properties": {
                "name": {"value": name, "source": "API"},
                "domain": {"value": "example.com", "source": "API"}
            }
        })
    }

    /// `GET /contacts/v1/contact/vid/:contact_id/profile`
    pub fn contact(vid: u64, email: &str) -> Value {
        json!({
            "vid": vid,
            "canonical-vid": vid,
            "portal-id": 62515,
            "is-contact": true,
            "properties": {
                "email": {"value": email},
                "firstname": {"value": "Ada"}
            }
        })
    }

    /// `GET /deals/v1/deal/:deal_id`
    pub fn deal(id: u64, name: &str) -> Value {
        json!({
            "portalId": 62515,
            "dealId": id,
            "isDeleted": false,
            "associations": {
                "associatedVids": [],
                "associatedCompanyIds": [],
                "associatedDealIds": []
            },
            "properties": {
                "dealname": {"value": name},
                "amount": {"value": "1000"}
            }
        })
    }

    /// `GET /engagements/v1/engagements/:engagement_id`
    pub fn engagement(id: u64, kind: &str) -> Value {
        json!({
            "engagement": {
                "id": id,
                "portalId": 62515,
                "active": true,
                "type": kind
            },
            "associations": {"contactIds": [], "companyIds": [], "dealIds": []},
            "metadata": {"body": "Follow up"}
        })
    }

    /// `GET /crm/v3/objects/tickets/:id`
    pub fn ticket(id: u64, subject: &str) -> Value {
        json!({
            "id": id.to_string(),
            "properties": {
                "subject": subject,
                "hs_pipeline": "0",
                "hs_pipeline_stage": "1"
            },
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z",
            "archived": false
        })
    }

    /// `POST /marketing/v3/transactional/single-email/send`
    pub fn email_send(status: &str) -> Value {
        json!({
            "eventId": {"id": "event-1", "created": "2024-01-01T00:00:00.000Z"},
            "statusId": "status-1",
            "status": status,
            "requestedAt": "2024-01-01T00:00:00.000Z"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_shape() {
        let page = AssociationFixtures::page(&[1, 2], 2, true);
        assert_eq!(page["results"], json!([1, 2]));
        assert_eq!(page["hasMore"], json!(true));
    }

    #[test]
    fn test_types_numbered_from_one() {
        let types = AssociationFixtures::types(&["deal_to_contact"]);
        assert_eq!(types["results"][0]["id"], json!("1"));
    }
}
