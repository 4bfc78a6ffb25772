//! Path templates
//!
//! Endpoint paths are written as templates with `:name` segments, e.g.
//! `/crm-associations/v1/associations/:resource_id/HUBSPOT_DEFINED/:definition_id`.
//! Rendering substitutes each named segment from the supplied parameters.
//! Segments are returned unencoded; the transport is responsible for
//! percent-encoding them when it builds the final URL.

use crate::error::CoreError;

/// Splits a template into concrete path segments
///
/// # Arguments
///
/// * `template` - Path template with `:name` placeholders
/// * `params` - Values for the placeholders, by name
///
/// # Returns
///
/// The non-empty segments of the path in order, or
/// `CoreError::MissingPathParam` naming the first placeholder with no value.
/// Parameters not referenced by the template are ignored.
pub fn path_segments(
    template: &str,
    params: &[(String, String)],
) -> Result<Vec<String>, CoreError> {
    template
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| CoreError::missing_path_param(name, template)),
            None => Ok(segment.to_string()),
        })
        .collect()
}

/// Renders a template into a `/`-prefixed path (unencoded)
pub fn render_path(template: &str, params: &[(String, String)]) -> Result<String, CoreError> {
    let segments = path_segments(template, params)?;
    Ok(format!("/{}", segments.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_render_substitutes_named_segments() {
        let rendered = render_path(
            "/crm/v3/associations/:fromObjectType/:toObjectType/types",
            &params(&[("fromObjectType", "deals"), ("toObjectType", "contacts")]),
        )
        .unwrap();
        assert_eq!(rendered, "/crm/v3/associations/deals/contacts/types");
    }

    #[test]
    fn test_missing_param_is_reported() {
        let err = render_path("/deals/v1/deal/:deal_id", &[]).unwrap_err();
        match err {
            CoreError::MissingPathParam { param, .. } => assert_eq!(param, "deal_id"),
            other => panic!("Expected MissingPathParam, got {:?}", other),
        }
    }

    #[test]
    fn test_static_path_untouched() {
        let rendered = render_path("/crm-associations/v1/associations/create-batch", &[]).unwrap();
        assert_eq!(rendered, "/crm-associations/v1/associations/create-batch");
    }
}
