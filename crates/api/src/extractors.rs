//! Request extractors.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use episodic_common::AppError;
use episodic_core::Claims;
use episodic_db::repositories::RawCondition;
use serde_json::Value as JsonValue;

/// Authenticated caller extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by auth middleware
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Search conditions taken from the query string.
///
/// `field=value` compares with `eq`; `field__op=value` picks another
/// operator. The value of `in` is a comma-separated list.
#[derive(Debug, Clone, Default)]
pub struct ListFilter(pub Vec<RawCondition>);

impl<S> FromRequestParts<S> for ListFilter
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(Self(conditions_from_pairs(pairs)))
    }
}

/// Turn query-string pairs into raw conditions, keeping their order.
pub fn conditions_from_pairs(pairs: Vec<(String, String)>) -> Vec<RawCondition> {
    pairs
        .into_iter()
        .map(|(key, value)| {
            let (field, op) = key.split_once("__").unwrap_or((key.as_str(), "eq"));
            let value = if op == "in" {
                JsonValue::Array(
                    value
                        .split(',')
                        .map(|item| JsonValue::String(item.to_string()))
                        .collect(),
                )
            } else {
                JsonValue::String(value)
            };
            RawCondition::new(field, op, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_plain_key_means_eq() {
        let conditions = conditions_from_pairs(pairs(&[("username", "alice")]));
        assert_eq!(
            conditions,
            vec![RawCondition::new("username", "eq", json!("alice"))]
        );
    }

    #[test]
    fn test_suffix_selects_operator() {
        let conditions = conditions_from_pairs(pairs(&[("id__gte", "3"), ("username__like", "al%")]));
        assert_eq!(
            conditions,
            vec![
                RawCondition::new("id", "gte", json!("3")),
                RawCondition::new("username", "like", json!("al%")),
            ]
        );
    }

    #[test]
    fn test_in_splits_on_commas() {
        let conditions = conditions_from_pairs(pairs(&[("id__in", "1,2,3")]));
        assert_eq!(
            conditions,
            vec![RawCondition::new("id", "in", json!(["1", "2", "3"]))]
        );
    }

    #[test]
    fn test_unknown_operator_is_passed_through() {
        let conditions = conditions_from_pairs(pairs(&[("id__between", "1,5")]));
        assert_eq!(conditions[0].op, "between");
    }
}
