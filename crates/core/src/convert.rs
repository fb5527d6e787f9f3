//! Conversion between persisted models and transfer objects.
//!
//! Every pair has an explicit `From` impl next to its transfer type:
//! `Create -> ActiveModel` ("to persisted") and `Model -> Response`
//! ("to transfer"). The helpers here lift those conversions over absent
//! values and collections.

/// Convert an optional persisted model; absent stays absent.
pub fn to_transfer<M, T: From<M>>(source: Option<M>) -> Option<T> {
    source.map(T::from)
}

/// Convert every persisted model, keeping order.
pub fn to_transfers<M, T: From<M>>(sources: Vec<M>) -> Vec<T> {
    sources.into_iter().map(T::from).collect()
}

/// Convert an input object into its persisted (active) form.
pub fn to_persisted<C, A: From<C>>(input: C) -> A {
    A::from(input)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::transfer::{UserCreate, UserResponse};
    use chrono::Utc;
    use episodic_db::entities::user;
    use sea_orm::{ActiveValue, Set};

    fn alice() -> user::Model {
        user::Model {
            id: 1,
            username: "alice".to_string(),
            password: "secret".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_absent_maps_to_absent() {
        let none: Option<UserResponse> = to_transfer(None::<user::Model>);
        assert!(none.is_none());
    }

    #[test]
    fn test_to_transfer_drops_undeclared_columns() {
        let model = alice();
        let response: UserResponse = to_transfer(Some(model.clone())).unwrap();
        assert_eq!(response.id, 1);
        assert_eq!(response.username, "alice");
        assert_eq!(response.created_at, model.created_at);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_identity_conversion() {
        let response = UserResponse::from(alice());
        let same: Vec<UserResponse> = to_transfers(vec![response.clone()]);
        assert_eq!(same, vec![response]);
    }

    #[test]
    fn test_to_persisted_leaves_generated_fields_unset() {
        let active: user::ActiveModel = to_persisted(UserCreate {
            username: "alice".to_string(),
            password: "secret".to_string(),
        });
        assert_eq!(active.username, Set("alice".to_string()));
        assert!(matches!(active.id, ActiveValue::NotSet));
        assert!(matches!(active.created_at, ActiveValue::NotSet));
    }
}
