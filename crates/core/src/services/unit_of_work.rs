//! The per-call unit of work and its CRUD templates.

use episodic_common::{AppError, AppResult};
use episodic_db::{
    repositories::{Condition, Keyed, Repositories, Repository, column_named, not_found_message},
    session::{Session, SessionFactory},
};
use sea_orm::{DatabaseTransaction, EntityTrait, IntoActiveModel, ModelTrait, Value};
use tracing::{debug, info, warn};

use crate::convert::{to_persisted, to_transfer, to_transfers};
use crate::transfer::PartialUpdate;

/// One session plus the repositories, for the duration of one service call.
///
/// Every template rolls back the open transaction before returning an
/// error. The first error is the one returned.
pub struct UnitOfWork {
    session: Session,
    repos: Repositories,
}

impl UnitOfWork {
    /// Open a session and wrap it.
    pub async fn begin(factory: &SessionFactory) -> AppResult<Self> {
        Ok(Self {
            session: factory.open().await?,
            repos: Repositories::default(),
        })
    }

    /// The repositories.
    #[must_use]
    pub const fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// The open transaction.
    pub fn conn(&self) -> AppResult<&DatabaseTransaction> {
        self.session.conn()
    }

    /// Roll back anything uncommitted and release the connection.
    pub async fn close(self) {
        self.session.close().await;
    }

    async fn guard<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result {
            if e.is_server_error() {
                warn!(error = %e, "Rolling back unit of work");
            } else {
                debug!(error = %e, "Rolling back unit of work");
            }
            if let Err(rollback) = self.session.rollback().await {
                warn!(error = %rollback, "Rollback failed");
            }
        }
        result
    }

    /// Insert, commit, reload and convert.
    pub async fn add_model<E, C, R>(&mut self, input: C) -> AppResult<R>
    where
        E: Keyed,
        E::Model: IntoActiveModel<E::Active>,
        E::Active: From<C>,
        R: From<E::Model>,
    {
        let result = self.try_add::<E, C, R>(input).await;
        self.guard(result).await
    }

    async fn try_add<E, C, R>(&mut self, input: C) -> AppResult<R>
    where
        E: Keyed,
        E::Model: IntoActiveModel<E::Active>,
        E::Active: From<C>,
        R: From<E::Model>,
    {
        let repo = Repository::<E>::new();
        let added = repo
            .add(self.session.conn()?, to_persisted::<C, E::Active>(input))
            .await?;
        self.session.commit().await?;
        info!(entity = E::LABEL, id = E::id_of(&added), "Added");

        let refreshed = repo.refresh(self.session.conn()?, &added).await?;
        Ok(R::from(refreshed))
    }

    /// Rows matching every condition (all rows when there are none), in id order.
    pub async fn list_models<E, R>(&mut self, conditions: &[Condition<E>]) -> AppResult<Vec<R>>
    where
        E: Keyed,
        E::Model: IntoActiveModel<E::Active>,
        R: From<E::Model>,
    {
        let result = self.try_list::<E, R>(conditions).await;
        self.guard(result).await
    }

    async fn try_list<E, R>(&self, conditions: &[Condition<E>]) -> AppResult<Vec<R>>
    where
        E: Keyed,
        E::Model: IntoActiveModel<E::Active>,
        R: From<E::Model>,
    {
        let repo = Repository::<E>::new();
        let conn = self.session.conn()?;
        let models = if conditions.is_empty() {
            repo.get_all(conn).await?
        } else {
            repo.search(conn, conditions).await?
        };
        Ok(to_transfers(models))
    }

    /// One row by id, or `NotFound`.
    pub async fn get_model<E, R>(&mut self, id: i32) -> AppResult<R>
    where
        E: Keyed,
        E::Model: IntoActiveModel<E::Active>,
        R: From<E::Model>,
    {
        let result = self.try_get::<E, R>(id).await;
        self.guard(result).await
    }

    async fn try_get<E, R>(&self, id: i32) -> AppResult<R>
    where
        E: Keyed,
        E::Model: IntoActiveModel<E::Active>,
        R: From<E::Model>,
    {
        let found = Repository::<E>::new()
            .get_by_id(self.session.conn()?, id)
            .await?;
        to_transfer(found).ok_or_else(|| AppError::NotFound(not_found_message::<E>(id)))
    }

    /// Delete a row by id. A missing row is not an error.
    pub async fn delete_model<E>(&mut self, id: i32) -> AppResult<()>
    where
        E: Keyed,
        E::Model: IntoActiveModel<E::Active>,
    {
        let result = self.try_delete::<E>(id).await;
        self.guard(result).await
    }

    async fn try_delete<E>(&mut self, id: i32) -> AppResult<()>
    where
        E: Keyed,
        E::Model: IntoActiveModel<E::Active>,
    {
        let repo = Repository::<E>::new();
        let Some(model) = repo.get_by_id(self.session.conn()?, id).await? else {
            debug!(entity = E::LABEL, id, "Nothing to delete");
            return Ok(());
        };

        repo.delete(self.session.conn()?, &model).await?;
        self.session.commit().await?;
        info!(entity = E::LABEL, id, "Deleted");
        Ok(())
    }

    /// Apply the changed fields of `update` to a row, commit and reload.
    ///
    /// See [`changed_fields`] for which fields are applied. When none are,
    /// no UPDATE is issued but the commit and reload still happen.
    pub async fn update_model<U, R>(&mut self, id: i32, update: &U) -> AppResult<R>
    where
        U: PartialUpdate,
        <U::Entity as EntityTrait>::Model: IntoActiveModel<<U::Entity as Keyed>::Active>,
        R: From<<U::Entity as EntityTrait>::Model>,
    {
        let result = self.try_update::<U, R>(id, update).await;
        self.guard(result).await
    }

    async fn try_update<U, R>(&mut self, id: i32, update: &U) -> AppResult<R>
    where
        U: PartialUpdate,
        <U::Entity as EntityTrait>::Model: IntoActiveModel<<U::Entity as Keyed>::Active>,
        R: From<<U::Entity as EntityTrait>::Model>,
    {
        let repo = Repository::<U::Entity>::new();
        let current = repo
            .get_by_id(self.session.conn()?, id)
            .await?
            .ok_or_else(|| AppError::NotFound(not_found_message::<U::Entity>(id)))?;

        let fields = changed_fields(&current, update)?;
        if fields.is_empty() {
            debug!(entity = <U::Entity as Keyed>::LABEL, id, "No field changed");
        } else {
            let mut active = current.clone().into_active_model();
            repo.update(&mut active, &fields)?;
            repo.save(self.session.conn()?, active).await?;
        }

        self.session.commit().await?;
        if !fields.is_empty() {
            info!(entity = <U::Entity as Keyed>::LABEL, id, fields = fields.len(), "Updated");
        }

        let refreshed = repo.refresh(self.session.conn()?, &current).await?;
        Ok(R::from(refreshed))
    }
}

/// The fields of `update` that should be written onto `current`.
///
/// A set field is kept only if it differs from the current value and from
/// the field's declared default. A field explicitly set to its declared
/// default is therefore treated as unset, even when that would have changed
/// the row.
pub fn changed_fields<U: PartialUpdate>(
    current: &<U::Entity as EntityTrait>::Model,
    update: &U,
) -> AppResult<Vec<(String, Value)>> {
    let mut fields = Vec::new();

    for (name, value) in update.changes() {
        let column = column_named::<U::Entity>(name)?;
        if current.get(column) == value {
            continue;
        }
        if U::declared_default(name).as_ref() == Some(&value) {
            debug!(
                entity = <U::Entity as Keyed>::LABEL,
                field = name,
                "Skipping field set to its declared default"
            );
            continue;
        }
        fields.push((name.to_string(), value));
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{UserUpdate, WorkUpdate};
    use chrono::Utc;
    use episodic_db::entities::{user, work};

    fn alice() -> user::Model {
        user::Model {
            id: 1,
            username: "alice".to_string(),
            password: "pw".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_unchanged_value_is_dropped() {
        let update = UserUpdate {
            username: Some("alice".to_string()),
            password: None,
        };
        assert!(matches!(changed_fields(&alice(), &update), Ok(f) if f.is_empty()));
    }

    #[test]
    fn test_changed_value_is_kept() {
        let update = UserUpdate {
            username: Some("bob".to_string()),
            password: Some("pw".to_string()),
        };
        let fields = changed_fields(&alice(), &update).unwrap_or_default();
        assert_eq!(
            fields,
            vec![("username".to_string(), Value::from("bob".to_string()))]
        );
    }

    #[test]
    fn test_value_equal_to_declared_default_is_dropped() {
        let current = work::Model {
            id: 3,
            user_id: 1,
            title: "Title".to_string(),
            description: Some("long text".to_string()),
            created_at: Utc::now().into(),
        };
        let update = WorkUpdate {
            title: None,
            description: Some(String::new()),
        };
        assert!(matches!(changed_fields(&current, &update), Ok(f) if f.is_empty()));
    }
}
