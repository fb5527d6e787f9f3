//! Generic repository.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use episodic_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Value,
};
use tracing::debug;

use super::filter::Condition;

/// An entity with an auto-assigned integer key.
pub trait Keyed: EntityTrait {
    /// The active model used to stage inserts and updates.
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send;

    /// Name used in error messages, e.g. `"User"`.
    const LABEL: &'static str;

    /// The primary key column.
    fn id_column() -> Self::Column;

    /// The primary key of a loaded row.
    fn id_of(model: &Self::Model) -> i32;
}

/// Message for a missing row, shared by every layer.
#[must_use]
pub fn not_found_message<E: Keyed>(id: i32) -> String {
    format!("{} with id {id} not found", E::LABEL)
}

pub(crate) fn db_error(err: DbErr) -> AppError {
    AppError::Database(err.to_string())
}

/// Data access for one entity type.
///
/// The repository holds no connection. Every operation runs on the
/// connection it is handed, normally the transaction of the caller's
/// session, and nothing is committed here.
pub struct Repository<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> Repository<E> {
    /// Create a new repository.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for Repository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Repository<E> {}

impl<E: Keyed> fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &E::LABEL)
            .finish()
    }
}

impl<E> Repository<E>
where
    E: Keyed,
    E::Model: IntoActiveModel<E::Active>,
{
    /// Find a row by id.
    pub async fn get_by_id<C: ConnectionTrait>(
        &self,
        db: &C,
        id: i32,
    ) -> AppResult<Option<E::Model>> {
        E::find()
            .filter(E::id_column().eq(id))
            .one(db)
            .await
            .map_err(db_error)
    }

    /// All rows, in id order.
    pub async fn get_all<C: ConnectionTrait>(&self, db: &C) -> AppResult<Vec<E::Model>> {
        E::find()
            .order_by_asc(E::id_column())
            .all(db)
            .await
            .map_err(db_error)
    }

    /// Insert a row inside the caller's transaction.
    pub async fn add<C: ConnectionTrait>(&self, db: &C, model: E::Active) -> AppResult<E::Model> {
        model.insert(db).await.map_err(db_error)
    }

    /// Delete a row inside the caller's transaction.
    pub async fn delete<C: ConnectionTrait>(&self, db: &C, model: &E::Model) -> AppResult<()> {
        E::delete_many()
            .filter(E::id_column().eq(E::id_of(model)))
            .exec(db)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    /// Apply named field values onto an active model in memory.
    ///
    /// Unknown names fail with `InvalidField`; values the column cannot hold
    /// fail with `InvalidValue`. Nothing is written until [`Self::save`].
    pub fn update(&self, model: &mut E::Active, fields: &[(String, Value)]) -> AppResult<()> {
        for (name, value) in fields {
            let column = column_named::<E>(name)?;
            model.try_set(column, value.clone()).map_err(|e| {
                AppError::InvalidValue(format!("{} field '{name}': {e}", E::LABEL))
            })?;
        }
        Ok(())
    }

    /// Write the changed fields of an active model.
    pub async fn save<C: ConnectionTrait>(
        &self,
        db: &C,
        model: E::Active,
    ) -> AppResult<E::Model> {
        model.update(db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound(format!("{} row vanished", E::LABEL)),
            other => db_error(other),
        })
    }

    /// Reload a row, picking up generated columns.
    pub async fn refresh<C: ConnectionTrait>(
        &self,
        db: &C,
        model: &E::Model,
    ) -> AppResult<E::Model> {
        let id = E::id_of(model);
        self.get_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(not_found_message::<E>(id)))
    }

    /// Rows matching every condition, in id order.
    pub async fn search<C: ConnectionTrait>(
        &self,
        db: &C,
        conditions: &[Condition<E>],
    ) -> AppResult<Vec<E::Model>> {
        debug!(entity = E::LABEL, conditions = ?conditions, "Searching");

        conditions
            .iter()
            .fold(E::find(), |query, condition| query.filter(condition.expr()))
            .order_by_asc(E::id_column())
            .all(db)
            .await
            .map_err(db_error)
    }
}

/// Resolve a field name to a column of `E`.
pub fn column_named<E: Keyed>(name: &str) -> AppResult<E::Column> {
    E::Column::from_str(name)
        .map_err(|_| AppError::InvalidField(format!("{} has no field '{name}'", E::LABEL)))
}
