//! Per-category CRUD services.

use std::fmt;
use std::marker::PhantomData;

use episodic_common::{AppError, AppResult};
use episodic_db::{
    repositories::{Condition, Keyed, RawCondition},
    session::SessionFactory,
};
use sea_orm::IntoActiveModel;
use validator::Validate;

use super::unit_of_work::UnitOfWork;
use crate::transfer::PartialUpdate;

/// The CRUD templates bound to one entity category.
///
/// `E` is the entity, `C` its create input, `R` its response and `U` its
/// update input (`()` for categories that cannot be updated). Every call
/// opens its own [`UnitOfWork`] and closes it before returning.
pub struct Crud<E, C, R, U = ()> {
    factory: SessionFactory,
    _types: PhantomData<fn() -> (E, C, R, U)>,
}

impl<E, C, R, U> Crud<E, C, R, U> {
    /// Create a new service over the given sessions.
    #[must_use]
    pub const fn new(factory: SessionFactory) -> Self {
        Self {
            factory,
            _types: PhantomData,
        }
    }

    /// Open a unit of work for a category-specific operation.
    pub(crate) async fn begin(&self) -> AppResult<UnitOfWork> {
        UnitOfWork::begin(&self.factory).await
    }
}

impl<E, C, R, U> Clone for Crud<E, C, R, U> {
    fn clone(&self) -> Self {
        Self::new(self.factory.clone())
    }
}

impl<E: Keyed, C, R, U> fmt::Debug for Crud<E, C, R, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crud").field("entity", &E::LABEL).finish()
    }
}

impl<E, C, R, U> Crud<E, C, R, U>
where
    E: Keyed,
    E::Model: IntoActiveModel<E::Active>,
    E::Active: From<C>,
    C: Validate,
    R: From<E::Model>,
{
    /// Validate and insert a new row.
    pub async fn add(&self, input: C) -> AppResult<R> {
        input.validate()?;

        let mut uow = self.begin().await?;
        let result = uow.add_model::<E, C, R>(input).await;
        uow.close().await;
        result
    }

    /// Rows matching the raw conditions, in id order.
    ///
    /// Conditions are validated before any session is opened.
    pub async fn list(&self, conditions: &[RawCondition]) -> AppResult<Vec<R>> {
        let conditions = Condition::<E>::parse_all(conditions)?;
        self.list_where(&conditions).await
    }

    /// Rows matching typed conditions, in id order.
    pub async fn list_where(&self, conditions: &[Condition<E>]) -> AppResult<Vec<R>> {
        let mut uow = self.begin().await?;
        let result = uow.list_models::<E, R>(conditions).await;
        uow.close().await;
        result
    }

    /// One row by id, or `NotFound`.
    pub async fn get(&self, id: i32) -> AppResult<R> {
        let mut uow = self.begin().await?;
        let result = uow.get_model::<E, R>(id).await;
        uow.close().await;
        result
    }

    /// One row by id, or `None`.
    pub async fn find(&self, id: i32) -> AppResult<Option<R>> {
        match self.get(id).await {
            Ok(found) => Ok(Some(found)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a row by id. Deleting a missing row succeeds.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut uow = self.begin().await?;
        let result = uow.delete_model::<E>(id).await;
        uow.close().await;
        result
    }
}

impl<E, C, R, U> Crud<E, C, R, U>
where
    E: Keyed,
    E::Model: IntoActiveModel<E::Active>,
    R: From<E::Model>,
    U: PartialUpdate<Entity = E> + Validate,
{
    /// Apply a partial update with diffing, then return the reloaded row.
    pub async fn update(&self, id: i32, update: U) -> AppResult<R> {
        update.validate()?;

        let mut uow = self.begin().await?;
        let result = uow.update_model::<U, R>(id, &update).await;
        uow.close().await;
        result
    }
}
