//! Transaction boundary.
//!
//! A [`Session`] always holds one open transaction. Committing or rolling
//! back immediately begins the next one, so a session stays usable until it
//! is closed. Dropping a session rolls back whatever is still open.

use std::sync::Arc;

use episodic_common::{AppError, AppResult};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};

use crate::repositories::base::db_error;

/// Opens sessions on a shared connection pool.
#[derive(Clone, Debug)]
pub struct SessionFactory {
    db: Arc<DatabaseConnection>,
}

impl SessionFactory {
    /// Create a new session factory.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Begin a transaction and wrap it in a session.
    pub async fn open(&self) -> AppResult<Session> {
        Session::begin(Arc::clone(&self.db)).await
    }
}

/// A unit of database work with an open transaction.
pub struct Session {
    db: Arc<DatabaseConnection>,
    txn: Option<DatabaseTransaction>,
}

impl Session {
    /// Begin a new session.
    pub async fn begin(db: Arc<DatabaseConnection>) -> AppResult<Self> {
        let txn = db.begin().await.map_err(db_error)?;
        debug!("Session opened");
        Ok(Self { db, txn: Some(txn) })
    }

    /// The open transaction. Fails only after [`Self::close`] was interrupted.
    pub fn conn(&self) -> AppResult<&DatabaseTransaction> {
        self.txn
            .as_ref()
            .ok_or_else(|| AppError::Internal("session has no open transaction".to_string()))
    }

    fn take(&mut self) -> AppResult<DatabaseTransaction> {
        self.txn
            .take()
            .ok_or_else(|| AppError::Internal("session has no open transaction".to_string()))
    }

    async fn renew(&mut self) -> AppResult<()> {
        self.txn = Some(self.db.begin().await.map_err(db_error)?);
        Ok(())
    }

    /// Commit pending work and begin a fresh transaction.
    pub async fn commit(&mut self) -> AppResult<()> {
        self.take()?.commit().await.map_err(db_error)?;
        debug!("Session committed");
        self.renew().await
    }

    /// Discard pending work and begin a fresh transaction.
    pub async fn rollback(&mut self) -> AppResult<()> {
        self.take()?.rollback().await.map_err(db_error)?;
        debug!("Session rolled back");
        self.renew().await
    }

    /// Roll back anything uncommitted and release the connection.
    pub async fn close(mut self) {
        if let Some(txn) = self.txn.take() {
            if let Err(e) = txn.rollback().await {
                warn!(error = %e, "Failed to roll back on session close");
            }
        }
        debug!("Session closed");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("open", &self.txn.is_some())
            .finish()
    }
}
