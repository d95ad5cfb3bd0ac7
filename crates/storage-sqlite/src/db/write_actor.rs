//! Single-writer actor for the SQLite database.
//!
//! SQLite allows one writer at a time; funneling every write through one
//! actor holding one dedicated connection serializes them without lock
//! contention, and gives each job its own `immediate_transaction`. The
//! atomic day-bucketed upsert relies on this: its read-then-write runs as
//! one job, so no other write can interleave.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use coinlens_core::errors::{DatabaseError, Error, Result};

use super::DbPool;
use crate::errors::StorageError;

// A job takes the writer's connection and returns a core Result; the
// return type is erased so one channel carries every job shape.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Execute a database job on the writer's dedicated connection,
    /// inside one immediate transaction.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| {
                Error::Database(DatabaseError::Internal(
                    "Writer actor is no longer running".to_string(),
                ))
            })?;

        let result = ret_rx.await.map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "Writer actor dropped the reply channel".to_string(),
            ))
        })?;

        result.map(|boxed| match boxed.downcast::<T>() {
            Ok(value) => *value,
            // The closure above boxed a T; any other type is unreachable.
            Err(_) => unreachable!("writer actor returned a mismatched job result type"),
        })
    }
}

/// Spawn the background task that owns one pooled connection and processes
/// write jobs serially. Each job runs inside `immediate_transaction`, so a
/// failed job rolls back as a unit.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let mut conn = pool
        .get()
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))?;

    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The receiver may have been dropped (caller cancelled); that
            // is not an actor failure.
            let _ = reply_tx.send(result);
        }
        // Channel closed: every WriteHandle was dropped, actor terminates.
    });

    Ok(WriteHandle { tx })
}
