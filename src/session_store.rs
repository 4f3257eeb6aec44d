use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};
use time::OffsetDateTime;
use tower_sessions::{session::Id, session::Record, session_store, ExpiredDeletion, SessionStore};

use crate::entity::session::{self, ActiveModel as SessionActiveModel, Entity as SessionEntity};

/// A `tower-sessions` backend persisting records through SeaORM.
///
/// Works against whichever database the connection points at (PostgreSQL
/// in production, SQLite in tests). Records are serialized with
/// MessagePack into the `tower_sessions` table.
///
/// # Error Mapping
///
/// - Database errors → `session_store::Error::Backend`
/// - Serialization errors → `session_store::Error::Encode`
/// - Deserialization errors → `session_store::Error::Decode`
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    conn: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Runs [`ExpiredDeletion::delete_expired`] once per `period`, forever.
    ///
    /// The first pass runs immediately. Failures are logged and retried on
    /// the next tick. Meant to be spawned and aborted on shutdown.
    pub async fn delete_expired_every(self, period: std::time::Duration) {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Err(e) = self.delete_expired().await {
                tracing::error!(error = %e, "failed to delete expired sessions");
            }
        }
    }

    fn active_model(record: &Record) -> session_store::Result<SessionActiveModel> {
        let data =
            rmp_serde::to_vec(record).map_err(|e| session_store::Error::Encode(e.to_string()))?;

        Ok(SessionActiveModel {
            id: Set(record.id.to_string()),
            data: Set(data),
            expiry_date: Set(to_db_time(record.expiry_date)?),
        })
    }
}

#[async_trait]
impl SessionStore for SeaOrmStore {
    /// Inserts a fresh record, re-rolling the id until it is unused.
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let txn = self.conn.begin().await.map_err(backend)?;

        while SessionEntity::find_by_id(record.id.to_string())
            .one(&txn)
            .await
            .map_err(backend)?
            .is_some()
        {
            record.id = Id::default();
        }

        SessionEntity::insert(Self::active_model(record)?)
            .exec_without_returning(&txn)
            .await
            .map_err(backend)?;

        txn.commit().await.map_err(backend)?;

        Ok(())
    }

    /// Upserts the record under its current id.
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        SessionEntity::insert(Self::active_model(record)?)
            .on_conflict(
                OnConflict::column(session::Column::Id)
                    .update_columns([session::Column::Data, session::Column::ExpiryDate])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(backend)?;

        Ok(())
    }

    /// Loads a record, treating expired rows as absent.
    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = to_db_time(OffsetDateTime::now_utc())?;

        let session = SessionEntity::find_by_id(session_id.to_string())
            .filter(session::Column::ExpiryDate.gt(now))
            .one(&self.conn)
            .await
            .map_err(backend)?;

        session
            .map(|model| {
                rmp_serde::from_slice(&model.data)
                    .map_err(|e| session_store::Error::Decode(e.to_string()))
            })
            .transpose()
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        SessionEntity::delete_by_id(session_id.to_string())
            .exec(&self.conn)
            .await
            .map_err(backend)?;

        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SeaOrmStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = to_db_time(OffsetDateTime::now_utc())?;

        let result = SessionEntity::delete_many()
            .filter(session::Column::ExpiryDate.lt(now))
            .exec(&self.conn)
            .await
            .map_err(backend)?;

        tracing::debug!(removed = result.rows_affected, "deleted expired sessions");

        Ok(())
    }
}

fn backend<E: ToString>(err: E) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}

// time::OffsetDateTime (tower-sessions) -> chrono (SeaORM column type)
fn to_db_time(time: OffsetDateTime) -> session_store::Result<DateTimeWithTimeZone> {
    chrono::DateTime::from_timestamp(time.unix_timestamp(), time.nanosecond())
        .map(Into::into)
        .ok_or_else(|| session_store::Error::Encode(format!("expiry out of range: {time}")))
}
