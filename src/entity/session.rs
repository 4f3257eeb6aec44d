//! Session entity model.
//!
//! Maps to the `tower_sessions` table created by the
//! `m20240101_000001_create_session_table` migration.

use sea_orm::entity::prelude::*;

/// A serialized session record.
///
/// | Column      | Type               | Description                         |
/// |-------------|--------------------|-------------------------------------|
/// | id          | TEXT (Primary Key) | Session ID                          |
/// | data        | BLOB / BYTEA       | MessagePack serialized session data |
/// | expiry_date | TIMESTAMPTZ        | Session expiration timestamp        |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tower_sessions")]
pub struct Model {
    /// String form of `tower_sessions::session::Id`.
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    /// MessagePack encoding of the whole `tower_sessions::session::Record`.
    pub data: Vec<u8>,

    /// Rows past this instant are ignored on load and removed by
    /// `delete_expired`.
    pub expiry_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
