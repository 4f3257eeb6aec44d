//! User entity model.

use sea_orm::entity::prelude::*;

/// A registered user.
///
/// The primary key on `username` is what makes signup race-free: the store
/// inserts with `ON CONFLICT DO NOTHING` and inspects the affected rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub username: String,

    /// Argon2id hash in PHC string format.
    #[sea_orm(column_type = "Text")]
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
