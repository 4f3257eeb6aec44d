//! Saved-locations entity model.

use sea_orm::entity::prelude::*;

/// One row per user holding the four positional location slots.
///
/// A `NULL` slot is empty. Rows are replaced wholesale on every update.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub username: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub slot1: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub slot2: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub slot3: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub slot4: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
