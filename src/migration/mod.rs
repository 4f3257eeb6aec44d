//! Schema migrations, applied at startup before the listener binds.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_session_table;
mod m20240101_000002_create_users_table;
mod m20240101_000003_create_locations_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    // Keep our bookkeeping separate from any other migrator sharing the database
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("weather_slots_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_session_table::Migration),
            Box::new(m20240101_000002_create_users_table::Migration),
            Box::new(m20240101_000003_create_locations_table::Migration),
        ]
    }
}
