pub use sea_orm_migration::prelude::*;

mod m20220801_000001_create_venues;
mod m20220801_000002_create_artists;
mod m20220801_000003_create_shows;
mod m20220815_000004_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220801_000001_create_venues::Migration),
            Box::new(m20220801_000002_create_artists::Migration),
            Box::new(m20220801_000003_create_shows::Migration),
            Box::new(m20220815_000004_add_lookup_indexes::Migration),
        ]
    }
}
