use sea_orm_migration::prelude::*;

use super::m20220801_000001_create_venues::Venues;
use super::m20220801_000003_create_shows::Shows;

/// Migration 4: indexes for the area grouping and the per-parent show
/// lookups.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_venues_state_city")
                    .table(Venues::Table)
                    .col(Venues::State)
                    .col(Venues::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shows_venue_id")
                    .table(Shows::Table)
                    .col(Shows::VenueId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shows_artist_id")
                    .table(Shows::Table)
                    .col(Shows::ArtistId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shows_start_time")
                    .table(Shows::Table)
                    .col(Shows::StartTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_shows_start_time").table(Shows::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_shows_artist_id").table(Shows::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_shows_venue_id").table(Shows::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_venues_state_city")
                    .table(Venues::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
