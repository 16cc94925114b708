// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index for tasks: completed_at drives every monthly aggregation query
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_status_completed_at")
                    .table(Tasks::Table)
                    .col(Tasks::Status)
                    .col(Tasks::CompletedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_assigned_to")
                    .table(Tasks::Table)
                    .col(Tasks::AssignedTo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_client_id")
                    .table(Tasks::Table)
                    .col(Tasks::ClientId)
                    .to_owned(),
            )
            .await?;

        // Index for alerts: listing filters on resolved, regeneration on type
        manager
            .create_index(
                Index::create()
                    .name("idx_alerts_resolved_type")
                    .table(SupervisionAlerts::Table)
                    .col(SupervisionAlerts::Resolved)
                    .col(SupervisionAlerts::AlertType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_user_id")
                    .table(Sessions::Table)
                    .col(Sessions::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_tasks_status_completed_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tasks_assigned_to").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tasks_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_alerts_resolved_type").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_sessions_user_id").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Status,
    CompletedAt,
    AssignedTo,
    ClientId,
}

#[derive(DeriveIden)]
enum SupervisionAlerts {
    Table,
    Resolved,
    AlertType,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    UserId,
}
