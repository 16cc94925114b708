// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 数据库初始模式迁移
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    /// 应用数据库迁移
    ///
    /// # 参数
    ///
    /// * `manager` - 数据库模式管理器
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 迁移成功
    /// * `Err(DbErr)` - 迁移失败
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Create users table (No dependencies)
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("empleado"),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 2. Create sessions table (Depends on Users)
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::Token)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sessions::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Sessions::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 3. Create clients table (No dependencies)
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Clients::Name).string().not_null())
                    .col(
                        ColumnDef::new(Clients::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 4. Create tasks table (Depends on Users and Clients, both nullable)
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tasks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tasks::Title).string().not_null())
                    .col(ColumnDef::new(Tasks::AssignedTo).uuid().null())
                    .col(ColumnDef::new(Tasks::ClientId).uuid().null())
                    .col(
                        ColumnDef::new(Tasks::Module)
                            .string()
                            .not_null()
                            .default("general"),
                    )
                    .col(
                        ColumnDef::new(Tasks::Status)
                            .string()
                            .not_null()
                            .default("pendiente"),
                    )
                    .col(ColumnDef::new(Tasks::EstimatedHours).double().null())
                    .col(
                        ColumnDef::new(Tasks::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Tasks::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Tasks::DueDate).date().null())
                    .col(
                        ColumnDef::new(Tasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 5. Create capacity_settings table (one row per employee)
        manager
            .create_table(
                Table::create()
                    .table(CapacitySettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CapacitySettings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CapacitySettings::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CapacitySettings::HorasLaboralesDiarias)
                            .double()
                            .not_null()
                            .default(8.0),
                    )
                    .col(
                        ColumnDef::new(CapacitySettings::DiasLaboralesSemana)
                            .double()
                            .not_null()
                            .default(5.0),
                    )
                    .col(
                        ColumnDef::new(CapacitySettings::SalarioMensual)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(CapacitySettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 6. Create client_financials table (one row per client)
        manager
            .create_table(
                Table::create()
                    .table(ClientFinancials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientFinancials::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClientFinancials::ClientId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ClientFinancials::IngresoMensual)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(ClientFinancials::CostoOperativoEstimado)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(ClientFinancials::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ClientFinancials::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 7. Create supervision_alerts table (polymorphic entity reference, no FK)
        manager
            .create_table(
                Table::create()
                    .table(SupervisionAlerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupervisionAlerts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SupervisionAlerts::AlertType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupervisionAlerts::Severity)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupervisionAlerts::Title).string().not_null())
                    .col(
                        ColumnDef::new(SupervisionAlerts::Message)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupervisionAlerts::EntityType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupervisionAlerts::EntityId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupervisionAlerts::EntityName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupervisionAlerts::Resolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(SupervisionAlerts::ResolvedBy).uuid().null())
                    .col(
                        ColumnDef::new(SupervisionAlerts::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SupervisionAlerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    /// 回滚数据库迁移
    ///
    /// # 参数
    ///
    /// * `manager` - 数据库模式管理器
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 回滚成功
    /// * `Err(DbErr)` - 回滚失败
    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupervisionAlerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClientFinancials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CapacitySettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    FullName,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Token,
    UserId,
    ExpiresAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    Name,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    AssignedTo,
    ClientId,
    Module,
    Status,
    EstimatedHours,
    StartedAt,
    CompletedAt,
    DueDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CapacitySettings {
    Table,
    Id,
    UserId,
    HorasLaboralesDiarias,
    DiasLaboralesSemana,
    SalarioMensual,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClientFinancials {
    Table,
    Id,
    ClientId,
    IngresoMensual,
    CostoOperativoEstimado,
    Active,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SupervisionAlerts {
    Table,
    Id,
    AlertType,
    Severity,
    Title,
    Message,
    EntityType,
    EntityId,
    EntityName,
    Resolved,
    ResolvedBy,
    ResolvedAt,
    CreatedAt,
}
