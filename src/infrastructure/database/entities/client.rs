// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 客户数据库实体模型
///
/// 对应数据库中的 clients 表
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        has_many = "super::task::Entity",
        from = "Column::Id",
        to = "super::task::Column::ClientId"
    )]
    Tasks,
    #[sea_orm(
        has_one = "super::client_financial::Entity",
        from = "Column::Id",
        to = "super::client_financial::Column::ClientId"
    )]
    Financial,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::client_financial::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Financial.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
