// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户数据库实体模型
///
/// 对应数据库中的 users 表，存储员工与管理员账户
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        has_many = "super::session::Entity",
        from = "Column::Id",
        to = "super::session::Column::UserId"
    )]
    Sessions,
    #[sea_orm(
        has_many = "super::task::Entity",
        from = "Column::Id",
        to = "super::task::Column::AssignedTo"
    )]
    Tasks,
    #[sea_orm(
        has_one = "super::capacity_setting::Entity",
        from = "Column::Id",
        to = "super::capacity_setting::Column::UserId"
    )]
    CapacitySetting,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::capacity_setting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CapacitySetting.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
