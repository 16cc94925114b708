// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::client::Client;
use crate::domain::models::employee::Employee;
use crate::domain::repositories::directory_repository::DirectoryRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::client as client_entity;
use crate::infrastructure::database::entities::user as user_entity;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

/// 名录仓库实现
///
/// 用户与客户的只读访问
#[derive(Clone)]
pub struct DirectoryRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl DirectoryRepositoryImpl {
    /// 创建新的名录仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<user_entity::Model> for Employee {
    fn from(model: user_entity::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            role: model.role.parse().unwrap_or_default(),
        }
    }
}

impl From<client_entity::Model> for Client {
    fn from(model: client_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            active: model.active,
        }
    }
}

#[async_trait]
impl DirectoryRepository for DirectoryRepositoryImpl {
    async fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        let models = user_entity::Entity::find()
            .order_by_asc(user_entity::Column::FullName)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn active_clients(&self) -> Result<Vec<Client>, RepositoryError> {
        let models = client_entity::Entity::find()
            .filter(client_entity::Column::Active.eq(true))
            .order_by_asc(client_entity::Column::Name)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn client(&self, id: Uuid) -> Result<Option<Client>, RepositoryError> {
        let model = client_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }
}
