// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::task::{Task, TaskStatus};
use crate::domain::repositories::task_repository::{RepositoryError, TaskFilter, TaskRepository};
use crate::infrastructure::database::entities::task as task_entity;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 任务仓库实现
///
/// 基于SeaORM实现的任务数据访问层
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的任务仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<task_entity::Model> for Task {
    fn from(model: task_entity::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            assigned_to: model.assigned_to,
            client_id: model.client_id,
            module: model.module,
            status: model.status.parse().unwrap_or_default(),
            estimated_hours: model.estimated_hours,
            started_at: model.started_at,
            completed_at: model.completed_at,
            due_date: model.due_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Task> for task_entity::ActiveModel {
    fn from(task: Task) -> Self {
        Self {
            id: Set(task.id),
            title: Set(task.title.clone()),
            assigned_to: Set(task.assigned_to),
            client_id: Set(task.client_id),
            module: Set(task.module.clone()),
            status: Set(task.status.to_string()),
            estimated_hours: Set(task.estimated_hours),
            started_at: Set(task.started_at),
            completed_at: Set(task.completed_at),
            due_date: Set(task.due_date),
            created_at: Set(task.created_at),
            updated_at: Set(task.updated_at),
        }
    }
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn create(&self, task: &Task) -> Result<Task, RepositoryError> {
        let model: task_entity::ActiveModel = task.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, task: &Task) -> Result<Task, RepositoryError> {
        let mut model: task_entity::ActiveModel = task.clone().into();

        model.status = Set(task.status.to_string());
        model.started_at = Set(task.started_at);
        model.completed_at = Set(task.completed_at);
        model.updated_at = Set(Utc::now().into());

        let updated_model = model.update(self.db.as_ref()).await?;
        Ok(updated_model.into())
    }

    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, RepositoryError> {
        let mut query = task_entity::Entity::find();

        if let Some(statuses) = &filter.statuses {
            let values: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
            query = query.filter(task_entity::Column::Status.is_in(values));
        }

        if let Some(assigned_to) = filter.assigned_to {
            query = query.filter(task_entity::Column::AssignedTo.eq(assigned_to));
        }

        if let Some(client_id) = filter.client_id {
            query = query.filter(task_entity::Column::ClientId.eq(client_id));
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let models = query
            .order_by_desc(task_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn completed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Task>, RepositoryError> {
        let models = task_entity::Entity::find()
            .filter(task_entity::Column::Status.eq(TaskStatus::Completada.to_string()))
            .filter(task_entity::Column::CompletedAt.gte(start))
            .filter(task_entity::Column::CompletedAt.lt(end))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn open_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        let open = vec![
            TaskStatus::Pendiente.to_string(),
            TaskStatus::EnProceso.to_string(),
        ];

        let models = task_entity::Entity::find()
            .filter(task_entity::Column::Status.is_in(open))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
