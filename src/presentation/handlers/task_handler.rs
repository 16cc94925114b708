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

use crate::application::dto::task_dto::{
    CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskStatusRequest,
};
use crate::domain::models::task::Task;
use crate::domain::repositories::task_repository::{RepositoryError, TaskFilter, TaskRepository};
use crate::presentation::errors::AppError;
use axum::{extract::Query, http::StatusCode, Extension, Json};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// 任务列表
pub async fn list_tasks<R: TaskRepository>(
    Extension(repo): Extension<Arc<R>>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<TaskResponse>>, AppError> {
    let filter = TaskFilter {
        statuses: query.status.map(|s| vec![s]),
        assigned_to: query.employee_id,
        client_id: query.client_id,
        limit: query.limit,
    };

    let tasks = repo.list(filter).await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// 创建任务
///
/// 新任务总是以 pendiente 状态入库。
pub async fn create_task<R: TaskRepository>(
    Extension(repo): Extension<Arc<R>>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    payload.validate()?;

    let mut task = Task::new(
        payload.title,
        payload.assigned_to,
        payload.client_id,
        payload.module.unwrap_or_else(|| "general".to_string()),
    );
    task.estimated_hours = payload.estimated_hours;
    task.due_date = payload.due_date;

    let created = repo.create(&task).await?;
    info!("Task {} created", created.id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// 任务状态变更
///
/// 生命周期时间戳由领域转换规则自动盖章：首次进入
/// en_proceso 记录 started_at，进入 completada 记录 completed_at。
pub async fn update_task_status<R: TaskRepository>(
    Extension(repo): Extension<Arc<R>>,
    Json(payload): Json<UpdateTaskStatusRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let task = repo
        .find_by_id(payload.task_id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    let transitioned = task.transition(payload.status)?;
    let updated = repo.update(&transitioned).await?;
    Ok(Json(updated.into()))
}
