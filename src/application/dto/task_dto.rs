// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::task::{Task, TaskStatus};

/// 任务创建请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    pub assigned_to: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub module: Option<String>,
    #[validate(range(min = 0.0, message = "estimatedHours is invalid"))]
    pub estimated_hours: Option<f64>,
    pub due_date: Option<NaiveDate>,
}

/// 任务状态变更请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusRequest {
    pub task_id: Uuid,
    pub status: TaskStatus,
}

/// 任务列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub employee_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub limit: Option<u64>,
}

/// 任务响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub assigned_to: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub module: String,
    pub status: TaskStatus,
    pub estimated_hours: Option<f64>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_at: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            assigned_to: task.assigned_to,
            client_id: task.client_id,
            module: task.module,
            status: task.status,
            estimated_hours: task.estimated_hours,
            started_at: task.started_at.map(|t| t.to_rfc3339()),
            completed_at: task.completed_at.map(|t| t.to_rfc3339()),
            due_date: task.due_date,
            created_at: task.created_at.to_rfc3339(),
        }
    }
}
