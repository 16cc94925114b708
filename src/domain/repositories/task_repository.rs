// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{Task, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 任务列表查询参数
#[derive(Debug, Default, Clone)]
pub struct TaskFilter {
    pub statuses: Option<Vec<TaskStatus>>,
    pub assigned_to: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub limit: Option<u64>,
}

/// 任务仓库特质
///
/// 定义任务数据访问接口。月度聚合统一走
/// `completed_between` 一次取数、内存分组。
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 创建新任务
    async fn create(&self, task: &Task) -> Result<Task, RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError>;
    /// 更新任务
    async fn update(&self, task: &Task) -> Result<Task, RepositoryError>;
    /// 按条件列出任务
    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, RepositoryError>;
    /// 查找在半开区间内完成的任务
    async fn completed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Task>, RepositoryError>;
    /// 查找所有未完成任务（pendiente 与 en_proceso）
    async fn open_tasks(&self) -> Result<Vec<Task>, RepositoryError>;
}
