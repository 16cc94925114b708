// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::{Alert, AlertType};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 告警仓库特质
///
/// 重建协议：先删除新批次涉及类型的未解决告警，再整批插入。
/// 已解决的告警永不删除。
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// 列出未解决告警，按创建时间倒序
    async fn unresolved(&self, limit: u64) -> Result<Vec<Alert>, RepositoryError>;
    /// 根据ID查找告警
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Alert>, RepositoryError>;
    /// 删除给定类型的所有未解决告警
    async fn delete_unresolved_of_types(
        &self,
        types: &[AlertType],
    ) -> Result<u64, RepositoryError>;
    /// 批量插入告警
    async fn insert_many(&self, alerts: &[Alert]) -> Result<u64, RepositoryError>;
    /// 持久化解决状态
    async fn update(&self, alert: &Alert) -> Result<Alert, RepositoryError>;
}
