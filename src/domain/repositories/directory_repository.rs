// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::client::Client;
use crate::domain::models::employee::Employee;
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 名录仓库特质
///
/// 员工与客户的只读查询，供分析服务关联名称和过滤范围。
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// 列出全部用户（员工与管理员）
    async fn employees(&self) -> Result<Vec<Employee>, RepositoryError>;
    /// 列出在约客户
    async fn active_clients(&self) -> Result<Vec<Client>, RepositoryError>;
    /// 根据ID查找客户
    async fn client(&self, id: Uuid) -> Result<Option<Client>, RepositoryError>;
}
