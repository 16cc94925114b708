// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 任务实体
///
/// 表示一个可计费或可跟踪的工作单元。任务可分配给员工并关联到
/// 客户，带有模块分类、预估工时以及生命周期时间戳。
/// 时间戳不变式：`completed_at` 仅在状态为 Completada 时存在；
/// `started_at` 在首次进入 EnProceso 时设置一次，之后不再变更。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 任务标题
    pub title: String,
    /// 负责员工ID（可为空）
    pub assigned_to: Option<Uuid>,
    /// 所属客户ID（可为空）
    pub client_id: Option<Uuid>,
    /// 模块分类标签（contable、fiscal、laboral 等）
    pub module: String,
    /// 任务状态
    pub status: TaskStatus,
    /// 预估工时（可为空）
    pub estimated_hours: Option<f64>,
    /// 首次开始处理的时间戳
    pub started_at: Option<DateTime<FixedOffset>>,
    /// 完成时间戳
    pub completed_at: Option<DateTime<FixedOffset>>,
    /// 到期日期
    pub due_date: Option<NaiveDate>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 最后更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 任务状态枚举
///
/// 状态值与存量数据保持西语写法：
/// pendiente → en_proceso → completada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    /// 待处理
    #[default]
    #[serde(rename = "pendiente")]
    Pendiente,
    /// 处理中
    #[serde(rename = "en_proceso")]
    EnProceso,
    /// 已完成
    #[serde(rename = "completada")]
    Completada,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Pendiente => write!(f, "pendiente"),
            TaskStatus::EnProceso => write!(f, "en_proceso"),
            TaskStatus::Completada => write!(f, "completada"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(TaskStatus::Pendiente),
            "en_proceso" => Ok(TaskStatus::EnProceso),
            "completada" => Ok(TaskStatus::Completada),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 无效的状态转换
    #[error("Invalid state transition")]
    InvalidStateTransition,

    /// 验证错误，当输入数据不符合领域规则时发生
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl Task {
    /// 创建一个新任务
    ///
    /// # 参数
    ///
    /// * `title` - 任务标题
    /// * `assigned_to` - 负责员工ID
    /// * `client_id` - 所属客户ID
    /// * `module` - 模块分类
    ///
    /// # 返回值
    ///
    /// 返回状态为 Pendiente 的新任务
    pub fn new(
        title: String,
        assigned_to: Option<Uuid>,
        client_id: Option<Uuid>,
        module: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            assigned_to,
            client_id,
            module,
            status: TaskStatus::Pendiente,
            estimated_hours: None,
            started_at: None,
            completed_at: None,
            due_date: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    /// 变更任务状态并维护时间戳不变式
    ///
    /// 首次进入 EnProceso 时记录 `started_at`；进入 Completada 时记录
    /// `completed_at`；离开 Completada 时清除 `completed_at`。
    ///
    /// # 参数
    ///
    /// * `status` - 目标状态
    ///
    /// # 返回值
    ///
    /// * `Ok(Task)` - 变更后的任务
    /// * `Err(DomainError)` - 状态未发生变化
    pub fn transition(mut self, status: TaskStatus) -> Result<Self, DomainError> {
        if self.status == status {
            return Err(DomainError::InvalidStateTransition);
        }

        let now: DateTime<FixedOffset> = Utc::now().into();

        match status {
            TaskStatus::EnProceso => {
                // started_at 只设置一次
                if self.started_at.is_none() {
                    self.started_at = Some(now);
                }
                self.completed_at = None;
            }
            TaskStatus::Completada => {
                self.completed_at = Some(now);
            }
            TaskStatus::Pendiente => {
                self.completed_at = None;
            }
        }

        self.status = status;
        self.updated_at = now;
        Ok(self)
    }

    /// 计算已完成任务的实际耗时（小时）
    ///
    /// 仅对已完成的任务有意义。两个时间戳都缺失的已完成任务
    /// 视为即时完成，耗时为 0；负耗时归零。
    ///
    /// # 返回值
    ///
    /// * `Some(f64)` - 已完成任务的耗时
    /// * `None` - 任务尚未完成
    pub fn duration_hours(&self) -> Option<f64> {
        if self.status != TaskStatus::Completada {
            return None;
        }

        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => {
                let seconds = (completed - started).num_seconds();
                Some((seconds.max(0) as f64) / 3600.0)
            }
            _ => Some(0.0),
        }
    }

    /// 判断已完成任务是否按时交付
    ///
    /// 没有预估工时的任务视为按时；否则实际耗时不得超过
    /// 预估工时乘以容差系数。
    ///
    /// # 参数
    ///
    /// * `tolerance` - 容差系数（固定策略为 1.3）
    ///
    /// # 返回值
    ///
    /// 按时返回 true
    pub fn is_on_time(&self, tolerance: f64) -> bool {
        let Some(duration) = self.duration_hours() else {
            return false;
        };

        match self.estimated_hours {
            None => true,
            Some(estimate) => duration <= estimate * tolerance,
        }
    }
}

#[cfg(test)]
#[path = "task_test.rs"]
mod tests;
