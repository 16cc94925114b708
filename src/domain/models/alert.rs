// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::models::task::DomainError;

/// 监督告警
///
/// 规则评估产生的一条发现。告警按需批量重建（按类型整批替换），
/// 解决操作是单向的终态转换。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// 告警唯一标识符
    pub id: Uuid,
    /// 告警类型
    pub alert_type: AlertType,
    /// 严重程度
    pub severity: AlertSeverity,
    /// 标题
    pub title: String,
    /// 描述信息
    pub message: String,
    /// 引用的业务实体
    pub entity: AlertEntity,
    /// 是否已解决
    pub resolved: bool,
    /// 解决人ID
    pub resolved_by: Option<Uuid>,
    /// 解决时间
    pub resolved_at: Option<DateTime<FixedOffset>>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}

/// 告警类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// 超时任务：处理中且已超过预估工时容差
    OverdueTask,
    /// 即将到期：24小时内到期
    DueSoon,
    /// 员工过载：月负载指数超过100%
    OverloadedEmployee,
    /// 负盈利客户
    NegativeProfitability,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertType::OverdueTask => write!(f, "overdue_task"),
            AlertType::DueSoon => write!(f, "due_soon"),
            AlertType::OverloadedEmployee => write!(f, "overloaded_employee"),
            AlertType::NegativeProfitability => write!(f, "negative_profitability"),
        }
    }
}

impl FromStr for AlertType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overdue_task" => Ok(AlertType::OverdueTask),
            "due_soon" => Ok(AlertType::DueSoon),
            "overloaded_employee" => Ok(AlertType::OverloadedEmployee),
            "negative_profitability" => Ok(AlertType::NegativeProfitability),
            _ => Err(()),
        }
    }
}

/// 告警严重程度枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// 提示
    Info,
    /// 警告
    Warning,
    /// 危险
    Danger,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "info"),
            AlertSeverity::Warning => write!(f, "warning"),
            AlertSeverity::Danger => write!(f, "danger"),
        }
    }
}

impl FromStr for AlertSeverity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(AlertSeverity::Info),
            "warning" => Ok(AlertSeverity::Warning),
            "danger" => Ok(AlertSeverity::Danger),
            _ => Err(()),
        }
    }
}

/// 告警引用的实体
///
/// 多态引用以标签联合表示，持久化时展开为
/// (entity_type, entity_id, entity_name) 三列，不做外键约束。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertEntity {
    /// 任务引用
    Task { id: Uuid, title: String },
    /// 员工引用
    Employee { id: Uuid, name: String },
    /// 客户引用
    Client { id: Uuid, name: String },
}

impl AlertEntity {
    /// 实体类型标签
    pub fn kind(&self) -> &'static str {
        match self {
            AlertEntity::Task { .. } => "task",
            AlertEntity::Employee { .. } => "employee",
            AlertEntity::Client { .. } => "client",
        }
    }

    /// 实体ID
    pub fn id(&self) -> Uuid {
        match self {
            AlertEntity::Task { id, .. }
            | AlertEntity::Employee { id, .. }
            | AlertEntity::Client { id, .. } => *id,
        }
    }

    /// 实体显示名称
    pub fn name(&self) -> &str {
        match self {
            AlertEntity::Task { title, .. } => title,
            AlertEntity::Employee { name, .. } | AlertEntity::Client { name, .. } => name,
        }
    }

    /// 从展开的三列重建实体引用
    ///
    /// # 参数
    ///
    /// * `kind` - 实体类型标签
    /// * `id` - 实体ID
    /// * `name` - 实体显示名称
    ///
    /// # 返回值
    ///
    /// * `Some(AlertEntity)` - 重建成功
    /// * `None` - 未知的实体类型
    pub fn from_parts(kind: &str, id: Uuid, name: String) -> Option<Self> {
        match kind {
            "task" => Some(AlertEntity::Task { id, title: name }),
            "employee" => Some(AlertEntity::Employee { id, name }),
            "client" => Some(AlertEntity::Client { id, name }),
            _ => None,
        }
    }
}

impl Alert {
    /// 创建一条未解决的告警
    ///
    /// # 参数
    ///
    /// * `alert_type` - 告警类型
    /// * `severity` - 严重程度
    /// * `title` - 标题
    /// * `message` - 描述信息
    /// * `entity` - 引用的实体
    ///
    /// # 返回值
    ///
    /// 返回新创建的告警
    pub fn new(
        alert_type: AlertType,
        severity: AlertSeverity,
        title: String,
        message: String,
        entity: AlertEntity,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            alert_type,
            severity,
            title,
            message,
            entity,
            resolved: false,
            resolved_by: None,
            resolved_at: None,
            created_at: Utc::now().into(),
        }
    }

    /// 解决告警
    ///
    /// 单向终态转换：已解决的告警不可再次解决，也不会重新打开。
    ///
    /// # 参数
    ///
    /// * `resolver` - 解决人ID
    ///
    /// # 返回值
    ///
    /// * `Ok(Alert)` - 已解决的告警
    /// * `Err(DomainError)` - 告警已处于解决状态
    pub fn resolve(mut self, resolver: Uuid) -> Result<Self, DomainError> {
        if self.resolved {
            return Err(DomainError::InvalidStateTransition);
        }

        self.resolved = true;
        self.resolved_by = Some(resolver);
        self.resolved_at = Some(Utc::now().into());
        Ok(self)
    }
}

#[cfg(test)]
#[path = "alert_test.rs"]
mod tests;
