// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::{Alert, AlertEntity, AlertType};
use crate::domain::repositories::alert_repository::AlertRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::supervision_alert as alert_entity;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 告警仓库实现
///
/// 实体引用在持久化边界展开为三列；读取时遇到未知
/// entity_type 的行直接丢弃，不让脏数据进入领域层。
#[derive(Clone)]
pub struct AlertRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AlertRepositoryImpl {
    /// 创建新的告警仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(model: alert_entity::Model) -> Option<Alert> {
    let entity = AlertEntity::from_parts(&model.entity_type, model.entity_id, model.entity_name)?;

    Some(Alert {
        id: model.id,
        alert_type: model.alert_type.parse().ok()?,
        severity: model.severity.parse().ok()?,
        title: model.title,
        message: model.message,
        entity,
        resolved: model.resolved,
        resolved_by: model.resolved_by,
        resolved_at: model.resolved_at,
        created_at: model.created_at,
    })
}

impl From<Alert> for alert_entity::ActiveModel {
    fn from(alert: Alert) -> Self {
        Self {
            id: Set(alert.id),
            alert_type: Set(alert.alert_type.to_string()),
            severity: Set(alert.severity.to_string()),
            title: Set(alert.title.clone()),
            message: Set(alert.message.clone()),
            entity_type: Set(alert.entity.kind().to_string()),
            entity_id: Set(alert.entity.id()),
            entity_name: Set(alert.entity.name().to_string()),
            resolved: Set(alert.resolved),
            resolved_by: Set(alert.resolved_by),
            resolved_at: Set(alert.resolved_at),
            created_at: Set(alert.created_at),
        }
    }
}

#[async_trait]
impl AlertRepository for AlertRepositoryImpl {
    async fn unresolved(&self, limit: u64) -> Result<Vec<Alert>, RepositoryError> {
        let models = alert_entity::Entity::find()
            .filter(alert_entity::Column::Resolved.eq(false))
            .order_by_desc(alert_entity::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().filter_map(to_domain).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Alert>, RepositoryError> {
        let model = alert_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.and_then(to_domain))
    }

    async fn delete_unresolved_of_types(
        &self,
        types: &[AlertType],
    ) -> Result<u64, RepositoryError> {
        if types.is_empty() {
            return Ok(0);
        }

        let values: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        let result = alert_entity::Entity::delete_many()
            .filter(alert_entity::Column::Resolved.eq(false))
            .filter(alert_entity::Column::AlertType.is_in(values))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn insert_many(&self, alerts: &[Alert]) -> Result<u64, RepositoryError> {
        if alerts.is_empty() {
            return Ok(0);
        }

        let models: Vec<alert_entity::ActiveModel> =
            alerts.iter().map(|a| a.clone().into()).collect();
        alert_entity::Entity::insert_many(models)
            .exec(self.db.as_ref())
            .await?;

        Ok(alerts.len() as u64)
    }

    async fn update(&self, alert: &Alert) -> Result<Alert, RepositoryError> {
        let mut model: alert_entity::ActiveModel = alert.clone().into();

        model.resolved = Set(alert.resolved);
        model.resolved_by = Set(alert.resolved_by);
        model.resolved_at = Set(alert.resolved_at);

        model.update(self.db.as_ref()).await?;
        Ok(alert.clone())
    }
}
