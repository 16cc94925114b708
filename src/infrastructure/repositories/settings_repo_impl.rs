// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::settings::{CapacitySetting, ClientFinancial};
use crate::domain::repositories::settings_repository::{
    CapacityUpsert, FinancialUpsert, SettingsRepository,
};
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::capacity_setting as capacity_entity;
use crate::infrastructure::database::entities::client_financial as financial_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 配置仓库实现
///
/// upsert 按 user_id / client_id 做存在性检查，未提供的字段
/// 保留现值（新建时取表默认值）。
#[derive(Clone)]
pub struct SettingsRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SettingsRepositoryImpl {
    /// 创建新的配置仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<capacity_entity::Model> for CapacitySetting {
    fn from(model: capacity_entity::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            horas_laborales_diarias: model.horas_laborales_diarias,
            dias_laborales_semana: model.dias_laborales_semana,
            salario_mensual: model.salario_mensual,
        }
    }
}

impl From<financial_entity::Model> for ClientFinancial {
    fn from(model: financial_entity::Model) -> Self {
        Self {
            id: model.id,
            client_id: model.client_id,
            ingreso_mensual: model.ingreso_mensual,
            costo_operativo_estimado: model.costo_operativo_estimado,
            active: model.active,
        }
    }
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryImpl {
    async fn all_capacity(&self) -> Result<Vec<CapacitySetting>, RepositoryError> {
        let models = capacity_entity::Entity::find().all(self.db.as_ref()).await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn upsert_capacity(
        &self,
        input: CapacityUpsert,
    ) -> Result<CapacitySetting, RepositoryError> {
        let existing = capacity_entity::Entity::find()
            .filter(capacity_entity::Column::UserId.eq(input.user_id))
            .one(self.db.as_ref())
            .await?;

        let model = match existing {
            Some(current) => {
                let mut active: capacity_entity::ActiveModel = current.into();
                if let Some(hours) = input.horas_laborales_diarias {
                    active.horas_laborales_diarias = Set(hours);
                }
                if let Some(days) = input.dias_laborales_semana {
                    active.dias_laborales_semana = Set(days);
                }
                if let Some(salary) = input.salario_mensual {
                    active.salario_mensual = Set(salary);
                }
                active.updated_at = Set(Utc::now().into());
                active.update(self.db.as_ref()).await?
            }
            None => {
                let defaults = CapacitySetting::default_for(input.user_id);
                let active = capacity_entity::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(input.user_id),
                    horas_laborales_diarias: Set(input
                        .horas_laborales_diarias
                        .unwrap_or(defaults.horas_laborales_diarias)),
                    dias_laborales_semana: Set(input
                        .dias_laborales_semana
                        .unwrap_or(defaults.dias_laborales_semana)),
                    salario_mensual: Set(input
                        .salario_mensual
                        .unwrap_or(defaults.salario_mensual)),
                    updated_at: Set(Utc::now().into()),
                };
                active.insert(self.db.as_ref()).await?
            }
        };

        Ok(model.into())
    }

    async fn all_financial(&self) -> Result<Vec<ClientFinancial>, RepositoryError> {
        let models = financial_entity::Entity::find().all(self.db.as_ref()).await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn upsert_financial(
        &self,
        input: FinancialUpsert,
    ) -> Result<ClientFinancial, RepositoryError> {
        let existing = financial_entity::Entity::find()
            .filter(financial_entity::Column::ClientId.eq(input.client_id))
            .one(self.db.as_ref())
            .await?;

        let model = match existing {
            Some(current) => {
                let mut active: financial_entity::ActiveModel = current.into();
                if let Some(revenue) = input.ingreso_mensual {
                    active.ingreso_mensual = Set(revenue);
                }
                if let Some(operating) = input.costo_operativo_estimado {
                    active.costo_operativo_estimado = Set(operating);
                }
                if let Some(flag) = input.active {
                    active.active = Set(flag);
                }
                active.updated_at = Set(Utc::now().into());
                active.update(self.db.as_ref()).await?
            }
            None => {
                let active = financial_entity::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    client_id: Set(input.client_id),
                    ingreso_mensual: Set(input.ingreso_mensual.unwrap_or(0.0)),
                    costo_operativo_estimado: Set(input
                        .costo_operativo_estimado
                        .unwrap_or(0.0)),
                    active: Set(input.active.unwrap_or(true)),
                    updated_at: Set(Utc::now().into()),
                };
                active.insert(self.db.as_ref()).await?
            }
        };

        Ok(model.into())
    }
}
