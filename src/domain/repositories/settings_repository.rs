// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::settings::{CapacitySetting, ClientFinancial};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 产能配置写入参数
#[derive(Debug, Clone)]
pub struct CapacityUpsert {
    pub user_id: Uuid,
    pub horas_laborales_diarias: Option<f64>,
    pub dias_laborales_semana: Option<f64>,
    pub salario_mensual: Option<f64>,
}

/// 财务配置写入参数
#[derive(Debug, Clone)]
pub struct FinancialUpsert {
    pub client_id: Uuid,
    pub ingreso_mensual: Option<f64>,
    pub costo_operativo_estimado: Option<f64>,
    pub active: Option<bool>,
}

/// 配置仓库特质
///
/// 产能与财务配置的读写。写入为 upsert 语义：
/// 按 user_id / client_id 做存在性检查后插入或更新。
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// 读取全部产能配置
    async fn all_capacity(&self) -> Result<Vec<CapacitySetting>, RepositoryError>;
    /// 写入产能配置（存在则更新，否则插入）
    async fn upsert_capacity(
        &self,
        input: CapacityUpsert,
    ) -> Result<CapacitySetting, RepositoryError>;
    /// 读取全部财务配置
    async fn all_financial(&self) -> Result<Vec<ClientFinancial>, RepositoryError>;
    /// 写入财务配置（存在则更新，否则插入）
    async fn upsert_financial(
        &self,
        input: FinancialUpsert,
    ) -> Result<ClientFinancial, RepositoryError>;
}
