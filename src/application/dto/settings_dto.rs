// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::settings::{CapacitySetting, ClientFinancial};

/// 配置写入请求
///
/// `type` 字段区分产能与财务两类配置，字段名与存量数据
/// 保持西语写法。
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingsUpsertRequest {
    Capacity(CapacityPayload),
    Financial(FinancialPayload),
}

/// 产能配置载荷
#[derive(Debug, Deserialize, Validate)]
pub struct CapacityPayload {
    pub user_id: Uuid,
    #[validate(range(min = 0.0, max = 24.0, message = "horas_laborales_diarias is invalid"))]
    pub horas_laborales_diarias: Option<f64>,
    #[validate(range(min = 0.0, max = 7.0, message = "dias_laborales_semana is invalid"))]
    pub dias_laborales_semana: Option<f64>,
    #[validate(range(min = 0.0, message = "salario_mensual is invalid"))]
    pub salario_mensual: Option<f64>,
}

/// 财务配置载荷
#[derive(Debug, Deserialize, Validate)]
pub struct FinancialPayload {
    pub client_id: Uuid,
    #[validate(range(min = 0.0, message = "ingreso_mensual is invalid"))]
    pub ingreso_mensual: Option<f64>,
    #[validate(range(min = 0.0, message = "costo_operativo_estimado is invalid"))]
    pub costo_operativo_estimado: Option<f64>,
    pub active: Option<bool>,
}

/// 配置读取响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub capacity: Vec<CapacitySetting>,
    pub financial: Vec<ClientFinancial>,
}

/// 配置写入响应，回显写入后的行
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SettingsUpsertResponse {
    Capacity(CapacitySetting),
    Financial(ClientFinancial),
}
