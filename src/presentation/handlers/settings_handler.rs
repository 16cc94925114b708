// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::settings_dto::{
    SettingsResponse, SettingsUpsertRequest, SettingsUpsertResponse,
};
use crate::domain::repositories::settings_repository::{
    CapacityUpsert, FinancialUpsert, SettingsRepository,
};
use crate::presentation::errors::AppError;
use axum::{Extension, Json};
use std::sync::Arc;
use validator::Validate;

/// 读取全部产能与财务配置
pub async fn get_settings<R: SettingsRepository>(
    Extension(repo): Extension<Arc<R>>,
) -> Result<Json<SettingsResponse>, AppError> {
    let capacity = repo.all_capacity().await?;
    let financial = repo.all_financial().await?;
    Ok(Json(SettingsResponse {
        capacity,
        financial,
    }))
}

/// 写入单条配置
///
/// `type` 区分产能与财务；upsert 语义，每个员工/客户至多一行。
pub async fn upsert_settings<R: SettingsRepository>(
    Extension(repo): Extension<Arc<R>>,
    Json(payload): Json<SettingsUpsertRequest>,
) -> Result<Json<SettingsUpsertResponse>, AppError> {
    match payload {
        SettingsUpsertRequest::Capacity(capacity) => {
            capacity.validate()?;
            let row = repo
                .upsert_capacity(CapacityUpsert {
                    user_id: capacity.user_id,
                    horas_laborales_diarias: capacity.horas_laborales_diarias,
                    dias_laborales_semana: capacity.dias_laborales_semana,
                    salario_mensual: capacity.salario_mensual,
                })
                .await?;
            Ok(Json(SettingsUpsertResponse::Capacity(row)))
        }
        SettingsUpsertRequest::Financial(financial) => {
            financial.validate()?;
            let row = repo
                .upsert_financial(FinancialUpsert {
                    client_id: financial.client_id,
                    ingreso_mensual: financial.ingreso_mensual,
                    costo_operativo_estimado: financial.costo_operativo_estimado,
                    active: financial.active,
                })
                .await?;
            Ok(Json(SettingsUpsertResponse::Financial(row)))
        }
    }
}
