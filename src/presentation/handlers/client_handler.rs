// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::period_query::PeriodQuery;
use crate::domain::services::profitability::{
    ClientProfitability, ProfitSummary, ProfitabilityService,
};
use crate::presentation::errors::AppError;
use axum::{extract::Query, Extension, Json};
use serde::Serialize;
use std::sync::Arc;

/// 客户盈利查询响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfitabilityResponse {
    pub clients: Vec<ClientProfitability>,
    pub summary: ProfitSummary,
}

/// 客户盈利查询
///
/// # 参数
///
/// * `service` - 盈利分析服务
/// * `query` - 月份参数
///
/// # 返回值
///
/// * `Ok(Json)` - 按盈利降序的客户列表与汇总
/// * `Err(AppError)` - 数据访问失败
pub async fn client_profitability(
    Extension(service): Extension<Arc<ProfitabilityService>>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ClientProfitabilityResponse>, AppError> {
    let (clients, summary) = service.client_profitability(query.period()).await?;
    Ok(Json(ClientProfitabilityResponse { clients, summary }))
}
