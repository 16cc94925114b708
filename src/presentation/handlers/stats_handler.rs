// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::period_query::PeriodQuery;
use crate::domain::services::stats::{DashboardStats, StatsService};
use crate::presentation::errors::AppError;
use axum::{extract::Query, Extension, Json};
use std::sync::Arc;

/// 仪表盘指标查询
pub async fn dashboard(
    Extension(service): Extension<Arc<StatsService>>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = service.dashboard(query.period()).await?;
    Ok(Json(stats))
}
