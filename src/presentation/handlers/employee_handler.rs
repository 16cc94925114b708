// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::period_query::PeriodQuery;
use crate::domain::services::workload::{EmployeeLoad, WorkloadService};
use crate::presentation::errors::AppError;
use axum::{extract::Query, Extension, Json};
use std::sync::Arc;

/// 员工负载查询
///
/// # 参数
///
/// * `service` - 负载分析服务
/// * `query` - 月份与可选员工过滤
///
/// # 返回值
///
/// * `Ok(Json)` - 每位员工的负载与效率指标
/// * `Err(AppError)` - 数据访问失败
pub async fn employee_load(
    Extension(service): Extension<Arc<WorkloadService>>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<EmployeeLoad>>, AppError> {
    let loads = service
        .employee_load(query.period(), query.employee_id)
        .await?;
    Ok(Json(loads))
}
