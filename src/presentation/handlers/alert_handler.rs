// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::alert_dto::{GenerateAlertsResponse, ResolveAlertRequest};
use crate::domain::models::alert::Alert;
use crate::domain::services::alerting::AlertService;
use crate::presentation::errors::AppError;
use crate::presentation::middleware::admin_guard::AuthUser;
use axum::{Extension, Json};
use std::sync::Arc;

/// 未解决告警的返回上限
const ALERT_LIST_LIMIT: u64 = 50;

/// 未解决告警列表，按创建时间倒序
pub async fn list_alerts(
    Extension(service): Extension<Arc<AlertService>>,
) -> Result<Json<Vec<Alert>>, AppError> {
    let alerts = service.unresolved(ALERT_LIST_LIMIT).await?;
    Ok(Json(alerts))
}

/// 重新评估告警规则
///
/// 按类型整批替换未解决告警，返回新生成的数量。
pub async fn generate_alerts(
    Extension(service): Extension<Arc<AlertService>>,
) -> Result<Json<GenerateAlertsResponse>, AppError> {
    let generated = service.generate().await?;
    Ok(Json(GenerateAlertsResponse { generated }))
}

/// 解决单条告警
///
/// 不存在返回404，已解决返回400。解决人取自会话用户。
pub async fn resolve_alert(
    Extension(service): Extension<Arc<AlertService>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<ResolveAlertRequest>,
) -> Result<Json<Alert>, AppError> {
    let alert = service.resolve(payload.alert_id, auth.id).await?;
    Ok(Json(alert))
}
