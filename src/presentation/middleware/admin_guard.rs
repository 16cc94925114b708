// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::employee::Role;
use crate::infrastructure::database::entities::{session, user};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// 守卫状态
#[derive(Clone)]
pub struct AuthState {
    /// 数据库连接
    pub db: Arc<DatabaseConnection>,
    /// 会话Cookie名称
    pub session_cookie: String,
}

/// 已认证用户
///
/// 通过请求扩展注入处理器，resolved_by 等字段由此取值
#[derive(Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub full_name: String,
    pub role: Role,
}

/// 守卫拒绝响应
///
/// 与处理器层错误一致，负载为 `{"error": "..."}`
pub struct GuardError {
    status: StatusCode,
    message: &'static str,
}

impl GuardError {
    fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// 管理员守卫中间件
///
/// 从会话Cookie解析登录用户：无有效会话返回401，
/// 角色不是 admin 返回403。
///
/// # 参数
///
/// * `state` - 守卫状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(GuardError)` - 认证失败的JSON错误响应
pub async fn admin_guard(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, GuardError> {
    metrics::counter!(crate::infrastructure::metrics::REQUESTS_TOTAL).increment(1);

    let token = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| extract_cookie(cookies, &state.session_cookie))
        .ok_or_else(|| {
            GuardError::new(StatusCode::UNAUTHORIZED, "authentication required")
        })?;

    let session = session::Entity::find_by_id(token.clone())
        .one(state.db.as_ref())
        .await
        .map_err(|e| {
            tracing::error!("Database error resolving session: {}", e);
            GuardError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        })?
        .ok_or_else(|| {
            warn!("Session token not found");
            GuardError::new(StatusCode::UNAUTHORIZED, "authentication required")
        })?;

    if session.expires_at < Utc::now() {
        warn!("Session expired for user {}", session.user_id);
        return Err(GuardError::new(StatusCode::UNAUTHORIZED, "session expired"));
    }

    let account = user::Entity::find_by_id(session.user_id)
        .one(state.db.as_ref())
        .await
        .map_err(|e| {
            tracing::error!("Database error resolving user: {}", e);
            GuardError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        })?
        .ok_or_else(|| {
            GuardError::new(StatusCode::UNAUTHORIZED, "authentication required")
        })?;

    let role: Role = account.role.parse().unwrap_or_default();
    if role != Role::Admin {
        warn!("User {} is not an admin", account.id);
        return Err(GuardError::new(StatusCode::FORBIDDEN, "admin role required"));
    }

    req.extensions_mut().insert(AuthUser {
        id: account.id,
        full_name: account.full_name,
        role,
    });
    Ok(next.run(req).await)
}

/// 从Cookie头中提取指定名称的值
fn extract_cookie(header_value: &str, name: &str) -> Option<String> {
    header_value.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
#[path = "admin_guard_test.rs"]
mod tests;
