// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::repositories::settings_repo_impl::SettingsRepositoryImpl;
use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use crate::presentation::handlers::{
    alert_handler, client_handler, employee_handler, settings_handler, stats_handler, task_handler,
};
use axum::{routing::get, Router};

/// 创建监督模块路由
///
/// 所有端点位于 `/api/supervision` 之下，由管理员守卫保护。
///
/// # 返回值
///
/// 返回配置好的路由
pub fn api_routes() -> Router {
    Router::new()
        .route(
            "/api/supervision/employees",
            get(employee_handler::employee_load),
        )
        .route(
            "/api/supervision/clients",
            get(client_handler::client_profitability),
        )
        .route(
            "/api/supervision/alerts",
            get(alert_handler::list_alerts)
                .post(alert_handler::generate_alerts)
                .patch(alert_handler::resolve_alert),
        )
        .route("/api/supervision/stats", get(stats_handler::dashboard))
        .route(
            "/api/supervision/settings",
            get(settings_handler::get_settings::<SettingsRepositoryImpl>)
                .post(settings_handler::upsert_settings::<SettingsRepositoryImpl>),
        )
        .route(
            "/api/supervision/tasks",
            get(task_handler::list_tasks::<TaskRepositoryImpl>)
                .post(task_handler::create_task::<TaskRepositoryImpl>)
                .patch(task_handler::update_task_status::<TaskRepositoryImpl>),
        )
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
