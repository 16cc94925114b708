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

use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use supervision::config::settings::Settings;
use supervision::domain::services::alerting::AlertService;
use supervision::domain::services::profitability::ProfitabilityService;
use supervision::domain::services::stats::StatsService;
use supervision::domain::services::workload::WorkloadService;
use supervision::infrastructure::database::connection;
use supervision::infrastructure::repositories::alert_repo_impl::AlertRepositoryImpl;
use supervision::infrastructure::repositories::directory_repo_impl::DirectoryRepositoryImpl;
use supervision::infrastructure::repositories::settings_repo_impl::SettingsRepositoryImpl;
use supervision::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use supervision::presentation::middleware::admin_guard::{admin_guard, AuthState};
use supervision::presentation::routes;
use supervision::utils::telemetry;
use tokio::net::TcpListener;
use tracing::info;

use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting supervision service...");

    // Initialize Prometheus Metrics
    supervision::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize repositories
    let task_repo = Arc::new(TaskRepositoryImpl::new(db.clone()));
    let alert_repo = Arc::new(AlertRepositoryImpl::new(db.clone()));
    let settings_repo = Arc::new(SettingsRepositoryImpl::new(db.clone()));
    let directory_repo = Arc::new(DirectoryRepositoryImpl::new(db.clone()));

    // 5. Initialize analytics services
    let workload_service = Arc::new(WorkloadService::new(
        task_repo.clone(),
        settings_repo.clone(),
        directory_repo.clone(),
    ));
    let profitability_service = Arc::new(ProfitabilityService::new(
        task_repo.clone(),
        settings_repo.clone(),
        directory_repo.clone(),
    ));
    let alert_service = Arc::new(AlertService::new(
        task_repo.clone(),
        alert_repo.clone(),
        settings_repo.clone(),
        directory_repo.clone(),
    ));
    let stats_service = Arc::new(StatsService::new(
        task_repo.clone(),
        settings_repo.clone(),
        directory_repo.clone(),
    ));

    // 6. Setup admin guard state
    let auth_state = AuthState {
        db: db.clone(),
        session_cookie: settings.auth.session_cookie.clone(),
    };

    // 7. Start HTTP server
    let public_routes = Router::new()
        .route("/health", get(routes::health_check))
        .route("/v1/version", get(routes::version));

    let protected_routes = routes::api_routes()
        .layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            admin_guard,
        ))
        .layer(Extension(workload_service))
        .layer(Extension(profitability_service))
        .layer(Extension(alert_service))
        .layer(Extension(stats_service))
        .layer(Extension(task_repo.clone()))
        .layer(Extension(settings_repo.clone()));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(Extension(settings.clone()));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
