// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;

use supervision::domain::models::alert::{Alert, AlertEntity, AlertSeverity, AlertType};
use supervision::domain::models::task::{Task, TaskStatus};
use supervision::domain::repositories::alert_repository::AlertRepository;
use supervision::domain::repositories::directory_repository::DirectoryRepository;
use supervision::domain::repositories::settings_repository::{
    CapacityUpsert, FinancialUpsert, SettingsRepository,
};
use supervision::domain::repositories::task_repository::{TaskFilter, TaskRepository};
use supervision::infrastructure::database::entities::{client, user};
use supervision::infrastructure::repositories::alert_repo_impl::AlertRepositoryImpl;
use supervision::infrastructure::repositories::directory_repo_impl::DirectoryRepositoryImpl;
use supervision::infrastructure::repositories::settings_repo_impl::SettingsRepositoryImpl;
use supervision::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;

async fn setup_db() -> Arc<DatabaseConnection> {
    // 内存SQLite，单连接保证所有查询命中同一个库
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);

    let db = Database::connect(opt).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    Arc::new(db)
}

#[tokio::test]
async fn test_task_lifecycle_roundtrip() {
    let db = setup_db().await;
    let repo = TaskRepositoryImpl::new(db);

    let mut task = Task::new(
        "Cierre contable".to_string(),
        Some(Uuid::new_v4()),
        None,
        "contable".to_string(),
    );
    task.estimated_hours = Some(5.0);
    repo.create(&task).await.expect("create");

    let found = repo.find_by_id(task.id).await.expect("find").expect("some");
    assert_eq!(found.title, "Cierre contable");
    assert_eq!(found.status, TaskStatus::Pendiente);

    let started = found.transition(TaskStatus::EnProceso).expect("start");
    assert!(started.started_at.is_some());
    repo.update(&started).await.expect("update");

    let open = repo.open_tasks().await.expect("open");
    assert_eq!(open.len(), 1);

    let completed = started.transition(TaskStatus::Completada).expect("complete");
    repo.update(&completed).await.expect("update");

    let window_start = Utc::now() - Duration::hours(1);
    let window_end = Utc::now() + Duration::hours(1);
    let in_window = repo
        .completed_between(window_start, window_end)
        .await
        .expect("completed_between");
    assert_eq!(in_window.len(), 1);
    assert_eq!(in_window[0].status, TaskStatus::Completada);

    assert!(repo.open_tasks().await.expect("open").is_empty());
}

#[tokio::test]
async fn test_task_list_filters_by_status() {
    let db = setup_db().await;
    let repo = TaskRepositoryImpl::new(db);

    let pending = Task::new("Alta censal".to_string(), None, None, "fiscal".to_string());
    repo.create(&pending).await.expect("create");

    let other = Task::new("Nóminas".to_string(), None, None, "laboral".to_string());
    let other = other.transition(TaskStatus::EnProceso).expect("start");
    repo.create(&other).await.expect("create");

    let filtered = repo
        .list(TaskFilter {
            statuses: Some(vec![TaskStatus::EnProceso]),
            ..Default::default()
        })
        .await
        .expect("list");

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "Nóminas");
}

#[tokio::test]
async fn test_capacity_upsert_twice_keeps_single_row() {
    let db = setup_db().await;
    let repo = SettingsRepositoryImpl::new(db);
    let user_id = Uuid::new_v4();

    repo.upsert_capacity(CapacityUpsert {
        user_id,
        horas_laborales_diarias: None,
        dias_laborales_semana: None,
        salario_mensual: Some(2400.0),
    })
    .await
    .expect("insert");

    let updated = repo
        .upsert_capacity(CapacityUpsert {
            user_id,
            horas_laborales_diarias: Some(6.0),
            dias_laborales_semana: None,
            salario_mensual: None,
        })
        .await
        .expect("update");

    // 未提供的字段保留现值
    assert_eq!(updated.horas_laborales_diarias, 6.0);
    assert_eq!(updated.salario_mensual, 2400.0);
    assert_eq!(updated.dias_laborales_semana, 5.0);

    let all = repo.all_capacity().await.expect("all");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_financial_upsert_defaults() {
    let db = setup_db().await;
    let repo = SettingsRepositoryImpl::new(db);
    let client_id = Uuid::new_v4();

    let row = repo
        .upsert_financial(FinancialUpsert {
            client_id,
            ingreso_mensual: Some(900.0),
            costo_operativo_estimado: None,
            active: None,
        })
        .await
        .expect("insert");

    assert_eq!(row.ingreso_mensual, 900.0);
    assert_eq!(row.costo_operativo_estimado, 0.0);
    assert!(row.active);
}

#[tokio::test]
async fn test_alert_replacement_spares_resolved() {
    let db = setup_db().await;
    let repo = AlertRepositoryImpl::new(db);

    let overdue = Alert::new(
        AlertType::OverdueTask,
        AlertSeverity::Warning,
        "Tarea con retraso".to_string(),
        "Supera la estimación".to_string(),
        AlertEntity::Task {
            id: Uuid::new_v4(),
            title: "Cierre".to_string(),
        },
    );
    let due_soon = Alert::new(
        AlertType::DueSoon,
        AlertSeverity::Info,
        "Vence pronto".to_string(),
        "Vence en menos de 24 horas".to_string(),
        AlertEntity::Task {
            id: Uuid::new_v4(),
            title: "Modelo 303".to_string(),
        },
    );
    repo.insert_many(&[overdue.clone(), due_soon.clone()])
        .await
        .expect("insert");

    let resolver = Uuid::new_v4();
    let resolved = due_soon.resolve(resolver).expect("resolve");
    repo.update(&resolved).await.expect("update");

    let removed = repo
        .delete_unresolved_of_types(&[AlertType::OverdueTask, AlertType::DueSoon])
        .await
        .expect("delete");
    assert_eq!(removed, 1);

    // 已解决的告警不被重建协议触碰
    let kept = repo.find_by_id(resolved.id).await.expect("find").expect("some");
    assert!(kept.resolved);
    assert_eq!(kept.resolved_by, Some(resolver));

    assert!(repo.unresolved(50).await.expect("unresolved").is_empty());
}

#[tokio::test]
async fn test_directory_filters_inactive_clients() {
    let db = setup_db().await;

    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set("ana@asesoria.test".to_string()),
        full_name: Set("Ana".to_string()),
        role: Set("admin".to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db.as_ref())
    .await
    .expect("insert user");

    client::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Acme SL".to_string()),
        active: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(db.as_ref())
    .await
    .expect("insert client");

    client::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Baja SL".to_string()),
        active: Set(false),
        created_at: Set(Utc::now().into()),
    }
    .insert(db.as_ref())
    .await
    .expect("insert client");

    let repo = DirectoryRepositoryImpl::new(db);

    let employees = repo.employees().await.expect("employees");
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].full_name, "Ana");

    let clients = repo.active_clients().await.expect("clients");
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Acme SL");
}
