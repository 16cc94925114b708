#[cfg(test)]
mod tests {
    use crate::domain::models::alert::{Alert, AlertSeverity, AlertType};
    use crate::domain::models::client::Client;
    use crate::domain::models::employee::{Employee, Role};
    use crate::domain::models::settings::{CapacitySetting, ClientFinancial};
    use crate::domain::models::task::{Task, TaskStatus};
    use crate::domain::repositories::alert_repository::AlertRepository;
    use crate::domain::repositories::directory_repository::DirectoryRepository;
    use crate::domain::repositories::settings_repository::{
        CapacityUpsert, FinancialUpsert, SettingsRepository,
    };
    use crate::domain::repositories::task_repository::{
        RepositoryError, TaskFilter, TaskRepository,
    };
    use crate::domain::services::alerting::AlertService;
    use async_trait::async_trait;
    use chrono::{DateTime, Datelike, Duration, Utc};
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    struct MockTaskRepository {
        tasks: Vec<Task>,
    }

    #[async_trait]
    impl TaskRepository for MockTaskRepository {
        async fn create(&self, task: &Task) -> Result<Task, RepositoryError> {
            Ok(task.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError> {
            Ok(self.tasks.iter().find(|t| t.id == id).cloned())
        }

        async fn update(&self, task: &Task) -> Result<Task, RepositoryError> {
            Ok(task.clone())
        }

        async fn list(&self, _filter: TaskFilter) -> Result<Vec<Task>, RepositoryError> {
            Ok(self.tasks.clone())
        }

        async fn completed_between(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<Task>, RepositoryError> {
            Ok(self
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completada)
                .filter(|t| {
                    t.completed_at
                        .map(|c| {
                            let utc = c.with_timezone(&Utc);
                            utc >= start && utc < end
                        })
                        .unwrap_or(false)
                })
                .cloned()
                .collect())
        }

        async fn open_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
            Ok(self
                .tasks
                .iter()
                .filter(|t| t.status != TaskStatus::Completada)
                .cloned()
                .collect())
        }
    }

    /// 内存告警仓库，复现按类型整批替换协议
    struct MockAlertRepository {
        alerts: Mutex<Vec<Alert>>,
    }

    impl MockAlertRepository {
        fn new() -> Self {
            Self {
                alerts: Mutex::new(Vec::new()),
            }
        }

        fn with(alerts: Vec<Alert>) -> Self {
            Self {
                alerts: Mutex::new(alerts),
            }
        }

        fn snapshot(&self) -> Vec<Alert> {
            self.alerts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AlertRepository for MockAlertRepository {
        async fn unresolved(&self, limit: u64) -> Result<Vec<Alert>, RepositoryError> {
            let alerts = self.alerts.lock().unwrap();
            Ok(alerts
                .iter()
                .filter(|a| !a.resolved)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Alert>, RepositoryError> {
            Ok(self.alerts.lock().unwrap().iter().find(|a| a.id == id).cloned())
        }

        async fn delete_unresolved_of_types(
            &self,
            types: &[AlertType],
        ) -> Result<u64, RepositoryError> {
            let mut alerts = self.alerts.lock().unwrap();
            let before = alerts.len();
            alerts.retain(|a| a.resolved || !types.contains(&a.alert_type));
            Ok((before - alerts.len()) as u64)
        }

        async fn insert_many(&self, batch: &[Alert]) -> Result<u64, RepositoryError> {
            let mut alerts = self.alerts.lock().unwrap();
            alerts.extend_from_slice(batch);
            Ok(batch.len() as u64)
        }

        async fn update(&self, alert: &Alert) -> Result<Alert, RepositoryError> {
            let mut alerts = self.alerts.lock().unwrap();
            let stored = alerts
                .iter_mut()
                .find(|a| a.id == alert.id)
                .ok_or(RepositoryError::NotFound)?;
            *stored = alert.clone();
            Ok(alert.clone())
        }
    }

    struct MockSettingsRepository {
        capacity: Vec<CapacitySetting>,
        financial: Vec<ClientFinancial>,
    }

    #[async_trait]
    impl SettingsRepository for MockSettingsRepository {
        async fn all_capacity(&self) -> Result<Vec<CapacitySetting>, RepositoryError> {
            Ok(self.capacity.clone())
        }

        async fn upsert_capacity(
            &self,
            _input: CapacityUpsert,
        ) -> Result<CapacitySetting, RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        async fn all_financial(&self) -> Result<Vec<ClientFinancial>, RepositoryError> {
            Ok(self.financial.clone())
        }

        async fn upsert_financial(
            &self,
            _input: FinancialUpsert,
        ) -> Result<ClientFinancial, RepositoryError> {
            Err(RepositoryError::NotFound)
        }
    }

    struct MockDirectoryRepository {
        employees: Vec<Employee>,
        clients: Vec<Client>,
    }

    #[async_trait]
    impl DirectoryRepository for MockDirectoryRepository {
        async fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
            Ok(self.employees.clone())
        }

        async fn active_clients(&self) -> Result<Vec<Client>, RepositoryError> {
            Ok(self.clients.clone())
        }

        async fn client(&self, id: Uuid) -> Result<Option<Client>, RepositoryError> {
            Ok(self.clients.iter().find(|c| c.id == id).cloned())
        }
    }

    fn employee(name: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            email: format!("{}@asesoria.test", name.to_lowercase()),
            full_name: name.to_string(),
            role: Role::Empleado,
        }
    }

    fn in_progress_task(started_hours_ago: i64, estimate: Option<f64>) -> Task {
        let mut task = Task::new("Tarea abierta".to_string(), None, None, "contable".to_string());
        task.status = TaskStatus::EnProceso;
        task.started_at = Some((Utc::now() - Duration::hours(started_hours_ago)).into());
        task.estimated_hours = estimate;
        task
    }

    fn completed_this_month(assigned_to: Option<Uuid>, client_id: Option<Uuid>, hours: i64) -> Task {
        // Anchor inside the current month regardless of today's date
        let now = Utc::now();
        let mut task = Task::new("Tarea".to_string(), assigned_to, client_id, "fiscal".to_string());
        task.status = TaskStatus::Completada;
        task.completed_at = Some(now.into());
        task.started_at = Some((now - Duration::hours(hours)).into());
        debug_assert_eq!(now.month(), Utc::now().month());
        task
    }

    struct Fixture {
        tasks: Vec<Task>,
        capacity: Vec<CapacitySetting>,
        financial: Vec<ClientFinancial>,
        employees: Vec<Employee>,
        clients: Vec<Client>,
        alerts: Arc<MockAlertRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tasks: Vec::new(),
                capacity: Vec::new(),
                financial: Vec::new(),
                employees: Vec::new(),
                clients: Vec::new(),
                alerts: Arc::new(MockAlertRepository::new()),
            }
        }

        fn service(&self) -> AlertService {
            AlertService::new(
                Arc::new(MockTaskRepository {
                    tasks: self.tasks.clone(),
                }),
                self.alerts.clone(),
                Arc::new(MockSettingsRepository {
                    capacity: self.capacity.clone(),
                    financial: self.financial.clone(),
                }),
                Arc::new(MockDirectoryRepository {
                    employees: self.employees.clone(),
                    clients: self.clients.clone(),
                }),
            )
        }
    }

    #[tokio::test]
    async fn test_overdue_rule_uses_tolerance() {
        let mut fixture = Fixture::new();
        // 20 h elapsed against 10 h estimate: 20 > 13 -> alert
        fixture.tasks.push(in_progress_task(20, Some(10.0)));
        // 1 h elapsed against 10 h estimate: fine
        fixture.tasks.push(in_progress_task(1, Some(10.0)));
        // No estimate: rule does not apply
        fixture.tasks.push(in_progress_task(500, None));

        let generated = fixture.service().generate().await.unwrap();
        assert_eq!(generated, 1);

        let stored = fixture.alerts.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].alert_type, AlertType::OverdueTask);
        assert_eq!(stored[0].severity, AlertSeverity::Warning);
    }

    #[tokio::test]
    async fn test_due_soon_rule_window() {
        let mut fixture = Fixture::new();

        let mut due_tomorrow = Task::new("Vence".to_string(), None, None, "fiscal".to_string());
        due_tomorrow.due_date = Some((Utc::now() + Duration::hours(23)).date_naive());
        fixture.tasks.push(due_tomorrow);

        let mut due_far = Task::new("Lejana".to_string(), None, None, "fiscal".to_string());
        due_far.due_date = Some((Utc::now() + Duration::days(10)).date_naive());
        fixture.tasks.push(due_far);

        let generated = fixture.service().generate().await.unwrap();

        let stored = fixture.alerts.snapshot();
        let due_soon: Vec<_> = stored
            .iter()
            .filter(|a| a.alert_type == AlertType::DueSoon)
            .collect();
        // The 23h-out due date may land today or tomorrow; either way it is
        // within the 24h window and the far one never fires.
        assert_eq!(generated, due_soon.len());
        assert!(due_soon.len() <= 1);
        assert!(stored.iter().all(|a| a.alert_type == AlertType::DueSoon));
    }

    #[tokio::test]
    async fn test_overloaded_employee_rule() {
        let mut fixture = Fixture::new();
        let ana = employee("Ana");
        // Tiny capacity: 1 h/day × 5 days/week ≈ 20-22 h for any month
        fixture.capacity.push(CapacitySetting {
            id: Uuid::new_v4(),
            user_id: ana.id,
            horas_laborales_diarias: 1.0,
            dias_laborales_semana: 5.0,
            salario_mensual: 1000.0,
        });
        fixture.tasks.push(completed_this_month(Some(ana.id), None, 100));
        fixture.employees.push(ana.clone());

        fixture.service().generate().await.unwrap();

        let stored = fixture.alerts.snapshot();
        let overload: Vec<_> = stored
            .iter()
            .filter(|a| a.alert_type == AlertType::OverloadedEmployee)
            .collect();
        assert_eq!(overload.len(), 1);
        assert_eq!(overload[0].severity, AlertSeverity::Danger);
        assert_eq!(overload[0].entity.id(), ana.id);
    }

    #[tokio::test]
    async fn test_negative_profitability_uses_flat_rate() {
        let mut fixture = Fixture::new();
        let acme = Client {
            id: Uuid::new_v4(),
            name: "Acme SL".to_string(),
            active: true,
        };
        // 2 h × 200 + 50 operating = 450 > 100 revenue -> alert
        fixture.financial.push(ClientFinancial {
            id: Uuid::new_v4(),
            client_id: acme.id,
            ingreso_mensual: 100.0,
            costo_operativo_estimado: 50.0,
            active: true,
        });
        fixture.tasks.push(completed_this_month(None, Some(acme.id), 2));
        fixture.clients.push(acme.clone());

        fixture.service().generate().await.unwrap();

        let stored = fixture.alerts.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].alert_type, AlertType::NegativeProfitability);
        assert_eq!(stored[0].entity.id(), acme.id);
    }

    #[tokio::test]
    async fn test_regeneration_replaces_by_type_and_keeps_resolved() {
        let mut fixture = Fixture::new();
        fixture.tasks.push(in_progress_task(20, Some(10.0)));

        // Seed: one stale unresolved overdue alert and one resolved one
        let stale = Alert::new(
            AlertType::OverdueTask,
            AlertSeverity::Warning,
            "Vieja".to_string(),
            "Obsoleta".to_string(),
            crate::domain::models::alert::AlertEntity::Task {
                id: Uuid::new_v4(),
                title: "Vieja".to_string(),
            },
        );
        let resolved = Alert::new(
            AlertType::OverdueTask,
            AlertSeverity::Warning,
            "Resuelta".to_string(),
            "Histórica".to_string(),
            crate::domain::models::alert::AlertEntity::Task {
                id: Uuid::new_v4(),
                title: "Resuelta".to_string(),
            },
        )
        .resolve(Uuid::new_v4())
        .unwrap();
        fixture.alerts = Arc::new(MockAlertRepository::with(vec![stale.clone(), resolved.clone()]));

        let generated = fixture.service().generate().await.unwrap();
        assert_eq!(generated, 1);

        let stored = fixture.alerts.snapshot();
        // The stale unresolved alert is gone, the resolved one survives
        assert!(stored.iter().all(|a| a.id != stale.id));
        assert!(stored.iter().any(|a| a.id == resolved.id));
        assert_eq!(stored.iter().filter(|a| !a.resolved).count(), 1);
    }

    #[tokio::test]
    async fn test_regeneration_idempotent_on_unchanged_data() {
        let mut fixture = Fixture::new();
        fixture.tasks.push(in_progress_task(20, Some(10.0)));

        let service = fixture.service();
        let first = service.generate().await.unwrap();
        let after_first: HashSet<(AlertType, Uuid)> = fixture
            .alerts
            .snapshot()
            .iter()
            .map(|a| (a.alert_type, a.entity.id()))
            .collect();

        let second = service.generate().await.unwrap();
        let after_second: HashSet<(AlertType, Uuid)> = fixture
            .alerts
            .snapshot()
            .iter()
            .map(|a| (a.alert_type, a.entity.id()))
            .collect();

        assert_eq!(first, second);
        assert_eq!(after_first, after_second);
        assert_eq!(fixture.alerts.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_is_one_way_and_missing_is_not_found() {
        let fixture = Fixture::new();
        let admin = Uuid::new_v4();

        let alert = Alert::new(
            AlertType::DueSoon,
            AlertSeverity::Info,
            "Próxima".to_string(),
            "Vence".to_string(),
            crate::domain::models::alert::AlertEntity::Task {
                id: Uuid::new_v4(),
                title: "Próxima".to_string(),
            },
        );
        fixture
            .alerts
            .insert_many(std::slice::from_ref(&alert))
            .await
            .unwrap();

        let service = fixture.service();
        let resolved = service.resolve(alert.id, admin).await.unwrap();
        assert!(resolved.resolved);
        assert_eq!(resolved.resolved_by, Some(admin));

        // Second resolve attempt fails (terminal transition)
        assert!(service.resolve(alert.id, admin).await.is_err());
        // Unknown alert id is a not-found error
        assert!(service.resolve(Uuid::new_v4(), admin).await.is_err());
    }
}
