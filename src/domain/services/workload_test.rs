#[cfg(test)]
mod tests {
    use crate::domain::models::client::Client;
    use crate::domain::models::employee::{Employee, Role};
    use crate::domain::models::period::Period;
    use crate::domain::models::settings::{CapacitySetting, ClientFinancial};
    use crate::domain::models::task::{Task, TaskStatus};
    use crate::domain::repositories::directory_repository::DirectoryRepository;
    use crate::domain::repositories::settings_repository::{
        CapacityUpsert, FinancialUpsert, SettingsRepository,
    };
    use crate::domain::repositories::task_repository::{
        RepositoryError, TaskFilter, TaskRepository,
    };
    use crate::domain::services::workload::{LoadLevel, WorkloadService};
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, FixedOffset, Utc};
    use std::sync::Arc;
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

    struct MockSettingsRepository {
        capacity: Vec<CapacitySetting>,
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
            Ok(Vec::new())
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
    }

    #[async_trait]
    impl DirectoryRepository for MockDirectoryRepository {
        async fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
            Ok(self.employees.clone())
        }

        async fn active_clients(&self) -> Result<Vec<Client>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn client(&self, _id: Uuid) -> Result<Option<Client>, RepositoryError> {
            Ok(None)
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

    fn completed_task(
        assigned_to: Uuid,
        started: &str,
        duration_hours: i64,
        estimate: Option<f64>,
    ) -> Task {
        let started: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(started).unwrap();
        let mut task = Task::new("Tarea".to_string(), Some(assigned_to), None, "contable".to_string());
        task.status = TaskStatus::Completada;
        task.started_at = Some(started);
        task.completed_at = Some(started + Duration::hours(duration_hours));
        task.estimated_hours = estimate;
        task
    }

    fn service(
        tasks: Vec<Task>,
        capacity: Vec<CapacitySetting>,
        employees: Vec<Employee>,
    ) -> WorkloadService {
        WorkloadService::new(
            Arc::new(MockTaskRepository { tasks }),
            Arc::new(MockSettingsRepository { capacity }),
            Arc::new(MockDirectoryRepository { employees }),
        )
    }

    #[tokio::test]
    async fn test_no_completed_tasks_yields_zero_hours_and_efficiency() {
        let ana = employee("Ana");
        let service = service(Vec::new(), Vec::new(), vec![ana.clone()]);

        let loads = service
            .employee_load(Period::new(2024, 4).unwrap(), None)
            .await
            .unwrap();

        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].hours_worked, 0.0);
        assert_eq!(loads[0].efficiency, 0.0);
        assert_eq!(loads[0].load_index, 0.0);
        assert_eq!(loads[0].load_level, LoadLevel::Low);
    }

    #[tokio::test]
    async fn test_default_capacity_30_day_month() {
        // No capacity setting: 8 h/day × 5 days/week defaults.
        // April 2024 has 30 days: round(30/7*5) = 21 business days, 168 h.
        let ana = employee("Ana");
        let service = service(Vec::new(), Vec::new(), vec![ana]);

        let loads = service
            .employee_load(Period::new(2024, 4).unwrap(), None)
            .await
            .unwrap();

        assert_eq!(loads[0].capacity_hours, 168.0);
    }

    #[tokio::test]
    async fn test_load_index_110_is_overloaded() {
        // February 2023 has 28 days: round(28/7*5) = 20 days × 8 h = 160 h.
        // 176 h worked -> load index 110 -> overloaded.
        let ana = employee("Ana");
        let tasks = vec![completed_task(ana.id, "2023-02-03T00:00:00Z", 176, None)];
        let service = service(tasks, Vec::new(), vec![ana]);

        let loads = service
            .employee_load(Period::new(2023, 2).unwrap(), None)
            .await
            .unwrap();

        assert_eq!(loads[0].capacity_hours, 160.0);
        assert_eq!(loads[0].hours_worked, 176.0);
        assert_eq!(loads[0].load_index, 110.0);
        assert_eq!(loads[0].load_level, LoadLevel::Overloaded);
    }

    #[tokio::test]
    async fn test_efficiency_counts_on_time_share() {
        let ana = employee("Ana");
        let tasks = vec![
            // 8 h against a 8 h estimate: on time (8 <= 10.4)
            completed_task(ana.id, "2024-04-02T09:00:00Z", 8, Some(8.0)),
            // 20 h against a 10 h estimate: late (20 > 13)
            completed_task(ana.id, "2024-04-03T09:00:00Z", 20, Some(10.0)),
        ];
        let service = service(tasks, Vec::new(), vec![ana]);

        let loads = service
            .employee_load(Period::new(2024, 4).unwrap(), None)
            .await
            .unwrap();

        assert_eq!(loads[0].hours_worked, 28.0);
        assert_eq!(loads[0].efficiency, 50.0);
    }

    #[tokio::test]
    async fn test_cost_per_hour_from_salary_and_capacity() {
        let ana = employee("Ana");
        let setting = CapacitySetting {
            id: Uuid::new_v4(),
            user_id: ana.id,
            horas_laborales_diarias: 8.0,
            dias_laborales_semana: 5.0,
            salario_mensual: 3360.0,
        };
        let service = service(Vec::new(), vec![setting], vec![ana]);

        let loads = service
            .employee_load(Period::new(2024, 4).unwrap(), None)
            .await
            .unwrap();

        // 3360 / 168 = 20
        assert_eq!(loads[0].cost_per_hour, 20.0);
    }

    #[tokio::test]
    async fn test_in_progress_excluded_from_hours_but_counted() {
        let ana = employee("Ana");
        let mut in_progress = Task::new(
            "Revisión".to_string(),
            Some(ana.id),
            None,
            "fiscal".to_string(),
        );
        in_progress.status = TaskStatus::EnProceso;
        in_progress.started_at = Some(DateTime::parse_from_rfc3339("2024-04-02T09:00:00Z").unwrap());

        let service = service(vec![in_progress], Vec::new(), vec![ana]);

        let loads = service
            .employee_load(Period::new(2024, 4).unwrap(), None)
            .await
            .unwrap();

        assert_eq!(loads[0].hours_worked, 0.0);
        assert_eq!(loads[0].in_progress, 1);
    }

    #[tokio::test]
    async fn test_filter_to_single_employee() {
        let ana = employee("Ana");
        let luis = employee("Luis");
        let service = service(Vec::new(), Vec::new(), vec![ana.clone(), luis]);

        let loads = service
            .employee_load(Period::new(2024, 4).unwrap(), Some(ana.id))
            .await
            .unwrap();

        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].employee_id, ana.id);
    }

    #[tokio::test]
    async fn test_three_month_trend_attributes_by_completion_month() {
        let ana = employee("Ana");
        let tasks = vec![
            completed_task(ana.id, "2024-02-05T00:00:00Z", 4, None),
            completed_task(ana.id, "2024-03-05T00:00:00Z", 6, None),
            completed_task(ana.id, "2024-04-05T00:00:00Z", 8, None),
        ];
        let service = service(tasks, Vec::new(), vec![ana]);

        let loads = service
            .employee_load(Period::new(2024, 4).unwrap(), None)
            .await
            .unwrap();

        let trend = &loads[0].trend;
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].period, "2024-02");
        assert_eq!(trend[0].hours, 4.0);
        assert_eq!(trend[1].period, "2024-03");
        assert_eq!(trend[1].tasks, 1);
        assert_eq!(trend[2].period, "2024-04");
        assert_eq!(trend[2].hours, 8.0);
    }
}
