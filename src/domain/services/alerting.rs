// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::models::alert::{Alert, AlertEntity, AlertSeverity, AlertType};
use crate::domain::models::period::Period;
use crate::domain::models::settings::CapacitySetting;
use crate::domain::models::task::{Task, TaskStatus};
use crate::domain::repositories::alert_repository::AlertRepository;
use crate::domain::repositories::directory_repository::DirectoryRepository;
use crate::domain::repositories::settings_repository::SettingsRepository;
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::domain::services::workload::capacity_hours;
use crate::domain::services::{
    completed_in, DUE_SOON_WINDOW_HOURS, FLAT_COST_PER_HOUR, ON_TIME_TOLERANCE,
    OVERLOAD_THRESHOLD,
};

/// 告警规则评估服务
///
/// 按需评估固定规则集并执行按类型整批替换：删除新批次涉及
/// 类型的未解决告警，再插入新批次。已解决的告警不参与评估、
/// 不被删除。
pub struct AlertService {
    tasks: Arc<dyn TaskRepository>,
    alerts: Arc<dyn AlertRepository>,
    settings: Arc<dyn SettingsRepository>,
    directory: Arc<dyn DirectoryRepository>,
}

impl AlertService {
    /// 创建新的告警服务实例
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        alerts: Arc<dyn AlertRepository>,
        settings: Arc<dyn SettingsRepository>,
        directory: Arc<dyn DirectoryRepository>,
    ) -> Self {
        Self {
            tasks,
            alerts,
            settings,
            directory,
        }
    }

    /// 列出未解决告警
    pub async fn unresolved(&self, limit: u64) -> Result<Vec<Alert>, anyhow::Error> {
        Ok(self.alerts.unresolved(limit).await?)
    }

    /// 重新生成告警
    ///
    /// # 返回值
    ///
    /// * `Ok(usize)` - 本次生成的告警数量
    /// * `Err(anyhow::Error)` - 评估或写入失败
    pub async fn generate(&self) -> Result<usize, anyhow::Error> {
        let now = Utc::now();
        let batch = self.evaluate(now).await?;

        let types: Vec<AlertType> = batch
            .iter()
            .map(|a| a.alert_type)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if !types.is_empty() {
            self.alerts.delete_unresolved_of_types(&types).await?;
        }
        if !batch.is_empty() {
            self.alerts.insert_many(&batch).await?;
        }

        info!("Regenerated {} supervision alerts", batch.len());
        metrics::counter!(crate::infrastructure::metrics::ALERTS_GENERATED_TOTAL)
            .increment(batch.len() as u64);

        Ok(batch.len())
    }

    /// 解决一条告警
    ///
    /// # 参数
    ///
    /// * `alert_id` - 告警ID
    /// * `resolver` - 解决人ID
    ///
    /// # 返回值
    ///
    /// * `Ok(Alert)` - 已解决的告警
    /// * `Err(anyhow::Error)` - 告警不存在或已处于解决状态
    pub async fn resolve(&self, alert_id: Uuid, resolver: Uuid) -> Result<Alert, anyhow::Error> {
        let alert = self
            .alerts
            .find_by_id(alert_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let resolved = alert.resolve(resolver)?;
        Ok(self.alerts.update(&resolved).await?)
    }

    /// 评估全部规则，产出新批次
    async fn evaluate(&self, now: DateTime<Utc>) -> Result<Vec<Alert>, anyhow::Error> {
        let mut batch = Vec::new();

        let open = self.tasks.open_tasks().await?;
        batch.extend(overdue_task_alerts(&open, now));
        batch.extend(due_soon_alerts(&open, now));

        let period = Period::current();
        let completed = self
            .tasks
            .completed_between(period.start(), period.next_start())
            .await?;

        let employees = self.directory.employees().await?;
        let capacities: HashMap<Uuid, CapacitySetting> = self
            .settings
            .all_capacity()
            .await?
            .into_iter()
            .map(|c| (c.user_id, c))
            .collect();
        batch.extend(overload_alerts(&completed, &employees, &capacities, &period));

        let clients = self.directory.active_clients().await?;
        let financials = self.settings.all_financial().await?;
        batch.extend(negative_profitability_alerts(
            &completed, &clients, &financials, &period,
        ));

        Ok(batch)
    }
}

/// 规则1：处理中任务超过预估工时容差
fn overdue_task_alerts(open: &[Task], now: DateTime<Utc>) -> Vec<Alert> {
    open.iter()
        .filter(|t| t.status == TaskStatus::EnProceso)
        .filter_map(|task| {
            let started = task.started_at?;
            let estimate = task.estimated_hours?;
            let elapsed = (now - started.with_timezone(&Utc)).num_seconds() as f64 / 3600.0;
            if elapsed > estimate * ON_TIME_TOLERANCE {
                Some(Alert::new(
                    AlertType::OverdueTask,
                    AlertSeverity::Warning,
                    "Tarea excedida".to_string(),
                    format!(
                        "\"{}\" lleva {:.1} h frente a una estimación de {:.1} h",
                        task.title, elapsed, estimate
                    ),
                    AlertEntity::Task {
                        id: task.id,
                        title: task.title.clone(),
                    },
                ))
            } else {
                None
            }
        })
        .collect()
}

/// 规则2：24小时内到期的未完成任务
fn due_soon_alerts(open: &[Task], now: DateTime<Utc>) -> Vec<Alert> {
    let window_end = now + Duration::hours(DUE_SOON_WINDOW_HOURS);
    open.iter()
        .filter(|t| matches!(t.status, TaskStatus::Pendiente | TaskStatus::EnProceso))
        .filter_map(|task| {
            let due = task.due_date?.and_time(NaiveTime::MIN).and_utc();
            if due >= now && due <= window_end {
                Some(Alert::new(
                    AlertType::DueSoon,
                    AlertSeverity::Info,
                    "Tarea próxima a vencer".to_string(),
                    format!("\"{}\" vence el {}", task.title, task.due_date?),
                    AlertEntity::Task {
                        id: task.id,
                        title: task.title.clone(),
                    },
                ))
            } else {
                None
            }
        })
        .collect()
}

/// 规则3：月负载指数超过100%的员工
///
/// 负载按单次取数批量计算，避免逐员工发查询。
fn overload_alerts(
    completed: &[Task],
    employees: &[crate::domain::models::employee::Employee],
    capacities: &HashMap<Uuid, CapacitySetting>,
    period: &Period,
) -> Vec<Alert> {
    let start = period.start();
    let end = period.next_start();

    let mut hours_by_employee: HashMap<Uuid, f64> = HashMap::new();
    for task in completed {
        if !completed_in(task, start, end) {
            continue;
        }
        if let Some(employee_id) = task.assigned_to {
            *hours_by_employee.entry(employee_id).or_insert(0.0) +=
                task.duration_hours().unwrap_or(0.0);
        }
    }

    employees
        .iter()
        .filter_map(|employee| {
            let hours = *hours_by_employee.get(&employee.id)?;
            let setting = capacities
                .get(&employee.id)
                .cloned()
                .unwrap_or_else(|| CapacitySetting::default_for(employee.id));
            let capacity = capacity_hours(period, &setting);
            if capacity <= 0.0 {
                return None;
            }
            let load_index = hours / capacity * 100.0;
            if load_index > OVERLOAD_THRESHOLD {
                Some(Alert::new(
                    AlertType::OverloadedEmployee,
                    AlertSeverity::Danger,
                    "Empleado sobrecargado".to_string(),
                    format!(
                        "{} acumula una carga del {:.0}% de su capacidad mensual",
                        employee.full_name, load_index
                    ),
                    AlertEntity::Employee {
                        id: employee.id,
                        name: employee.full_name.clone(),
                    },
                ))
            } else {
                None
            }
        })
        .collect()
}

/// 规则4：估算成本下盈利为负的客户
///
/// 此规则使用固定的每小时成本估算（FLAT_COST_PER_HOUR），
/// 与盈利视图的按薪资成本口径不同。
fn negative_profitability_alerts(
    completed: &[Task],
    clients: &[crate::domain::models::client::Client],
    financials: &[crate::domain::models::settings::ClientFinancial],
    period: &Period,
) -> Vec<Alert> {
    let start = period.start();
    let end = period.next_start();

    let mut hours_by_client: HashMap<Uuid, f64> = HashMap::new();
    for task in completed {
        if !completed_in(task, start, end) {
            continue;
        }
        if let Some(client_id) = task.client_id {
            *hours_by_client.entry(client_id).or_insert(0.0) +=
                task.duration_hours().unwrap_or(0.0);
        }
    }

    let names: HashMap<Uuid, &str> = clients.iter().map(|c| (c.id, c.name.as_str())).collect();

    financials
        .iter()
        .filter(|f| f.active)
        .filter_map(|financial| {
            let name = names.get(&financial.client_id)?;
            let hours = hours_by_client
                .get(&financial.client_id)
                .copied()
                .unwrap_or(0.0);
            let estimated_cost =
                hours * FLAT_COST_PER_HOUR + financial.costo_operativo_estimado;
            let profit = financial.ingreso_mensual - estimated_cost;
            if profit < 0.0 {
                Some(Alert::new(
                    AlertType::NegativeProfitability,
                    AlertSeverity::Danger,
                    "Cliente con rentabilidad negativa".to_string(),
                    format!(
                        "{} arroja un resultado estimado de {:.2} este mes",
                        name, profit
                    ),
                    AlertEntity::Client {
                        id: financial.client_id,
                        name: (*name).to_string(),
                    },
                ))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "alerting_test.rs"]
mod tests;
