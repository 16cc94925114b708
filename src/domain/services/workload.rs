// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::period::Period;
use crate::domain::models::settings::CapacitySetting;
use crate::domain::models::task::{Task, TaskStatus};
use crate::domain::repositories::directory_repository::DirectoryRepository;
use crate::domain::repositories::settings_repository::SettingsRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::{completed_in, monthly_trend, round2, TrendPoint, ON_TIME_TOLERANCE};

/// 员工月度负载视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoad {
    /// 员工ID
    pub employee_id: Uuid,
    /// 员工姓名
    pub name: String,
    /// 当月完成工时
    pub hours_worked: f64,
    /// 当月产能工时
    pub capacity_hours: f64,
    /// 负载指数（百分比）
    pub load_index: f64,
    /// 负载分级
    pub load_level: LoadLevel,
    /// 按时完成率（百分比）
    pub efficiency: f64,
    /// 处理中任务数
    pub in_progress: u64,
    /// 小时成本（月薪/产能工时）
    pub cost_per_hour: f64,
    /// 最近3个月趋势
    pub trend: Vec<TrendPoint>,
}

/// 负载分级枚举
///
/// 阈值固定：>100 过载；>85 偏高；≥60 合理；其余偏低。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadLevel {
    Overloaded,
    High,
    Optimal,
    Low,
}

impl LoadLevel {
    /// 根据负载指数分级
    pub fn classify(load_index: f64) -> Self {
        if load_index > 100.0 {
            LoadLevel::Overloaded
        } else if load_index > 85.0 {
            LoadLevel::High
        } else if load_index >= 60.0 {
            LoadLevel::Optimal
        } else {
            LoadLevel::Low
        }
    }
}

impl fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadLevel::Overloaded => write!(f, "overloaded"),
            LoadLevel::High => write!(f, "high"),
            LoadLevel::Optimal => write!(f, "optimal"),
            LoadLevel::Low => write!(f, "low"),
        }
    }
}

/// 计算员工当月产能工时
///
/// `business_days = round((days_in_month / 7) × dias_laborales_semana)`,
/// `capacity = business_days × horas_laborales_diarias`。
pub fn capacity_hours(period: &Period, setting: &CapacitySetting) -> f64 {
    period.business_days(setting.dias_laborales_semana) * setting.horas_laborales_diarias
}

/// 计算员工小时成本（月薪/产能工时，产能为0时取0）
pub fn cost_per_hour(setting: &CapacitySetting, capacity: f64) -> f64 {
    if capacity > 0.0 {
        setting.salario_mensual / capacity
    } else {
        0.0
    }
}

/// 员工负载计算服务
///
/// 一次取数覆盖目标月及其前两个月，内存分组后逐员工计算
/// 工时、负载指数、效率与趋势。
pub struct WorkloadService {
    tasks: Arc<dyn TaskRepository>,
    settings: Arc<dyn SettingsRepository>,
    directory: Arc<dyn DirectoryRepository>,
}

impl WorkloadService {
    /// 创建新的负载计算服务实例
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        settings: Arc<dyn SettingsRepository>,
        directory: Arc<dyn DirectoryRepository>,
    ) -> Self {
        Self {
            tasks,
            settings,
            directory,
        }
    }

    /// 计算员工负载
    ///
    /// # 参数
    ///
    /// * `period` - 目标月份
    /// * `employee_id` - 限定到单个员工（可选）
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<EmployeeLoad>)` - 每位员工一条负载视图
    /// * `Err(anyhow::Error)` - 数据访问失败
    pub async fn employee_load(
        &self,
        period: Period,
        employee_id: Option<Uuid>,
    ) -> Result<Vec<EmployeeLoad>, anyhow::Error> {
        let mut employees = self.directory.employees().await?;
        if let Some(id) = employee_id {
            employees.retain(|e| e.id == id);
        }

        let capacities: HashMap<Uuid, CapacitySetting> = self
            .settings
            .all_capacity()
            .await?
            .into_iter()
            .map(|c| (c.user_id, c))
            .collect();

        let months = period.trailing(3);
        let window_start = months[0].start();
        let window_end = period.next_start();
        let completed = self
            .tasks
            .completed_between(window_start, window_end)
            .await?;
        let open = self.tasks.open_tasks().await?;

        let month_start = period.start();
        let month_end = period.next_start();

        let mut result = Vec::with_capacity(employees.len());
        for employee in employees {
            let own: Vec<&Task> = completed
                .iter()
                .filter(|t| t.assigned_to == Some(employee.id))
                .collect();

            let setting = capacities
                .get(&employee.id)
                .cloned()
                .unwrap_or_else(|| CapacitySetting::default_for(employee.id));
            let capacity = capacity_hours(&period, &setting);

            let mut hours_worked = 0.0;
            let mut total = 0u64;
            let mut on_time = 0u64;
            for task in own.iter().filter(|t| completed_in(t, month_start, month_end)) {
                hours_worked += task.duration_hours().unwrap_or(0.0);
                total += 1;
                if task.is_on_time(ON_TIME_TOLERANCE) {
                    on_time += 1;
                }
            }

            let load_index = if capacity > 0.0 {
                hours_worked / capacity * 100.0
            } else {
                0.0
            };
            let efficiency = if total > 0 {
                on_time as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let in_progress = open
                .iter()
                .filter(|t| {
                    t.status == TaskStatus::EnProceso && t.assigned_to == Some(employee.id)
                })
                .count() as u64;

            result.push(EmployeeLoad {
                employee_id: employee.id,
                name: employee.full_name,
                hours_worked: round2(hours_worked),
                capacity_hours: round2(capacity),
                load_index: round2(load_index),
                load_level: LoadLevel::classify(load_index),
                efficiency: round2(efficiency),
                in_progress,
                cost_per_hour: round2(cost_per_hour(&setting, capacity)),
                trend: monthly_trend(&own, &months),
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
#[path = "workload_test.rs"]
mod tests;
