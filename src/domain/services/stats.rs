// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::period::Period;
use crate::domain::models::settings::CapacitySetting;
use crate::domain::models::task::Task;
use crate::domain::repositories::directory_repository::DirectoryRepository;
use crate::domain::repositories::settings_repository::SettingsRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::workload::capacity_hours;
use crate::domain::services::{completed_in, monthly_trend, round2, TrendPoint, ON_TIME_TOLERANCE};

/// 仪表盘关键指标
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// 当月完成任务数
    pub tasks_completed: u64,
    /// 平均完成耗时（小时）
    pub avg_hours: f64,
    /// 按时完成率（百分比）
    pub compliance: f64,
    /// 当月效率最高的员工
    pub most_efficient: Option<EmployeeHighlight>,
    /// 当月负载最高的员工
    pub most_saturated: Option<EmployeeHighlight>,
    /// 当月投入工时最多的客户
    pub top_client: Option<ClientHighlight>,
    /// 最近6个月趋势
    pub trend: Vec<TrendPoint>,
}

/// 员工亮点条目
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeHighlight {
    pub employee_id: Uuid,
    pub name: String,
    /// 指标值（效率或负载指数，百分比）
    pub value: f64,
}

/// 客户亮点条目
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientHighlight {
    pub client_id: Uuid,
    pub name: String,
    /// 当月投入工时
    pub hours: f64,
}

/// 仪表盘统计服务
///
/// 单次取数覆盖最近6个月，目标月切片计算关键指标，
/// 整个窗口按月归档形成趋势。
pub struct StatsService {
    tasks: Arc<dyn TaskRepository>,
    settings: Arc<dyn SettingsRepository>,
    directory: Arc<dyn DirectoryRepository>,
}

impl StatsService {
    /// 创建新的统计服务实例
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

    /// 计算仪表盘指标
    ///
    /// # 参数
    ///
    /// * `period` - 目标月份
    ///
    /// # 返回值
    ///
    /// * `Ok(DashboardStats)` - 仪表盘关键指标
    /// * `Err(anyhow::Error)` - 数据访问失败
    pub async fn dashboard(&self, period: Period) -> Result<DashboardStats, anyhow::Error> {
        let months = period.trailing(6);
        let completed = self
            .tasks
            .completed_between(months[0].start(), period.next_start())
            .await?;

        let month_start = period.start();
        let month_end = period.next_start();
        let in_month: Vec<&Task> = completed
            .iter()
            .filter(|t| completed_in(t, month_start, month_end))
            .collect();

        let tasks_completed = in_month.len() as u64;
        let total_hours: f64 = in_month
            .iter()
            .map(|t| t.duration_hours().unwrap_or(0.0))
            .sum();
        let avg_hours = if tasks_completed > 0 {
            total_hours / tasks_completed as f64
        } else {
            0.0
        };
        let on_time = in_month
            .iter()
            .filter(|t| t.is_on_time(ON_TIME_TOLERANCE))
            .count() as u64;
        let compliance = if tasks_completed > 0 {
            on_time as f64 / tasks_completed as f64 * 100.0
        } else {
            0.0
        };

        let employees = self.directory.employees().await?;
        let capacities: HashMap<Uuid, CapacitySetting> = self
            .settings
            .all_capacity()
            .await?
            .into_iter()
            .map(|c| (c.user_id, c))
            .collect();

        let mut most_efficient: Option<EmployeeHighlight> = None;
        let mut most_saturated: Option<EmployeeHighlight> = None;
        for employee in &employees {
            let own: Vec<&&Task> = in_month
                .iter()
                .filter(|t| t.assigned_to == Some(employee.id))
                .collect();
            if own.is_empty() {
                continue;
            }

            let on_time = own
                .iter()
                .filter(|t| t.is_on_time(ON_TIME_TOLERANCE))
                .count() as f64;
            let efficiency = on_time / own.len() as f64 * 100.0;
            if most_efficient
                .as_ref()
                .map(|best| efficiency > best.value)
                .unwrap_or(true)
            {
                most_efficient = Some(EmployeeHighlight {
                    employee_id: employee.id,
                    name: employee.full_name.clone(),
                    value: round2(efficiency),
                });
            }

            let hours: f64 = own.iter().map(|t| t.duration_hours().unwrap_or(0.0)).sum();
            let setting = capacities
                .get(&employee.id)
                .cloned()
                .unwrap_or_else(|| CapacitySetting::default_for(employee.id));
            let capacity = capacity_hours(&period, &setting);
            let load_index = if capacity > 0.0 {
                hours / capacity * 100.0
            } else {
                0.0
            };
            if most_saturated
                .as_ref()
                .map(|top| load_index > top.value)
                .unwrap_or(true)
            {
                most_saturated = Some(EmployeeHighlight {
                    employee_id: employee.id,
                    name: employee.full_name.clone(),
                    value: round2(load_index),
                });
            }
        }

        let mut hours_by_client: HashMap<Uuid, f64> = HashMap::new();
        for task in &in_month {
            if let Some(client_id) = task.client_id {
                *hours_by_client.entry(client_id).or_insert(0.0) +=
                    task.duration_hours().unwrap_or(0.0);
            }
        }
        let top_client = match hours_by_client
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        {
            Some((&client_id, &hours)) => {
                self.directory
                    .client(client_id)
                    .await?
                    .map(|client| ClientHighlight {
                        client_id,
                        name: client.name,
                        hours: round2(hours),
                    })
            }
            None => None,
        };

        let all: Vec<&Task> = completed.iter().collect();
        Ok(DashboardStats {
            tasks_completed,
            avg_hours: round2(avg_hours),
            compliance: round2(compliance),
            most_efficient,
            most_saturated,
            top_client,
            trend: monthly_trend(&all, &months),
        })
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
