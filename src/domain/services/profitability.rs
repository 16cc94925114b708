// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::period::Period;
use crate::domain::models::settings::{CapacitySetting, ClientFinancial};
use crate::domain::models::task::Task;
use crate::domain::repositories::directory_repository::DirectoryRepository;
use crate::domain::repositories::settings_repository::SettingsRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::workload::{capacity_hours, cost_per_hour};
use crate::domain::services::{completed_in, monthly_trend, round2, TrendPoint};

/// 客户月度盈利视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfitability {
    /// 客户ID
    pub client_id: Uuid,
    /// 客户名称
    pub name: String,
    /// 当月投入工时
    pub hours_invested: f64,
    /// 人力成本（逐任务按负责人小时成本归集）
    pub labor_cost: f64,
    /// 运营成本（来自财务配置）
    pub operating_cost: f64,
    /// 总成本
    pub total_cost: f64,
    /// 月收入
    pub revenue: f64,
    /// 盈利（收入-总成本）
    pub profitability: f64,
    /// 利润率（百分比，收入为0时取0）
    pub margin: f64,
    /// 利润率分级
    pub margin_level: MarginLevel,
    /// 按模块分类的工时
    pub category_hours: BTreeMap<String, f64>,
    /// 最近3个月趋势
    pub trend: Vec<TrendPoint>,
}

/// 盈利汇总
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSummary {
    /// 客户总数
    pub total_clients: u64,
    /// 盈利客户数（盈利 > 0）
    pub profitable: u64,
    /// 亏损客户数（盈利 ≤ 0 且有合同收入）
    pub with_losses: u64,
    /// 收入合计
    pub total_revenue: f64,
    /// 成本合计
    pub total_cost: f64,
}

/// 利润率分级枚举
///
/// 阈值固定：>40 高；≥20 中；其余低。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginLevel {
    High,
    Medium,
    Low,
}

impl MarginLevel {
    /// 根据利润率分级
    pub fn classify(margin: f64) -> Self {
        if margin > 40.0 {
            MarginLevel::High
        } else if margin >= 20.0 {
            MarginLevel::Medium
        } else {
            MarginLevel::Low
        }
    }
}

impl fmt::Display for MarginLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MarginLevel::High => write!(f, "high"),
            MarginLevel::Medium => write!(f, "medium"),
            MarginLevel::Low => write!(f, "low"),
        }
    }
}

/// 客户盈利能力计算服务
///
/// 人力成本按任务逐条归集：每条任务的耗时乘以其负责人的
/// 小时成本（月薪/产能工时），多人服务同一客户时自然形成
/// 加权混合成本。
pub struct ProfitabilityService {
    tasks: Arc<dyn TaskRepository>,
    settings: Arc<dyn SettingsRepository>,
    directory: Arc<dyn DirectoryRepository>,
}

impl ProfitabilityService {
    /// 创建新的盈利计算服务实例
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

    /// 计算客户盈利能力
    ///
    /// # 参数
    ///
    /// * `period` - 目标月份
    ///
    /// # 返回值
    ///
    /// * `Ok((Vec<ClientProfitability>, ProfitSummary))` - 按盈利降序的客户视图与汇总
    /// * `Err(anyhow::Error)` - 数据访问失败
    pub async fn client_profitability(
        &self,
        period: Period,
    ) -> Result<(Vec<ClientProfitability>, ProfitSummary), anyhow::Error> {
        let clients = self.directory.active_clients().await?;

        let financials: HashMap<Uuid, ClientFinancial> = self
            .settings
            .all_financial()
            .await?
            .into_iter()
            .map(|f| (f.client_id, f))
            .collect();

        // 每位员工的小时成本，按目标月产能推导
        let hourly_rates: HashMap<Uuid, f64> = self
            .settings
            .all_capacity()
            .await?
            .into_iter()
            .map(|setting| {
                let capacity = capacity_hours(&period, &setting);
                (setting.user_id, cost_per_hour(&setting, capacity))
            })
            .collect();

        let months = period.trailing(3);
        let completed = self
            .tasks
            .completed_between(months[0].start(), period.next_start())
            .await?;

        let month_start = period.start();
        let month_end = period.next_start();

        let mut rows = Vec::with_capacity(clients.len());
        for client in clients {
            let own: Vec<&Task> = completed
                .iter()
                .filter(|t| t.client_id == Some(client.id))
                .collect();

            let mut hours_invested = 0.0;
            let mut labor_cost = 0.0;
            let mut category_hours: BTreeMap<String, f64> = BTreeMap::new();
            for task in own.iter().filter(|t| completed_in(t, month_start, month_end)) {
                let duration = task.duration_hours().unwrap_or(0.0);
                hours_invested += duration;

                let rate = task
                    .assigned_to
                    .and_then(|id| hourly_rates.get(&id).copied())
                    .unwrap_or(0.0);
                labor_cost += duration * rate;

                *category_hours.entry(task.module.clone()).or_insert(0.0) += duration;
            }
            for hours in category_hours.values_mut() {
                *hours = round2(*hours);
            }

            let financial = financials.get(&client.id);
            let revenue = financial.map(|f| f.ingreso_mensual).unwrap_or(0.0);
            let operating_cost = financial.map(|f| f.costo_operativo_estimado).unwrap_or(0.0);
            let total_cost = labor_cost + operating_cost;
            let profitability = revenue - total_cost;
            let margin = if revenue > 0.0 {
                profitability / revenue * 100.0
            } else {
                0.0
            };

            rows.push(ClientProfitability {
                client_id: client.id,
                name: client.name,
                hours_invested: round2(hours_invested),
                labor_cost: round2(labor_cost),
                operating_cost: round2(operating_cost),
                total_cost: round2(total_cost),
                revenue: round2(revenue),
                profitability: round2(profitability),
                margin: round2(margin),
                margin_level: MarginLevel::classify(margin),
                category_hours,
                trend: monthly_trend(&own, &months),
            });
        }

        rows.sort_by(|a, b| {
            b.profitability
                .partial_cmp(&a.profitability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let summary = ProfitSummary {
            total_clients: rows.len() as u64,
            profitable: rows.iter().filter(|r| r.profitability > 0.0).count() as u64,
            with_losses: rows
                .iter()
                .filter(|r| r.profitability <= 0.0 && r.revenue > 0.0)
                .count() as u64,
            total_revenue: round2(rows.iter().map(|r| r.revenue).sum()),
            total_cost: round2(rows.iter().map(|r| r.total_cost).sum()),
        };

        Ok((rows, summary))
    }
}

#[cfg(test)]
#[path = "profitability_test.rs"]
mod tests;
