// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::period::Period;
use crate::domain::models::task::Task;

/// 告警规则评估服务
pub mod alerting;
/// 客户盈利能力计算
pub mod profitability;
/// 仪表盘统计
pub mod stats;
/// 员工负载计算
pub mod workload;

/// 按时容差系数：实际耗时不超过预估的130%仍算按时
pub const ON_TIME_TOLERANCE: f64 = 1.3;

/// 告警规则4使用的固定工时成本（货币单位/小时）
///
/// 与盈利视图中按薪资推导的成本模型并存，二者口径不同，
/// 未经产品确认不得合并。
pub const FLAT_COST_PER_HOUR: f64 = 200.0;

/// 即将到期窗口（小时）
pub const DUE_SOON_WINDOW_HOURS: i64 = 24;

/// 过载阈值（负载指数百分比）
pub const OVERLOAD_THRESHOLD: f64 = 100.0;

/// 趋势序列中的一个月份
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// 月份标签（"yyyy-mm"）
    pub period: String,
    /// 当月完成任务数
    pub tasks: u64,
    /// 当月完成工时
    pub hours: f64,
}

/// 保留两位小数，用于输出值
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 判断任务是否在半开区间内完成
pub(crate) fn completed_in(task: &Task, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    match task.completed_at {
        Some(completed) => {
            let utc = completed.with_timezone(&Utc);
            utc >= start && utc < end
        }
        None => false,
    }
}

/// 基于已完成任务构建逐月趋势
///
/// 调用方先把任务过滤到目标范围（某员工或某客户），
/// 这里只负责按月份归档并求和。
///
/// # 参数
///
/// * `tasks` - 已完成的任务集合
/// * `months` - 目标月份序列（时间顺序）
///
/// # 返回值
///
/// 与 `months` 对齐的趋势点序列
pub(crate) fn monthly_trend(tasks: &[&Task], months: &[Period]) -> Vec<TrendPoint> {
    months
        .iter()
        .map(|month| {
            let start = month.start();
            let end = month.next_start();
            let mut count = 0u64;
            let mut hours = 0.0;
            for task in tasks {
                if completed_in(task, start, end) {
                    count += 1;
                    hours += task.duration_hours().unwrap_or(0.0);
                }
            }
            TrendPoint {
                period: month.label(),
                tasks: count,
                hours: round2(hours),
            }
        })
        .collect()
}
