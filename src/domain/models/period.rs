// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// 目标月份
///
/// 所有月度聚合都使用半开区间 `[start, next_start)`，
/// 边界取UTC当月一日零点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// 年份
    pub year: i32,
    /// 月份（1-12）
    pub month: u32,
}

impl Period {
    /// 创建目标月份
    ///
    /// # 参数
    ///
    /// * `year` - 年份
    /// * `month` - 月份（1-12）
    ///
    /// # 返回值
    ///
    /// * `Some(Period)` - 有效的月份
    /// * `None` - 月份超出范围
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// 当前月份（UTC）
    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// 月初时刻（含）
    pub fn start(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(self.year, self.month, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// 下月月初时刻（不含）
    pub fn next_start(&self) -> DateTime<Utc> {
        self.next().start()
    }

    /// 下一个月份
    pub fn next(&self) -> Period {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// 上一个月份
    pub fn prev(&self) -> Period {
        if self.month == 1 {
            Period {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Period {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// 当月天数
    pub fn days_in_month(&self) -> u32 {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let next = self.next();
        let next_first = NaiveDate::from_ymd_opt(next.year, next.month, 1);
        match (first, next_first) {
            (Some(a), Some(b)) => (b - a).num_days() as u32,
            _ => 30,
        }
    }

    /// 按工作周比例折算当月工作日数
    ///
    /// `business_days = round((days_in_month / 7) × working_days_per_week)`
    ///
    /// # 参数
    ///
    /// * `working_days_per_week` - 每周工作日数
    ///
    /// # 返回值
    ///
    /// 四舍五入后的工作日数
    pub fn business_days(&self, working_days_per_week: f64) -> f64 {
        ((self.days_in_month() as f64 / 7.0) * working_days_per_week).round()
    }

    /// 以当前月份为终点的最近N个月，按时间顺序排列
    pub fn trailing(&self, count: u32) -> Vec<Period> {
        let mut months = Vec::with_capacity(count as usize);
        let mut cursor = *self;
        for _ in 0..count {
            months.push(cursor);
            cursor = cursor.prev();
        }
        months.reverse();
        months
    }

    /// 标签（"yyyy-mm"），用于趋势序列
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
#[path = "period_test.rs"]
mod tests;
