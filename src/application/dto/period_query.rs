// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::models::period::Period;

/// 月份查询参数
///
/// 缺失或无效的年月回退到当前月份。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub employee_id: Option<Uuid>,
}

impl PeriodQuery {
    /// 解析目标月份
    pub fn period(&self) -> Period {
        match (self.year, self.month) {
            (Some(year), Some(month)) => {
                Period::new(year, month).unwrap_or_else(Period::current)
            }
            _ => Period::current(),
        }
    }
}

#[cfg(test)]
#[path = "period_query_test.rs"]
mod tests;
