// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 员工产能配置
///
/// 每位员工至多一条，由管理员维护（存在性检查后插入或更新）。
/// 字段名与存量数据保持西语写法。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacitySetting {
    /// 配置唯一标识符
    pub id: Uuid,
    /// 员工ID
    pub user_id: Uuid,
    /// 每日工作小时数
    pub horas_laborales_diarias: f64,
    /// 每周工作日数
    pub dias_laborales_semana: f64,
    /// 月薪
    pub salario_mensual: f64,
}

impl CapacitySetting {
    /// 无配置时使用的默认产能（8小时×5天，月薪0）
    pub fn default_for(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            horas_laborales_diarias: 8.0,
            dias_laborales_semana: 5.0,
            salario_mensual: 0.0,
        }
    }
}

/// 客户财务配置
///
/// 每个客户至多一条，记录合同月收入与预估运营成本。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientFinancial {
    /// 配置唯一标识符
    pub id: Uuid,
    /// 客户ID
    pub client_id: Uuid,
    /// 月收入
    pub ingreso_mensual: f64,
    /// 预估月运营成本
    pub costo_operativo_estimado: f64,
    /// 是否在约
    pub active: bool,
}
