// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 系统用户
///
/// 员工和管理员共用一张表，通过角色区分权限。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// 用户唯一标识符
    pub id: Uuid,
    /// 邮箱
    pub email: String,
    /// 姓名
    pub full_name: String,
    /// 角色
    pub role: Role,
}

/// 用户角色枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    /// 管理员，可访问监督模块
    #[serde(rename = "admin")]
    Admin,
    /// 普通员工
    #[default]
    #[serde(rename = "empleado")]
    Empleado,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Empleado => write!(f, "empleado"),
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "empleado" => Ok(Role::Empleado),
            _ => Err(()),
        }
    }
}
