// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 客户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// 客户唯一标识符
    pub id: Uuid,
    /// 客户名称
    pub name: String,
    /// 是否在约
    pub active: bool,
}
