// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层
///
/// 数据库连接、实体映射、仓库实现与指标导出
pub mod database;
pub mod metrics;
pub mod repositories;
