// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
pub mod alert_dto;
pub mod period_query;
pub mod settings_dto;
pub mod task_dto;
