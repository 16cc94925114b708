// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP处理器模块
pub mod alert_handler;
pub mod client_handler;
pub mod employee_handler;
pub mod settings_handler;
pub mod stats_handler;
pub mod task_handler;
