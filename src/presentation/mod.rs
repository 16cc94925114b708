// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 表现层
///
/// HTTP处理器、管理员守卫中间件、错误映射与路由装配
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
