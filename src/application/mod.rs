// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层
///
/// 请求与响应的数据传输对象
pub mod dto;
