// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod alert;
pub mod client;
pub mod employee;
pub mod period;
pub mod settings;
pub mod task;
