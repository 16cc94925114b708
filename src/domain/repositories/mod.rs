// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod alert_repository;
pub mod directory_repository;
pub mod settings_repository;
pub mod task_repository;
