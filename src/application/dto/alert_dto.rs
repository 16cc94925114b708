// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 告警解决请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveAlertRequest {
    pub alert_id: Uuid,
}

/// 告警重建响应
#[derive(Debug, Serialize)]
pub struct GenerateAlertsResponse {
    pub generated: usize,
}
