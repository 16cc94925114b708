// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

/// 受保护API的请求计数器，由管理员守卫递增
pub const REQUESTS_TOTAL: &str = "supervision_requests_total";
/// 告警生成计数器，按每次重建批次累加
pub const ALERTS_GENERATED_TOTAL: &str = "supervision_alerts_generated_total";

/// 安装Prometheus导出器并注册本服务的计数器
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let addr: SocketAddr = "0.0.0.0:9000".parse().expect("Invalid metrics address");

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = builder.with_http_listener(addr).install() {
        tracing::warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
    }

    describe_counter!(REQUESTS_TOTAL, "Requests handled by the admin-guarded API");
    describe_counter!(
        ALERTS_GENERATED_TOTAL,
        "Alerts inserted by regeneration runs"
    );

    info!("Metrics exporter listening on {}", addr);
}
