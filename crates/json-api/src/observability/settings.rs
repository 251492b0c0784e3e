//! Request logging settings fixed at startup.

use std::sync::OnceLock;

use crate::config::ServerConfig;

#[derive(Debug, Clone, Copy)]
struct RuntimeSettings {
    slow_request_threshold_ms: u64,
    parent_propagation: bool,
}

impl RuntimeSettings {
    const DEFAULT: Self = Self {
        slow_request_threshold_ms: 750,
        parent_propagation: false,
    };
}

static SETTINGS: OnceLock<RuntimeSettings> = OnceLock::new();

/// Record the settings request middleware reads. Later calls are ignored.
pub(super) fn apply_runtime_config(config: &ServerConfig) {
    let observability = &config.observability;

    _ = SETTINGS.set(RuntimeSettings {
        slow_request_threshold_ms: observability.slow_request_threshold_ms,
        // Remote parents are only useful when spans are exported.
        parent_propagation: observability.otel_enabled
            && observability.otel_parent_propagation_enabled,
    });
}

fn current() -> RuntimeSettings {
    SETTINGS.get().copied().unwrap_or(RuntimeSettings::DEFAULT)
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    current().slow_request_threshold_ms
}

pub(super) fn otel_parent_propagation_enabled() -> bool {
    current().parent_propagation
}
