//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use self::metrics::{
    create_metrics_router, init_metrics, record_cache_lookup, record_upstream_request,
    record_upstream_retry, CacheLookupResult, PrometheusMetrics,
};
