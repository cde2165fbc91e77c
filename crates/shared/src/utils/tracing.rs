use crate::{
    errors::ServiceError,
    utils::metrics::{Method, Metrics, Status},
};
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::{Span, error, field, info, info_span};

pub struct TracingContext {
    pub span: Span,
    pub start_time: Instant,
}

/// Per-service span bookkeeping plus request metrics.
#[derive(Clone, Debug)]
pub struct ServiceTracer {
    component: &'static str,
    metrics: Metrics,
}

impl ServiceTracer {
    pub fn new(component: &'static str, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, component);

        Self { component, metrics }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn start(&self, operation: &str) -> TracingContext {
        let span = info_span!(
            "service_operation",
            component = self.component,
            operation = operation,
            status = field::Empty,
            duration_secs = field::Empty,
        );

        info!(parent: &span, "Starting operation: {operation}");

        TracingContext {
            span,
            start_time: Instant::now(),
        }
    }

    pub fn complete_success(&self, ctx: &TracingContext, method: Method, message: &str) {
        self.complete(ctx, method, true, message);
    }

    pub fn complete_error(&self, ctx: &TracingContext, method: Method, message: &str) {
        self.complete(ctx, method, false, message);
    }

    /// Records the outcome of `result` against `ctx` and hands it back unchanged.
    pub fn finish<T>(
        &self,
        ctx: &TracingContext,
        method: Method,
        result: Result<T, ServiceError>,
        success_message: &str,
    ) -> Result<T, ServiceError> {
        match &result {
            Ok(_) => self.complete_success(ctx, method, success_message),
            Err(err) => self.complete_error(ctx, method, &err.to_string()),
        }
        result
    }

    fn complete(&self, ctx: &TracingContext, method: Method, is_success: bool, message: &str) {
        let elapsed = ctx.start_time.elapsed().as_secs_f64();
        let (status_str, status) = if is_success {
            ("SUCCESS", Status::Success)
        } else {
            ("ERROR", Status::Error)
        };

        ctx.span.record("status", status_str);
        ctx.span.record("duration_secs", elapsed);

        if is_success {
            info!(parent: &ctx.span, "✅ Operation completed successfully: {message}");
        } else {
            error!(parent: &ctx.span, "❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);
    }
}
