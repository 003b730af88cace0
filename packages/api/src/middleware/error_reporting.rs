use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::Level;

use crate::error::ErrorReport;

const MAX_LEN: usize = 4 * 1024;

/// Complaint texts can be long; keep log lines bounded.
fn truncate(mut input: String) -> String {
    if input.len() > MAX_LEN {
        let mut end = MAX_LEN;
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        input.truncate(end);
        input.push('…');
    }
    input
}

/// A missing model is an operational state, not a fault.
fn report_level(status_code: u16) -> Level {
    if status_code == StatusCode::SERVICE_UNAVAILABLE.as_u16() {
        Level::WARN
    } else {
        Level::ERROR
    }
}

pub async fn error_reporting_middleware(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    metrics::counter!(
        "error_reports_total",
        "status" => report.status_code.to_string(),
        "code" => report.public_code.clone()
    )
    .increment(1);

    let summary = truncate(report.summary);
    if report_level(report.status_code) == Level::WARN {
        tracing::warn!(
            error_id = %report.id,
            status_code = report.status_code,
            public_code = %report.public_code,
            method = %method,
            path = %path,
            "{}", summary
        );
    } else {
        tracing::error!(
            error_id = %report.id,
            status_code = report.status_code,
            public_code = %report.public_code,
            method = %method,
            path = %path,
            "{}", summary
        );
    }
    if let Some(details) = report.details {
        tracing::debug!(error_id = %report.id, "details: {}", truncate(details));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::{report_level, truncate};
    use tracing::Level;

    #[test]
    fn test_unavailable_model_reports_as_warning() {
        assert_eq!(report_level(503), Level::WARN);
        assert_eq!(report_level(500), Level::ERROR);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "गड्ढे".repeat(2000);
        let out = truncate(long);
        assert!(out.len() <= super::MAX_LEN + '…'.len_utf8());
        assert!(out.ends_with('…'));

        assert_eq!(truncate("short".to_string()), "short");
    }
}
