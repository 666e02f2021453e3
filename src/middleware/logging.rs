//! Logging middleware
//! 
//! This module provides request logging middleware for tracking API calls,
//! latency, and error responses.

use std::time::Instant;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

use crate::utils::helpers::generate_uuid;

/// Latency threshold above which a request is logged as slow
const SLOW_REQUEST_MS: u128 = 1000;

/// Log every request with method, path, status, and latency
pub async fn track_requests(request: Request, next: Next) -> Response {
    let request_id = generate_uuid();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();
    
    let response = next.run(request).await;
    
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();
    
    if response.status().is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            latency_ms = latency_ms as u64,
            "Request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            latency_ms = latency_ms as u64,
            "Request completed"
        );
    }
    
    if latency_ms > SLOW_REQUEST_MS {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            latency_ms = latency_ms as u64,
            "Slow request detected"
        );
    }
    
    response
}
