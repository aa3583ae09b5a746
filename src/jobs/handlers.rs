//! # Handlers HTTP para Jobs
//! src/jobs/handlers.rs
//!
//! - `POST /hash` (form `password=...`) → job ID en texto plano
//! - `GET /hash/{id}` → hash en texto plano
//! - `GET /stats` → `{"total": N, "average": M}`

use crate::error::HashServerError;
use crate::http::{Method, Request, Response, StatusCode};
use crate::jobs::coordinator::JobCoordinator;
use crate::jobs::types::JobId;
use tracing::{debug, info, warn};

const HASH_PREFIX: &str = "/hash";

/// Handler para todo lo que cuelga de `/hash`
pub fn hash_handler(req: &Request, coordinator: &JobCoordinator) -> Response {
    match req.method() {
        Method::POST => submit(req, coordinator),
        Method::GET | Method::HEAD => fetch_hash(req, coordinator),
        _ => Response::status_error(StatusCode::MethodNotAllowed),
    }
}

/// Handler para `/stats`
pub fn stats_handler(req: &Request, coordinator: &JobCoordinator) -> Response {
    if !matches!(req.method(), Method::GET | Method::HEAD) {
        return Response::status_error(StatusCode::MethodNotAllowed);
    }

    let stats = coordinator.store().get_stats();
    match serde_json::to_string(&stats) {
        Ok(body) => Response::json(&body),
        Err(e) => Response::error(StatusCode::InternalServerError, &e.to_string()),
    }
}

fn submit(req: &Request, coordinator: &JobCoordinator) -> Response {
    let password = match req.form_value("password") {
        Some(p) if !p.is_empty() => p,
        _ => {
            return Response::error(
                StatusCode::BadRequest,
                "Bad Request. Password is empty or missing.",
            )
        }
    };

    match coordinator.submit(password) {
        Ok(job_id) => {
            info!(job_id, "password accepted");
            Response::text(StatusCode::Ok, &job_id.to_string())
        }
        Err(e) => {
            warn!(error = %e, "submission rejected");
            Response::error(e.status_code(), &e.to_string())
        }
    }
}

fn fetch_hash(req: &Request, coordinator: &JobCoordinator) -> Response {
    let job_id = match parse_job_id(req.path()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let store = coordinator.store();
    match store.retrieve_hash(job_id) {
        Some(hash) => {
            debug!(job_id, duration_ms = store.processing_duration(job_id), "hash served");
            Response::text(StatusCode::Ok, &hash)
        }
        None => {
            let e = HashServerError::NotFound(job_id);
            let state = store.job_state(job_id).map_or("unallocated", |s| s.as_str());
            debug!(error = %e, state, "hash not available");
            Response::error(e.status_code(), "Could not find the job")
        }
    }
}

/// Extrae el job ID de `/hash/{id}`
fn parse_job_id(path: &str) -> Result<JobId, Response> {
    let token = path
        .strip_prefix(HASH_PREFIX)
        .map(|rest| rest.trim_start_matches('/'))
        .unwrap_or_default();

    if token.is_empty() {
        return Err(Response::error(
            StatusCode::BadRequest,
            "Bad Request. Path is missing job ID.",
        ));
    }

    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Response::error(
            StatusCode::BadRequest,
            "Bad Request. Unable to read job ID",
        ));
    }

    token.parse::<JobId>().map_err(|_| {
        Response::error(StatusCode::BadRequest, "Bad Request. Unable to read job ID")
    })
}
