//! # Sistema de Jobs
//!
//! Núcleo del servicio: un store en memoria con estadísticas y un
//! coordinador que difiere el cálculo de cada hash.
//!
//! ```text
//! submit ─► JobStore::create_job ─► (espera fija) ─► generate_hash ─► JobStore::record_hash
//! ```
//!
//! ## Endpoints
//!
//! - `POST /hash` - Encolar un password
//! - `GET /hash/{id}` - Obtener el hash
//! - `GET /stats` - Total de jobs y promedio de procesamiento

pub mod coordinator;
pub mod handlers;
pub mod hasher;
pub mod store;
pub mod types;

pub use coordinator::{JobCoordinator, DEFAULT_HASH_DELAY};
pub use hasher::generate_hash;
pub use store::JobStore;
pub use types::{CompletedJob, JobId, JobState, Stats};
