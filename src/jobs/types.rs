//! # Tipos del Sistema de Jobs
//! src/jobs/types.rs

use serde::{Deserialize, Serialize};

/// Identificador de un job. Empieza en 1; el 0 nunca se asigna.
pub type JobId = u64;

/// Estado de un job dentro del store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// ID asignado, hash todavía no registrado
    Created,

    /// Hash y duración registrados
    Completed,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Created => "created",
            JobState::Completed => "completed",
        }
    }
}

/// Job completado tal como lo guarda el store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedJob {
    pub hash: String,

    /// Milisegundos desde el submit hasta el registro del hash
    pub processing_duration_ms: i32,
}

/// Snapshot de estadísticas agregadas
///
/// Se serializa como `{"total": N, "average": M}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Jobs con hash registrado
    pub total: u64,

    /// Promedio móvil (entero, ms) de las duraciones registradas
    pub average: i32,
}
