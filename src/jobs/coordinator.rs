//! # Coordinador de Jobs
//! src/jobs/coordinator.rs
//!
//! Orquesta el flujo submit → espera → hash → registro y el drenado
//! ordenado al apagar el servidor.
//!
//! Cada submit genera una tarea diferida registrada en un `TaskTracker`.
//! `drain()` cierra el tracker y espera a que todas terminen; no hay
//! cancelación ni timeout por job.

use crate::error::{HashServerError, Result};
use crate::jobs::hasher::generate_hash;
use crate::jobs::store::JobStore;
use crate::jobs::types::JobId;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

/// Espera fija antes de calcular el hash (simula un hashing costoso)
pub const DEFAULT_HASH_DELAY: Duration = Duration::from_secs(5);

/// Coordinador del ciclo de vida de los jobs
#[derive(Debug, Clone)]
pub struct JobCoordinator {
    store: Arc<JobStore>,

    /// Tareas diferidas aún no terminadas
    tracker: TaskTracker,

    delay: Duration,
}

impl JobCoordinator {
    /// Crea un coordinador sobre un store compartido
    pub fn new(store: Arc<JobStore>, delay: Duration) -> Self {
        Self {
            store,
            tracker: TaskTracker::new(),
            delay,
        }
    }

    /// Store compartido (para los handlers de lectura)
    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }

    /// Encola el hashing de un password y retorna su job ID sin esperar
    ///
    /// Debe llamarse dentro de un runtime de tokio.
    ///
    /// # Errores
    ///
    /// - `InvalidInput` si el password está vacío (no se asigna ID)
    /// - `ShuttingDown` si `drain()` ya comenzó
    pub fn submit(&self, password: &str) -> Result<JobId> {
        if password.is_empty() {
            return Err(HashServerError::InvalidInput(
                "Password is empty or missing".to_string(),
            ));
        }

        // El token mantiene el tracker ocupado hasta que la tarea quede
        // registrada, así `drain()` no puede terminar entre el chequeo y el spawn.
        let _token = self.tracker.token();
        if self.is_draining() {
            return Err(HashServerError::ShuttingDown);
        }

        let submitted_at = Instant::now();
        let job_id = self.store.create_job();

        let store = Arc::clone(&self.store);
        let password = password.to_owned();
        let delay = self.delay;

        self.tracker.spawn(async move {
            sleep(delay).await;

            let hash = generate_hash(&password);
            let elapsed_ms = i32::try_from(submitted_at.elapsed().as_millis()).unwrap_or(i32::MAX);
            store.record_hash(job_id, hash, elapsed_ms);

            debug!(job_id, elapsed_ms, "hash recorded");
        });

        debug!(job_id, in_flight = self.tracker.len(), "job scheduled");
        Ok(job_id)
    }

    /// Número de jobs programados que todavía no registraron su hash
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Si ya se dejó de aceptar trabajo
    pub fn is_draining(&self) -> bool {
        self.tracker.is_closed()
    }

    /// Deja de aceptar submits y espera a todos los jobs en vuelo
    pub async fn drain(&self) {
        self.tracker.close();
        info!(in_flight = self.tracker.len(), "waiting for jobs to complete");
        self.tracker.wait().await;

        let stats = self.store.get_stats();
        info!(total = stats.total, average = stats.average, "all jobs completed");
    }
}
