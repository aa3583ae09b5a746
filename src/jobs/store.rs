//! # Store de Jobs en Memoria
//! src/jobs/store.rs
//!
//! Registro thread-safe de jobs y estadísticas. Todo el estado mutable
//! (último ID asignado, mapa de hashes, promedio) vive dentro de un único
//! `RwLock`, así la asignación de IDs, la escritura del mapa y el recálculo
//! del promedio nunca se intercalan de forma inconsistente.
//!
//! Lecturas (`retrieve_hash`, `get_stats`) toman el lock compartido;
//! escrituras (`create_job`, `record_hash`) el exclusivo.

use crate::jobs::types::{CompletedJob, JobId, JobState, Stats};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Estado protegido por el lock
#[derive(Debug, Default)]
struct StoreState {
    /// Último ID entregado (0 = ninguno todavía)
    last_id: JobId,

    /// Jobs completados (job_id -> hash + duración)
    completed: HashMap<JobId, CompletedJob>,

    /// Promedio móvil en milisegundos
    average: i32,
}

/// Store de jobs y estadísticas
#[derive(Debug, Default)]
pub struct JobStore {
    state: RwLock<StoreState>,
}

impl JobStore {
    /// Crea un store vacío
    pub fn new() -> Self {
        Self::default()
    }

    // Ningún camino deja el estado a medias, así que un lock envenenado
    // sigue siendo utilizable.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Asigna un nuevo ID estrictamente creciente (1, 2, 3, ...)
    ///
    /// # Ejemplo
    /// ```
    /// use hash_server::jobs::JobStore;
    ///
    /// let store = JobStore::new();
    /// assert_eq!(store.create_job(), 1);
    /// assert_eq!(store.create_job(), 2);
    /// ```
    pub fn create_job(&self) -> JobId {
        let mut state = self.write();
        state.last_id += 1;
        state.last_id
    }

    /// Registra el hash de un job y actualiza el promedio móvil
    ///
    /// El promedio se recalcula como
    /// `(promedio * total_previo + duracion) / (total_previo + 1)`
    /// con división entera truncada. Mapa y promedio se actualizan en la
    /// misma sección crítica.
    pub fn record_hash(&self, id: JobId, hash: String, duration_ms: i32) {
        let mut state = self.write();
        state.completed.insert(
            id,
            CompletedJob {
                hash,
                processing_duration_ms: duration_ms,
            },
        );

        let total = state.completed.len() as i64;
        let total_before = total - 1;
        let average = (i64::from(state.average) * total_before + i64::from(duration_ms)) / total;
        state.average = average.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    }

    /// Obtiene el hash de un job completado
    ///
    /// Retorna `None` si el ID es desconocido o el job aún no terminó.
    pub fn retrieve_hash(&self, id: JobId) -> Option<String> {
        let state = self.read();
        state.completed.get(&id).map(|job| job.hash.clone())
    }

    /// Duración registrada de un job completado
    pub fn processing_duration(&self, id: JobId) -> Option<i32> {
        let state = self.read();
        state.completed.get(&id).map(|job| job.processing_duration_ms)
    }

    /// Estado del ciclo de vida de un job
    pub fn job_state(&self, id: JobId) -> Option<JobState> {
        let state = self.read();
        if state.completed.contains_key(&id) {
            Some(JobState::Completed)
        } else if id != 0 && id <= state.last_id {
            Some(JobState::Created)
        } else {
            None
        }
    }

    /// Snapshot consistente de `(total, average)`
    pub fn get_stats(&self) -> Stats {
        let state = self.read();
        Stats {
            total: state.completed.len() as u64,
            average: state.average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::hasher::generate_hash;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    const TEST_PASSWORD: &str = "puppymonkeybaby";
    const TEST_HASH: &str = "Io0yGSqR3RGSwHCW54RLn9QYJr7Ypmra2qeTTWJ7v9z8WKqpudctlPrCl+bzLSBpo2C3YR6+sMo1M1NduS6TGw==";

    // ==================== IDs ====================

    #[test]
    fn test_create_job_starts_at_one() {
        let store = JobStore::new();
        assert_eq!(store.create_job(), 1);
        assert_eq!(store.create_job(), 2);
    }

    #[test]
    fn test_create_job_concurrent_ids_are_unique() {
        let store = Arc::new(JobStore::new());
        let threads = 8;
        let per_thread = 250;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..per_thread)
                        .map(|_| store.create_job())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicated id {}", id);
            }
        }

        let n = (threads * per_thread) as u64;
        assert_eq!(ids.len() as u64, n);
        assert!(ids.iter().all(|id| (1..=n).contains(id)));
    }

    // ==================== Record / Retrieve ====================

    #[test]
    fn test_record_and_retrieve_hash() {
        let store = JobStore::new();
        let id = store.create_job();
        assert_ne!(id, 0);

        store.record_hash(id, generate_hash(TEST_PASSWORD), 5000);

        assert_eq!(store.retrieve_hash(id).as_deref(), Some(TEST_HASH));
        assert_eq!(store.processing_duration(id), Some(5000));
    }

    #[test]
    fn test_retrieve_unrecorded_hash() {
        let store = JobStore::new();
        let id = store.create_job();

        assert!(store.retrieve_hash(id).is_none());
        assert!(store.retrieve_hash(0).is_none());
        assert!(store.retrieve_hash(999).is_none());
    }

    #[test]
    fn test_record_hash_for_unallocated_id() {
        let store = JobStore::new();
        store.record_hash(42, "h".to_string(), 10);

        assert_eq!(store.retrieve_hash(42).as_deref(), Some("h"));
        // No adelanta el contador
        assert_eq!(store.create_job(), 1);
    }

    // ==================== Job State ====================

    #[test]
    fn test_job_state_lifecycle() {
        let store = JobStore::new();
        assert_eq!(store.job_state(1), None);

        let id = store.create_job();
        assert_eq!(store.job_state(id), Some(JobState::Created));

        store.record_hash(id, "h".to_string(), 1);
        assert_eq!(store.job_state(id), Some(JobState::Completed));

        assert_eq!(store.job_state(0), None);
        assert_eq!(store.job_state(id + 1), None);
    }

    // ==================== Stats ====================

    #[test]
    fn test_stats_empty_store() {
        let store = JobStore::new();
        assert_eq!(store.get_stats(), Stats { total: 0, average: 0 });
    }

    #[test]
    fn test_stats_constant_durations() {
        let store = JobStore::new();
        for _ in 0..100 {
            let id = store.create_job();
            store.record_hash(id, generate_hash(TEST_PASSWORD), 5000);
        }

        let stats = store.get_stats();
        assert_eq!(stats.total, 100);
        assert_eq!(stats.average, 5000);
    }

    #[test]
    fn test_stats_truncating_average() {
        let store = JobStore::new();
        store.record_hash(store.create_job(), "a".into(), 5000);
        store.record_hash(store.create_job(), "b".into(), 5001);
        // (5000 * 1 + 5001) / 2 = 5000 (truncado)
        assert_eq!(store.get_stats().average, 5000);

        store.record_hash(store.create_job(), "c".into(), 5010);
        // (5000 * 2 + 5010) / 3 = 5003
        assert_eq!(store.get_stats(), Stats { total: 3, average: 5003 });
    }

    #[test]
    fn test_stats_ignore_incomplete_jobs() {
        let store = JobStore::new();
        let done = store.create_job();
        let _pending = store.create_job();
        store.record_hash(done, "h".into(), 4000);

        assert_eq!(store.get_stats(), Stats { total: 1, average: 4000 });
    }

    #[test]
    fn test_stats_no_overflow_with_large_totals() {
        let store = JobStore::new();
        for id in 1..=500_000u64 {
            store.record_hash(id, String::new(), 5000);
        }
        assert_eq!(store.get_stats(), Stats { total: 500_000, average: 5000 });
    }

    #[test]
    fn test_concurrent_records_keep_stats_consistent() {
        let store = Arc::new(JobStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let id = store.create_job();
                        store.record_hash(id, "h".into(), 5000);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get_stats(), Stats { total: 800, average: 5000 });
    }
}
