//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Acepta conexiones y procesa cada una en su propia tarea de tokio.
//! Las tareas de conexión se registran en un `TaskTracker` para poder
//! esperarlas al apagar.
//!
//! ## Apagado ordenado
//!
//! 1. Se cancela el token: el loop deja de aceptar conexiones
//! 2. Se espera a que las conexiones abiertas terminen de responder
//! 3. `JobCoordinator::drain()` espera a todos los jobs en vuelo

use crate::config::Config;
use crate::error::Result;
use crate::http::request::expected_len;
use crate::http::{Method, Request, Response, StatusCode};
use crate::jobs::{handlers as job_handlers, JobCoordinator, JobStore};
use crate::router::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::{timeout, Instant};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Tiempo máximo para recibir un request completo
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Servidor HTTP del servicio de hashing
pub struct Server {
    config: Config,
    router: Arc<Router>,
    coordinator: JobCoordinator,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(JobStore::new());
        let coordinator = JobCoordinator::new(store, config.hash_delay());

        let mut router = Router::new();
        router.register_prefix("/hash", job_handlers::hash_handler);
        router.register("/stats", job_handlers::stats_handler);

        Self {
            config,
            router: Arc::new(router),
            coordinator,
        }
    }

    /// Coordinador compartido (útil para inspeccionar el estado en tests)
    pub fn coordinator(&self) -> &JobCoordinator {
        &self.coordinator
    }

    /// Hace bind en la dirección configurada y atiende hasta que se cancele `shutdown`
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address).await?;
        info!(address = %address, "server listening");

        self.serve(listener, shutdown).await
    }

    /// Atiende conexiones de un listener ya creado y drena al cancelar `shutdown`
    pub async fn serve(self, listener: TcpListener, shutdown: CancellationToken) -> Result<()> {
        let connections = TaskTracker::new();
        let max_request_bytes = self.config.max_request_bytes;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            warn!(error = %e, "failed to accept connection");
                            continue;
                        }
                    };

                    let router = Arc::clone(&self.router);
                    let coordinator = self.coordinator.clone();

                    connections.spawn(async move {
                        let result =
                            handle_connection(stream, peer, &router, &coordinator, max_request_bytes).await;
                        if let Err(e) = result {
                            warn!(peer = %peer, error = %e, "connection error");
                        }
                    });
                }
            }
        }

        drop(listener);
        info!("server no longer accepts new connections");

        connections.close();
        connections.wait().await;

        self.coordinator.drain().await;
        info!("server shutdown complete");
        Ok(())
    }
}

/// Resultado de leer un request del socket
enum ReadOutcome {
    /// El peer cerró sin mandar nada
    Closed,

    /// Headers + `Content-Length` bytes de body
    Complete(Vec<u8>),

    /// Se superó el límite configurado
    TooLarge,
}

async fn read_request<S>(stream: &mut S, max_bytes: usize) -> std::io::Result<ReadOutcome>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = Vec::with_capacity(1024);
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);

        if buffer.len() > max_bytes {
            return Ok(ReadOutcome::TooLarge);
        }
        if expected_len(&buffer).is_some_and(|total| buffer.len() >= total) {
            break;
        }
    }

    if buffer.is_empty() {
        Ok(ReadOutcome::Closed)
    } else {
        Ok(ReadOutcome::Complete(buffer))
    }
}

/// Procesa una conexión: un request, una respuesta, cierre
async fn handle_connection<S>(
    mut stream: S,
    peer: SocketAddr,
    router: &Router,
    coordinator: &JobCoordinator,
    max_request_bytes: usize,
) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let start = Instant::now();

    let read = match timeout(READ_TIMEOUT, read_request(&mut stream, max_request_bytes)).await {
        Ok(read) => read?,
        Err(_) => {
            debug!(peer = %peer, "timed out waiting for request");
            return Ok(());
        }
    };

    let (response, method, path) = match read {
        ReadOutcome::Closed => {
            debug!(peer = %peer, "connection closed without data");
            return Ok(());
        }
        ReadOutcome::Complete(buffer) => match Request::parse(&buffer) {
            Ok(request) => {
                let response = router.route(&request, coordinator);
                let response = if *request.method() == Method::HEAD {
                    response.without_body()
                } else {
                    response
                };
                let method = request.method().as_str().to_string();
                (response, method, request.path().to_string())
            }
            Err(e) => {
                debug!(peer = %peer, error = %e, "parse error");
                (
                    Response::error(StatusCode::BadRequest, &format!("Invalid: {}", e)),
                    "-".to_string(),
                    "/error".to_string(),
                )
            }
        },
        ReadOutcome::TooLarge => (
            Response::status_error(StatusCode::PayloadTooLarge),
            "-".to_string(),
            "/error".to_string(),
        ),
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.flush().await?;
    stream.shutdown().await?;

    info!(
        peer = %peer,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_secs_f64() * 1000.0,
        "request handled"
    );

    Ok(())
}
