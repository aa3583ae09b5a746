//! # Hash Server
//! src/lib.rs
//!
//! Servicio HTTP asíncrono de hashing de passwords: el cliente envía un
//! password, recibe un job ID de inmediato y el hash (SHA-512 + base64)
//! queda disponible después de una espera fija. También expone
//! estadísticas agregadas (total de jobs y promedio de procesamiento).
//!
//! ## Arquitectura
//!
//! - `jobs`: store en memoria, coordinador de jobs diferidos, hashing y handlers
//! - `http`: Parsing y construcción de mensajes HTTP/1.0
//! - `router`: Enrutamiento de peticiones a handlers
//! - `server`: Loop TCP, conexiones y apagado ordenado
//! - `config`: Argumentos CLI y variables de entorno
//! - `shutdown`: SIGINT / SIGTERM
//! - `error`: Errores del servicio
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use hash_server::config::Config;
//! use hash_server::server::Server;
//! use hash_server::shutdown::install_shutdown_handler;
//!
//! # async fn run() -> hash_server::error::Result<()> {
//! let server = Server::new(Config::default());
//! server.run(install_shutdown_handler()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod jobs;
pub mod router;
pub mod server;
pub mod shutdown;
