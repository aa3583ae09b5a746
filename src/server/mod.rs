//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes (una tarea por conexión)
//! 3. Lee y parsea requests HTTP
//! 4. Genera y envía responses HTTP
//! 5. Al apagarse, drena los jobs en vuelo

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
