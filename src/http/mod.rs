//! # Módulo HTTP
//!
//! Implementación mínima del protocolo HTTP/1.0 sin librerías de alto
//! nivel. Es la frontera que convierte requests del cable en las tres
//! operaciones del servicio (submit, consulta por ID, estadísticas).
//!
//! - Parsing de requests (request line, headers, query, formularios)
//! - Construcción de responses
//! - Códigos de estado
//!
//! ### Formato de Request
//!
//! ```text
//! GET /hash/1 HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
