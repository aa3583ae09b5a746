//! # Construcción de Respuestas HTTP
//!
//! API para construir respuestas HTTP/1.0 y convertirlas a bytes.
//!
//! ## Formato de una respuesta HTTP/1.0
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: text/plain; charset=utf-8\r\n
//! Content-Length: 1\r\n
//! \r\n
//! 1
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use hash_server::http::{Response, StatusCode};
//!
//! let response = Response::text(StatusCode::Ok, "42");
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\n42"));
//! ```

use super::StatusCode;
use std::collections::HashMap;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Representa una respuesta HTTP/1.0 completa
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,

    /// Usamos HashMap para evitar duplicados
    headers: HashMap<String, String>,

    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header (si ya existe, se sobrescribe)
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Versión mutable de `with_header`
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el body y el header `Content-Length`
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self.headers.insert("Content-Length".to_string(), self.body.len().to_string());
        self
    }

    /// Respuesta de texto plano
    ///
    /// # Ejemplo
    /// ```
    /// use hash_server::http::{Response, StatusCode};
    ///
    /// let response = Response::text(StatusCode::Ok, "1");
    /// assert_eq!(response.body(), b"1");
    /// ```
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", TEXT_PLAIN)
            .with_body(body)
    }

    /// Respuesta JSON exitosa (200 OK)
    pub fn json(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "application/json")
            .with_body(body)
    }

    /// Respuesta de error en texto plano: el mensaje seguido de `\n`
    ///
    /// # Ejemplo
    /// ```
    /// use hash_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound, "Could not find the job");
    /// assert_eq!(response.body(), b"Could not find the job\n");
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::text(status, &format!("{}\n", message))
            .with_header("X-Content-Type-Options", "nosniff")
    }

    /// Error cuyo mensaje es la reason phrase del código
    pub fn status_error(status: StatusCode) -> Self {
        Self::error(status, status.reason_phrase())
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Status line, headers, línea vacía y body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        result.extend_from_slice(format!("HTTP/1.0 {}\r\n", self.status).as_bytes());

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Copia de la respuesta sin body (para HEAD); conserva `Content-Length`
    pub fn without_body(&self) -> Self {
        Self {
            status: self.status,
            headers: self.headers.clone(),
            body: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_with_body_sets_content_length() {
        let response = Response::new(StatusCode::Ok).with_body("Hello World");

        assert_eq!(response.body(), b"Hello World");
        assert_eq!(response.header("Content-Length"), Some("11"));
    }

    #[test]
    fn test_text_response() {
        let response = Response::text(StatusCode::Ok, "17");

        assert_eq!(response.header("Content-Type"), Some(TEXT_PLAIN));
        assert_eq!(response.body(), b"17");
    }

    #[test]
    fn test_json_response() {
        let response = Response::json(r#"{"total":0,"average":0}"#);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_error_response() {
        let response = Response::error(StatusCode::BadRequest, "Bad Request. Unable to read job ID");

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert_eq!(response.body(), b"Bad Request. Unable to read job ID\n");
        assert_eq!(response.header("X-Content-Type-Options"), Some("nosniff"));
    }

    #[test]
    fn test_status_error_uses_reason_phrase() {
        let response = Response::status_error(StatusCode::MethodNotAllowed);
        assert_eq!(response.body(), b"Method Not Allowed\n");
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::text(StatusCode::Ok, "Test");

        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain; charset=utf-8\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(text.ends_with("\r\n\r\nTest"));
    }

    #[test]
    fn test_without_body_keeps_length() {
        let response = Response::text(StatusCode::Ok, "abc").without_body();

        assert!(response.body().is_empty());
        assert_eq!(response.header("Content-Length"), Some("3"));
        assert!(response.to_bytes().ends_with(b"\r\n\r\n"));
    }
}
