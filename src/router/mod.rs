//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea paths HTTP a handlers.
//!
//! ```text
//! Request → Router → Handler(&Request, &JobCoordinator) → Response
//! ```
//!
//! Hay rutas exactas (`/stats`) y rutas por prefijo (`/hash` atiende
//! también `/hash/{id}`). Si ninguna coincide se responde 404.

use crate::http::{Request, Response, StatusCode};
use crate::jobs::JobCoordinator;

/// Un handler recibe el request y el coordinador compartido
pub type Handler = fn(&Request, &JobCoordinator) -> Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteKind {
    Exact,
    Prefix,
}

/// Router que mapea paths a handlers
pub struct Router {
    routes: Vec<(String, RouteKind, Handler)>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra una ruta exacta
    pub fn register(&mut self, path: &str, handler: Handler) {
        self.routes.push((path.to_string(), RouteKind::Exact, handler));
    }

    /// Registra una ruta que atiende `prefix` y todo lo que cuelga de `prefix/`
    pub fn register_prefix(&mut self, prefix: &str, handler: Handler) {
        self.routes.push((prefix.trim_end_matches('/').to_string(), RouteKind::Prefix, handler));
    }

    fn matches(route_path: &str, kind: RouteKind, path: &str) -> bool {
        match kind {
            RouteKind::Exact => route_path == path,
            RouteKind::Prefix => {
                path == route_path
                    || path
                        .strip_prefix(route_path)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }

    /// Encuentra y ejecuta el handler del request; 404 si no hay ruta
    pub fn route(&self, request: &Request, coordinator: &JobCoordinator) -> Response {
        let path = request.path();

        let mut response = self
            .routes
            .iter()
            .find(|(route_path, kind, _)| Self::matches(route_path, *kind, path))
            .map(|(_, _, handler)| handler(request, coordinator))
            .unwrap_or_else(|| Response::status_error(StatusCode::NotFound));

        self.add_common_headers(&mut response);
        response
    }

    /// Headers comunes a todas las respuestas
    fn add_common_headers(&self, response: &mut Response) {
        response.add_header("Server", "hash-server/0.1");
        response.add_header("Connection", "close");
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::JobStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn ok_handler(_req: &Request, _c: &JobCoordinator) -> Response {
        Response::text(StatusCode::Ok, "ok")
    }

    fn coordinator() -> JobCoordinator {
        JobCoordinator::new(Arc::new(JobStore::new()), Duration::from_millis(1))
    }

    fn get(path: &str) -> Request {
        Request::parse(format!("GET {} HTTP/1.0\r\n\r\n", path).as_bytes()).unwrap()
    }

    #[test]
    fn test_router_creation() {
        let router = Router::new();
        assert_eq!(router.routes.len(), 0);
    }

    #[test]
    fn test_exact_route() {
        let mut router = Router::new();
        router.register("/stats", ok_handler);
        let c = coordinator();

        assert_eq!(router.route(&get("/stats"), &c).status(), StatusCode::Ok);
        assert_eq!(router.route(&get("/stats/x"), &c).status(), StatusCode::NotFound);
    }

    #[test]
    fn test_prefix_route() {
        let mut router = Router::new();
        router.register_prefix("/hash", ok_handler);
        let c = coordinator();

        assert_eq!(router.route(&get("/hash"), &c).status(), StatusCode::Ok);
        assert_eq!(router.route(&get("/hash/12"), &c).status(), StatusCode::Ok);
        assert_eq!(router.route(&get("/hashes"), &c).status(), StatusCode::NotFound);
    }

    #[test]
    fn test_route_not_found_has_common_headers() {
        let router = Router::new();
        let response = router.route(&get("/nonexistent"), &coordinator());

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.body(), b"Not Found\n");
        assert_eq!(response.header("Connection"), Some("close"));
    }
}
