//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser HTTP/1.0 (acepta también HTTP/1.1) escrito a mano.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /hash HTTP/1.0\r\n
//! Content-Type: application/x-www-form-urlencoded\r\n
//! Content-Length: 24\r\n
//! \r\n
//! password=puppymonkeybaby
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.0`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: formulario urlencoded en los POST

use std::collections::HashMap;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Métodos HTTP
///
/// Cualquier token de método válido se acepta; los que no conoce el
/// servidor quedan en `Other` y el handler responde 405.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// HEAD - Como GET pero solo retorna headers
    HEAD,

    /// POST - Enviar datos a un recurso
    POST,

    PUT,
    DELETE,

    /// PATCH, OPTIONS, etc.
    Other(String),
}

impl Method {
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            _ if is_token(s) => Ok(Method::Other(s.to_string())),
            _ => Err(ParseError::InvalidMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::Other(m) => m,
        }
    }
}

/// `token` de RFC 7230: caracteres visibles sin separadores
fn is_token(s: &str) -> bool {
    const SYMBOLS: &[u8] = b"!#$%&'*+-.^_`|~";
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || SYMBOLS.contains(&b))
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,

    /// Path de la petición sin query (ej: "/hash/1")
    path: String,

    /// Query parameters decodificados
    query_params: HashMap<String, String>,

    /// Headers HTTP, con el nombre en minúsculas
    headers: HashMap<String, String>,

    version: String,

    /// Body crudo (solo POST)
    body: Vec<u8>,

    /// Campos del body `application/x-www-form-urlencoded`
    form_params: HashMap<String, String>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request incompleto o truncado
    IncompleteRequest,

    /// Formato inválido de la request line
    InvalidRequestLine,

    /// El método no es un token HTTP válido
    InvalidMethod(String),

    /// Versión HTTP incorrecta
    InvalidHttpVersion(String),

    /// Header malformado
    InvalidHeader(String),

    /// Request vacío
    EmptyRequest,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncompleteRequest => write!(f, "Incomplete HTTP request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::InvalidMethod(m) => write!(f, "Invalid HTTP method: {}", m),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
            ParseError::EmptyRequest => write!(f, "Empty request"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Posición donde termina el bloque de headers (incluyendo `\r\n\r\n`)
fn header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
        .map(|pos| pos + HEADER_TERMINATOR.len())
}

/// Largo total esperado del request, si los headers ya llegaron completos
///
/// Lo usa el servidor para saber cuándo dejar de leer del socket:
/// headers + `Content-Length` bytes de body.
pub fn expected_len(buffer: &[u8]) -> Option<usize> {
    let end = header_end(buffer)?;
    let head = String::from_utf8_lossy(&buffer[..end]);

    let content_length = head
        .split("\r\n")
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    Some(end + content_length)
}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use hash_server::http::Request;
    ///
    /// let raw = b"GET /hash/10 HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/hash/10");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::EmptyRequest);
        }

        // Sin línea vacía tomamos todo como headers (requests viejos sin \r\n final)
        let (head_bytes, body_bytes) = match header_end(buffer) {
            Some(end) => (&buffer[..end], &buffer[end..]),
            None => (buffer, &[][..]),
        };

        let head = std::str::from_utf8(head_bytes).map_err(|_| ParseError::InvalidRequestLine)?;
        let mut lines = head.split("\r\n");

        let request_line = lines.next().ok_or(ParseError::IncompleteRequest)?;
        let (method, path, query_params, version) = Self::parse_request_line(request_line)?;

        let headers = Self::parse_headers(lines)?;

        let body = if method == Method::POST {
            body_bytes.to_vec()
        } else {
            Vec::new()
        };

        let is_form = headers
            .get("content-type")
            .map(|ct| ct.to_ascii_lowercase().starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(true);

        let form_params = if method == Method::POST && is_form {
            Self::parse_query_string(&String::from_utf8_lossy(&body))
        } else {
            HashMap::new()
        };

        Ok(Request {
            method,
            path,
            query_params,
            headers,
            version,
            body,
            form_params,
        })
    }

    /// Parsea la request line. Formato: `GET /path?query HTTP/1.0`
    fn parse_request_line(
        line: &str,
    ) -> Result<(Method, String, HashMap<String, String>, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_str(parts[0])?;
        let (path, query_params) = Self::parse_path_and_query(parts[1]);

        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok((method, path, query_params, version))
    }

    /// Ejemplo: "/hash?password=abc" → ("/hash", {"password": "abc"})
    fn parse_path_and_query(path_with_query: &str) -> (String, HashMap<String, String>) {
        match path_with_query.split_once('?') {
            Some((path, query)) => (path.to_string(), Self::parse_query_string(query)),
            None => (path_with_query.to_string(), HashMap::new()),
        }
    }

    /// Parsea `a=1&b=2`. Sirve tanto para la query como para formularios.
    fn parse_query_string(query: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();

        for param in query.split('&') {
            if param.is_empty() {
                continue;
            }

            match param.split_once('=') {
                Some((key, value)) => {
                    // Como en los formularios HTML, gana el primer valor
                    params
                        .entry(Self::url_decode(key))
                        .or_insert_with(|| Self::url_decode(value));
                }
                None => {
                    params.entry(Self::url_decode(param)).or_insert_with(String::new);
                }
            }
        }

        params
    }

    /// Decodifica `%XX` y `+` (espacio). Secuencias `%` inválidas se dejan tal cual.
    fn url_decode(s: &str) -> String {
        let bytes = s.as_bytes();
        let mut decoded = Vec::with_capacity(bytes.len());
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'+' => decoded.push(b' '),
                b'%' if i + 2 < bytes.len() => {
                    let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                    match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                        Some(byte) => {
                            decoded.push(byte);
                            i += 2;
                        }
                        None => decoded.push(b'%'),
                    }
                }
                byte => decoded.push(byte),
            }
            i += 1;
        }

        String::from_utf8_lossy(&decoded).into_owned()
    }

    /// Parsea los headers hasta la línea vacía. Formato: "Name: Value"
    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
                }
                None => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Obtiene un query parameter específico
    ///
    /// # Ejemplo
    /// ```
    /// use hash_server::http::Request;
    ///
    /// let raw = b"GET /test?num=42 HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.query_param("num"), Some("42"));
    /// assert_eq!(request.query_param("missing"), None);
    /// ```
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    /// Obtiene un header (el nombre no distingue mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(|s| s.as_str())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Valor de un campo de formulario
    ///
    /// Busca primero en el body urlencoded y después en la query string.
    ///
    /// # Ejemplo
    /// ```
    /// use hash_server::http::Request;
    ///
    /// let raw = b"POST /hash HTTP/1.0\r\nContent-Length: 16\r\n\r\npassword=a%26b+c";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.form_value("password"), Some("a&b c"));
    /// ```
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form_params
            .get(name)
            .or_else(|| self.query_params.get(name))
            .map(|s| s.as_str())
    }
}
