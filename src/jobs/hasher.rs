//! # Primitiva de Hashing
//! src/jobs/hasher.rs
//!
//! SHA-512 sobre los bytes UTF-8 del password, codificado en base64
//! estándar con padding (88 caracteres para un digest de 64 bytes).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha512};

/// Calcula el hash de un password
///
/// # Ejemplo
/// ```
/// use hash_server::jobs::generate_hash;
///
/// let hash = generate_hash("puppymonkeybaby");
/// assert_eq!(hash.len(), 88);
/// ```
pub fn generate_hash(password: &str) -> String {
    let digest = Sha512::digest(password.as_bytes());
    STANDARD.encode(digest)
}
