//! Password digest computation

use crate::domain::user::DigestScheme;

/// Lowercase hex MD5 of the input
pub fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// Store a plaintext password the way the scheme asks.
///
/// `username` must already be normalised; combined digests are salted with it.
pub fn apply_digest_scheme(scheme: DigestScheme, username: &str, password: &str) -> String {
    match scheme.prefix() {
        None => password.to_string(),
        Some(prefix) if scheme.is_salted_with_username() => {
            format!("{}{}", prefix, md5_hex(&format!("{}{}", username, password)))
        }
        Some(prefix) => format!("{}{}", prefix, md5_hex(password)),
    }
}
