//! Request signing and URL resolution.
//!
//! The checksum binds a token to one resource path:
//! `hex(sha256(token + "/" + path))`, where `path` may be given with or
//! without its leading slash.

use sha2::{Digest, Sha256};
use url::Url;

use crate::client::errors::ClientError;

const SEPARATOR: char = '/';

/// Compute the `X-Request-Checksum` value for `path` signed with `token`.
pub fn compute_checksum(token: &str, path: &str) -> Result<String, ClientError> {
    if token.is_empty() {
        return Err(ClientError::Precondition("auth token not yet set"));
    }
    if path.is_empty() {
        return Err(ClientError::Precondition("request path must not be empty"));
    }

    let joined = join_path(token, path);
    Ok(hex::encode(Sha256::digest(joined.as_bytes())))
}

/// Resolve `path` against the service base url. `auth` and `/auth` land on the same resource.
pub fn request_url(base: &Url, path: &str) -> Result<Url, ClientError> {
    Ok(base.join(path)?)
}

// exactly one separator between the two parts
fn join_path(head: &str, tail: &str) -> String {
    format!(
        "{}{}{}",
        head.trim_end_matches(SEPARATOR),
        SEPARATOR,
        tail.trim_start_matches(SEPARATOR)
    )
}
