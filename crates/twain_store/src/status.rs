//! HTTP outcome classification shared by the Google REST clients.

use twain_error::StoreErrorKind;

/// Map a non-success response status onto a store error kind.
pub(crate) fn status_error(status: u16, body: &str) -> StoreErrorKind {
    let detail: String = body.chars().take(300).collect();
    match status {
        401 | 403 => StoreErrorKind::PermissionDenied(detail),
        404 => StoreErrorKind::NotFound(detail),
        429 | 503 => StoreErrorKind::Unavailable(detail),
        408 | 504 => StoreErrorKind::DeadlineExceeded(detail),
        _ => StoreErrorKind::Backend(format!("HTTP {}: {}", status, detail)),
    }
}

/// Map a transport failure onto a store error kind.
pub(crate) fn transport_error(err: &reqwest::Error) -> StoreErrorKind {
    if err.is_timeout() {
        StoreErrorKind::DeadlineExceeded(err.to_string())
    } else if err.is_connect() {
        StoreErrorKind::Unavailable(err.to_string())
    } else {
        StoreErrorKind::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_matches_classification_codes() {
        assert_eq!(status_error(401, "").code(), "permission-denied");
        assert_eq!(status_error(403, "").code(), "permission-denied");
        assert_eq!(status_error(404, "").code(), "not-found");
        assert_eq!(status_error(429, "").code(), "unavailable");
        assert_eq!(status_error(503, "").code(), "unavailable");
        assert_eq!(status_error(504, "").code(), "deadline-exceeded");
        assert_eq!(status_error(408, "").code(), "deadline-exceeded");
        assert_eq!(status_error(500, "boom").code(), "unknown");
    }
}
