//! Per-URL probe outcome.

/// Classified outcome of probing one URL. Created once per probe, never
/// mutated; `error` is populated exactly when no status was obtained.
#[derive(Debug, Clone)]
pub struct LinkCheckResult {
    /// The probed URL, verbatim
    pub url: String,
    /// Final HTTP status (from the GET fallback when one was made)
    pub status: Option<u16>,
    /// Status is 301, 302, 307, or 308
    pub is_redirect: bool,
    /// `Location` header value when redirecting
    pub redirect_location: Option<String>,
    /// Status is 404
    pub is_broken: bool,
    /// Probe failure description when no status was obtained
    pub error: Option<String>,
    /// Wall-clock time across both attempts, milliseconds
    pub elapsed_ms: u64,
}

impl LinkCheckResult {
    /// Result for a probe that produced no response.
    pub fn failed(url: String, error: String, elapsed_ms: u64) -> Self {
        Self {
            url,
            status: None,
            is_redirect: false,
            redirect_location: None,
            is_broken: false,
            error: Some(error),
            elapsed_ms,
        }
    }

    /// Healthy: got a status that is neither a redirect nor a 404.
    pub fn is_ok(&self) -> bool {
        self.status.is_some() && !self.is_redirect && !self.is_broken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_shape() {
        let res = LinkCheckResult::failed("https://ex.com".to_string(), "Timeout".to_string(), 42);
        assert!(res.status.is_none());
        assert!(!res.is_redirect);
        assert!(!res.is_broken);
        assert_eq!(res.error.as_deref(), Some("Timeout"));
        assert_eq!(res.elapsed_ms, 42);
        assert!(!res.is_ok());
    }
}
