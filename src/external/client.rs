use std::sync::LazyLock;
use std::time::Duration;

/// Default request timeout for remote notification services
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Global HTTP client shared by the remote notification backends
///
/// Initialized lazily on first access, so runs that only use local
/// backends never build a TLS stack.
///
/// # Features
/// - **Timeouts**: 30s request timeout, 10s connect timeout
/// - **User-Agent**: `tyme/<version>`
/// - **Security**: Uses Rustls for TLS (no OpenSSL dependency)
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent())
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default HTTP client");
            reqwest::Client::new()
        })
});

/// User-Agent sent with every request
pub fn user_agent() -> String {
    format!("tyme/{}", crate::pkg_version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        // Access the client to ensure it initializes without panicking
        let _ = &*HTTP_CLIENT;
    }

    #[test]
    fn test_user_agent_carries_version() {
        assert_eq!(user_agent(), format!("tyme/{}", env!("CARGO_PKG_VERSION")));
    }
}
