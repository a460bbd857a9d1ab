use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING};
use reqwest::Client;

pub const DEFAULT_USER_AGENT: &str = concat!("modfetch/", env!("CARGO_PKG_VERSION"));

/// Shared client for registry calls and artifact transfers.
///
/// No timeout is configured: a stalled registry blocks the caller.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));
    default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .user_agent(user_agent)
        .default_headers(default_headers)
        .build()
}
