//! Default values shared by settings and clients

use std::time::Duration;

/// Timeout applied to every connect, read and write of a handshake.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Upper bound accepted for a handshake timeout.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(3600);

pub const DEFAULT_HTTP_PROXY_PORT: u16 = 8080;
pub const DEFAULT_SOCKS_PROXY_PORT: u16 = 1080;

/// Byte budget for an HTTP CONNECT response header block.
pub const MAX_HTTP_RESPONSE_BYTES: usize = 32 * 1024;

pub(crate) fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
