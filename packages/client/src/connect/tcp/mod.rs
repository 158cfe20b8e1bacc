//! TCP transport primitives
//!
//! Protocol-agnostic pieces shared by every tunnel client: resolving and
//! dialing the proxy under a deadline, socket setup, and the exact-length
//! and delimiter-bounded reads the handshakes are built from.

pub mod basic_connection;
pub mod dns_resolution;
pub mod port_probe;
pub mod socket_config;
pub mod stream_io;

pub use basic_connection::{connect_to_address_list, connect_with_timeout};
pub use dns_resolution::resolve_host_sync;
pub use port_probe::{LoopbackPortValidator, PortValidator};
pub use socket_config::configure_tcp_socket;
pub use stream_io::{read_array, read_exact, read_until};
