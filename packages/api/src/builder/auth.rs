//! Credentials for proxy authentication

use proxytunnel_client::ProxyCredentials;

use crate::builder::core::TunnelBuilder;

impl TunnelBuilder {
    /// Set proxy credentials
    ///
    /// Sent as Basic `Proxy-Authorization` to HTTP proxies and offered as
    /// username/password authentication to SOCKS5 proxies. SOCKS4 proxies
    /// receive only the username, as the user id.
    ///
    /// # Examples
    /// ```no_run
    /// use proxytunnel::Tunnel;
    ///
    /// let builder = Tunnel::http("proxy.corp", 3128).credentials("alice", "secret");
    /// ```
    #[must_use]
    pub fn credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = ProxyCredentials::new(username, password);
        self
    }

    /// Set the SOCKS4 user id
    #[must_use]
    pub fn user_id(mut self, user_id: &str) -> Self {
        self.credentials = ProxyCredentials::new(user_id, "");
        self
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_present()
    }
}
