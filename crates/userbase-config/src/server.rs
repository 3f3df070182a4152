use std::net::{SocketAddr, ToSocketAddrs};

use anyhow::{Context, bail};

use crate::env_or;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env_or("SERVER_HOST", "0.0.0.0".to_string())?,
            port: env_or("SERVER_PORT", 3000)?,
        })
    }

    /// Resolves `host:port`. The host may be an IP literal or a name such as
    /// `localhost`.
    pub fn socket_addrs(&self) -> anyhow::Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))?
            .collect();
        if addrs.is_empty() {
            bail!("Bind address {}:{} resolved to nothing", self.host, self.port);
        }
        Ok(addrs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}
