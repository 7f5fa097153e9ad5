use serde_json::{Value, json};

use super::invoker::RemoteInvoker;
use crate::error::Result;

/// How to reach the daemon. The backend validates the settings, pings the
/// daemon, and keeps the connection for all subsequent commands.
#[derive(Clone, Debug)]
pub enum ConnectionSettings {
    Socket {
        path: String,
        timeout_secs: u64,
    },
    Http {
        addr: String,
        timeout_secs: u64,
    },
    Ssl {
        addr: String,
        key_path: String,
        cert_path: String,
        ca_path: String,
        timeout_secs: u64,
    },
}

impl ConnectionSettings {
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Socket { .. } => "create_docker_socket_connection",
            Self::Http { .. } => "create_docker_http_connection",
            Self::Ssl { .. } => "create_docker_ssl_connection",
        }
    }

    #[must_use]
    pub fn args(&self) -> Value {
        match self {
            Self::Socket { path, timeout_secs } => json!({
                "socketPath": path,
                "timeout": timeout_secs,
            }),
            Self::Http { addr, timeout_secs } => json!({
                "addr": addr,
                "timeout": timeout_secs,
            }),
            Self::Ssl {
                addr,
                key_path,
                cert_path,
                ca_path,
                timeout_secs,
            } => json!({
                "addr": addr,
                "sslKey": key_path,
                "sslCert": cert_path,
                "sslCa": ca_path,
                "timeout": timeout_secs,
            }),
        }
    }
}

/// Establish the daemon connection and return the ping reply.
///
/// # Errors
///
/// Will return `Err` if the backend call fails or the reply is not the ping
/// string
pub async fn connect(invoker: &dyn RemoteInvoker, settings: &ConnectionSettings) -> Result<String> {
    let raw = invoker.invoke(settings.command(), settings.args()).await?;
    Ok(serde_json::from_value(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_settings_map_to_backend_args() {
        let settings = ConnectionSettings::Socket {
            path: "/var/run/docker.sock".to_string(),
            timeout_secs: 120,
        };

        assert_eq!(settings.command(), "create_docker_socket_connection");
        assert_eq!(
            settings.args(),
            json!({"socketPath": "/var/run/docker.sock", "timeout": 120})
        );
    }

    #[test]
    fn test_ssl_settings_carry_all_paths() {
        let settings = ConnectionSettings::Ssl {
            addr: "tcp://10.0.0.2:2376".to_string(),
            key_path: "/certs/key.pem".to_string(),
            cert_path: "/certs/cert.pem".to_string(),
            ca_path: "/certs/ca.pem".to_string(),
            timeout_secs: 30,
        };

        let args = settings.args();
        assert_eq!(args["sslKey"], "/certs/key.pem");
        assert_eq!(args["sslCert"], "/certs/cert.pem");
        assert_eq!(args["sslCa"], "/certs/ca.pem");
    }
}
