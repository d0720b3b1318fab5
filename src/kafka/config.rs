//! # Kafka Client Configuration
//!
//! Configuration shared by the producer and every consumer registration:
//! bootstrap servers, group id, offset/commit policy, and the
//! authentication/transport-security knobs from the connection profile.

use rdkafka::config::RDKafkaLogLevel;
use rdkafka::ClientConfig;

/// `auto.offset.reset` policy for a consumer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetReset {
    Earliest,
    Latest,
    None,
}

impl OffsetReset {
    fn as_str(self) -> &'static str {
        match self {
            OffsetReset::Earliest => "earliest",
            OffsetReset::Latest => "latest",
            OffsetReset::None => "none",
        }
    }
}

/// SASL mechanism selection. `None` means no SASL layer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    None,
    SaslPlain,
    SaslScramSha256,
    SaslScramSha512,
    SaslGssapi,
    SaslOauthBearer,
}

impl AuthMode {
    fn sasl_mechanism(self) -> Option<&'static str> {
        match self {
            AuthMode::None => None,
            AuthMode::SaslPlain => Some("PLAIN"),
            AuthMode::SaslScramSha256 => Some("SCRAM-SHA-256"),
            AuthMode::SaslScramSha512 => Some("SCRAM-SHA-512"),
            AuthMode::SaslGssapi => Some("GSSAPI"),
            AuthMode::SaslOauthBearer => Some("OAUTHBEARER"),
        }
    }

    fn uses_username_password(self) -> bool {
        matches!(
            self,
            AuthMode::SaslPlain | AuthMode::SaslScramSha256 | AuthMode::SaslScramSha512
        )
    }
}

/// Transport security for the broker connection: off, or TLS with the
/// usual CA/client-cert/client-key triple and an optional key password.
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    pub ca_location: Option<String>,
    pub certificate_location: Option<String>,
    pub key_location: Option<String>,
    pub key_password: Option<String>,
}

impl TlsConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// SASL credentials, only consulted when `auth` selects a SASL mechanism.
#[derive(Debug, Clone, Default)]
pub struct SaslCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub kerberos_service_name: Option<String>,
    pub kerberos_principal: Option<String>,
    pub kerberos_keytab: Option<String>,
}

/// Full client configuration for a producer or a consumer registration.
#[derive(Debug, Clone)]
pub struct KafkaClientConfig {
    pub bootstrap_servers: String,
    pub group_id: String,
    pub auto_offset_reset: OffsetReset,
    pub enable_auto_commit: bool,
    pub auto_commit_interval_ms: u32,
    pub session_timeout_ms: u32,
    pub max_poll_interval_ms: u32,
    pub auth: AuthMode,
    pub tls_enabled: bool,
    pub tls: TlsConfig,
    pub sasl: SaslCredentials,
    pub log_level: RDKafkaLogLevel,
    /// `acks` passed straight to the producer as a signed integer string: -1, 0, or 1.
    pub acks: i8,
}

impl KafkaClientConfig {
    pub fn new(group_id: impl Into<String>, bootstrap_servers: impl Into<String>) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.into(),
            group_id: group_id.into(),
            auto_offset_reset: OffsetReset::Latest,
            enable_auto_commit: true,
            auto_commit_interval_ms: 5000,
            session_timeout_ms: 30_000,
            max_poll_interval_ms: 300_000,
            auth: AuthMode::None,
            tls_enabled: false,
            tls: TlsConfig::default(),
            sasl: SaslCredentials::default(),
            log_level: RDKafkaLogLevel::Info,
            acks: 1,
        }
    }

    pub fn with_offset_reset(mut self, reset: OffsetReset) -> Self {
        self.auto_offset_reset = reset;
        self
    }

    pub fn with_auto_commit(mut self, enabled: bool, interval_ms: u32) -> Self {
        self.enable_auto_commit = enabled;
        self.auto_commit_interval_ms = interval_ms;
        self
    }

    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls_enabled = true;
        self.tls = tls;
        self
    }

    pub fn with_auth(mut self, auth: AuthMode, credentials: SaslCredentials) -> Self {
        self.auth = auth;
        self.sasl = credentials;
        self
    }

    pub fn with_acks(mut self, acks: i8) -> Self {
        self.acks = acks;
        self
    }

    /// Derives `security.protocol` from the TLS/auth selection: off+no-auth
    /// -> plaintext, TLS-only -> ssl, SASL-only -> sasl_plaintext, both -> sasl_ssl.
    pub fn security_protocol(&self) -> &'static str {
        match (self.tls_enabled, self.auth != AuthMode::None) {
            (false, false) => "plaintext",
            (true, false) => "ssl",
            (false, true) => "sasl_plaintext",
            (true, true) => "sasl_ssl",
        }
    }

    /// Builds an `rdkafka::ClientConfig` carrying bootstrap servers, group
    /// id, and auth/TLS settings derived from `security_protocol`. Consumer-
    /// and producer-specific settings are layered on by the caller.
    pub fn to_client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();

        config
            .set("bootstrap.servers", &self.bootstrap_servers)
            .set("group.id", &self.group_id)
            .set("security.protocol", self.security_protocol())
            .set_log_level(self.log_level);

        if self.tls_enabled {
            if let Some(ca) = &self.tls.ca_location {
                config.set("ssl.ca.location", ca);
            }
            if let Some(cert) = &self.tls.certificate_location {
                config.set("ssl.certificate.location", cert);
            }
            if let Some(key) = &self.tls.key_location {
                config.set("ssl.key.location", key);
            }
            if let Some(password) = &self.tls.key_password {
                config.set("ssl.key.password", password);
            }
        }

        if let Some(mechanism) = self.auth.sasl_mechanism() {
            config.set("sasl.mechanism", mechanism);

            if self.auth.uses_username_password() {
                if let Some(username) = &self.sasl.username {
                    config.set("sasl.username", username);
                }
                if let Some(password) = &self.sasl.password {
                    config.set("sasl.password", password);
                }
            }

            if self.auth == AuthMode::SaslGssapi {
                if let Some(service) = &self.sasl.kerberos_service_name {
                    config.set("sasl.kerberos.service.name", service);
                }
                if let Some(principal) = &self.sasl.kerberos_principal {
                    config.set("sasl.kerberos.principal", principal);
                }
                if let Some(keytab) = &self.sasl.kerberos_keytab {
                    config.set("sasl.kerberos.keytab", keytab);
                }
            }
        }

        config
    }

    pub(crate) fn apply_consumer_settings(&self, config: &mut ClientConfig) {
        config
            .set("auto.offset.reset", self.auto_offset_reset.as_str())
            .set(
                "enable.auto.commit",
                if self.enable_auto_commit {
                    "true"
                } else {
                    "false"
                },
            )
            .set(
                "auto.commit.interval.ms",
                self.auto_commit_interval_ms.to_string(),
            )
            .set("session.timeout.ms", self.session_timeout_ms.to_string())
            .set(
                "max.poll.interval.ms",
                self.max_poll_interval_ms.to_string(),
            )
            .set("enable.partition.eof", "true");
    }

    pub(crate) fn apply_producer_settings(&self, config: &mut ClientConfig) {
        config.set("acks", self.acks.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_protocol_derivation() {
        let plain = KafkaClientConfig::new("g", "localhost:9092");
        assert_eq!(plain.security_protocol(), "plaintext");

        let tls_only = plain.clone().with_tls(TlsConfig::new());
        assert_eq!(tls_only.security_protocol(), "ssl");

        let sasl_only =
            plain
                .clone()
                .with_auth(AuthMode::SaslPlain, SaslCredentials::default());
        assert_eq!(sasl_only.security_protocol(), "sasl_plaintext");

        let both = plain
            .with_tls(TlsConfig::new())
            .with_auth(AuthMode::SaslScramSha256, SaslCredentials::default());
        assert_eq!(both.security_protocol(), "sasl_ssl");
    }

    #[test]
    fn sasl_mechanism_strings() {
        assert_eq!(AuthMode::SaslPlain.sasl_mechanism(), Some("PLAIN"));
        assert_eq!(
            AuthMode::SaslScramSha256.sasl_mechanism(),
            Some("SCRAM-SHA-256")
        );
        assert_eq!(
            AuthMode::SaslScramSha512.sasl_mechanism(),
            Some("SCRAM-SHA-512")
        );
        assert_eq!(AuthMode::SaslGssapi.sasl_mechanism(), Some("GSSAPI"));
        assert_eq!(
            AuthMode::SaslOauthBearer.sasl_mechanism(),
            Some("OAUTHBEARER")
        );
        assert_eq!(AuthMode::None.sasl_mechanism(), None);
    }

    #[test]
    fn default_offsets_timeouts_and_acks() {
        let config = KafkaClientConfig::new("cluster", "localhost:9092");
        assert_eq!(config.auto_offset_reset, OffsetReset::Latest);
        assert!(config.enable_auto_commit);
        assert_eq!(config.session_timeout_ms, 30_000);
        assert_eq!(config.max_poll_interval_ms, 300_000);
        assert_eq!(config.acks, 1);

        let custom = config.with_acks(-1);
        assert_eq!(custom.acks, -1);
    }
}
