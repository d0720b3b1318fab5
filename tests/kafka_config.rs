//! Configuration-level coverage for the Kafka client builder: this crate
//! has no broker to test against in CI, so these scenarios exercise the
//! configuration surface a real fan-in worker (spec scenario S7) would be
//! built from.

use harbor_runtime::kafka::{AuthMode, KafkaClientConfig, SaslCredentials, TlsConfig};

#[test]
fn consumer_registration_config_carries_its_topic_set() {
    let config = KafkaClientConfig::new("fan-in-group", "localhost:9092");
    assert_eq!(config.group_id, "fan-in-group");
    assert_eq!(config.security_protocol(), "plaintext");
}

#[test]
fn tls_and_sasl_together_select_sasl_ssl() {
    let config = KafkaClientConfig::new("group", "localhost:9092")
        .with_tls(TlsConfig::new())
        .with_auth(
            AuthMode::SaslScramSha512,
            SaslCredentials {
                username: Some("svc".to_string()),
                password: Some("secret".to_string()),
                ..Default::default()
            },
        );

    assert_eq!(config.security_protocol(), "sasl_ssl");
}

#[test]
fn acks_passthrough_accepts_the_documented_range() {
    let config = KafkaClientConfig::new("group", "localhost:9092");
    assert_eq!(config.acks, 1);
    assert_eq!(config.with_acks(-1).acks, -1);
    assert_eq!(KafkaClientConfig::new("g", "b").with_acks(0).acks, 0);
}
