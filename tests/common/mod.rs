// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common fixtures for integration tests

use external_dns_operator::crd::ExternalDNS;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;

/// Parse an `ExternalDNS` manifest
pub fn external_dns(yaml: &str) -> ExternalDNS {
    serde_yaml::from_str(yaml).expect("valid ExternalDNS manifest")
}

/// Build a secret in `namespace` holding the given plain-text entries
pub fn secret(namespace: &str, name: &str, entries: &[(&str, &str)]) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(
            entries
                .iter()
                .map(|(key, value)| ((*key).to_string(), ByteString(value.as_bytes().to_vec())))
                .collect(),
        ),
        ..Default::default()
    }
}

/// Read one key of a secret as UTF-8
pub fn value(secret: &Secret, key: &str) -> Option<String> {
    let data = secret.data.as_ref()?;
    let bytes = data.get(key)?;
    Some(String::from_utf8_lossy(&bytes.0).into_owned())
}
