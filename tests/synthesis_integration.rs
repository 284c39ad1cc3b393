// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end tests of the reconciliation decisions a driver makes for an `ExternalDNS`:
//! resolve the source secret, synthesize the destination secret, decide whether to
//! write it, and compile the operand's domain filter flags.
//!
//! Run with: cargo test --test synthesis_integration

mod common;

use common::{external_dns, secret, value};
use external_dns_operator::config::{credentials_source, destination_secret_for, OperatorConfig};
use external_dns_operator::credentials_secret::{
    credentials_secret_needs_update, desired_credentials_secret, updated_credentials_secret,
    AzureConfig, SynthesisMode,
};
use external_dns_operator::domain_filters::compile_domain_filters;
use external_dns_operator::errors::{CredentialsError, SynthesisError};

const AZURE_ON_OPENSHIFT: &str = r"
apiVersion: externaldns.olm.openshift.io/v1beta1
kind: ExternalDNS
metadata:
  name: azure-public
  uid: 11111111-2222-3333-4444-555555555555
spec:
  provider:
    type: Azure
  domains:
  - matchType: Exact
    name: example.com
    filterType: Include
  - matchType: Exact
    name: staging.example.com
    filterType: Exclude
";

const INFOBLOX: &str = r"
apiVersion: externaldns.olm.openshift.io/v1beta1
kind: ExternalDNS
metadata:
  name: infoblox
spec:
  provider:
    type: Infoblox
    infoblox:
      credentials:
        name: infoblox-credentials
      gridHost: grid.example.com
      wapiPort: 443
      wapiVersion: 2.12.2
  domains:
  - matchType: Regex
    pattern: '(.*)\.abc\.com'
    filterType: Include
  - matchType: Regex
    pattern: '(.*]\.def\.com'
    filterType: Include
";

fn openshift() -> OperatorConfig {
    OperatorConfig {
        is_openshift: true,
        ..Default::default()
    }
}

#[test]
fn test_azure_platform_credentials_reconcile() {
    let config = openshift();
    let extdns = external_dns(AZURE_ON_OPENSHIFT);

    let resolved = credentials_source(&extdns, &config).expect("platform secret applies");
    assert_eq!(resolved.mode, SynthesisMode::ManagedIdentity);
    assert_eq!(resolved.secret.name, "externaldns-cloud-credentials");

    let source = secret(
        &resolved.secret.namespace,
        &resolved.secret.name,
        &[
            ("azure_client_id", "client"),
            ("azure_client_secret", "s3cr3t"),
            ("azure_resourcegroup", "dns"),
            ("azure_subscription_id", "sub"),
            ("azure_tenant_id", "tenant"),
        ],
    );
    let destination = destination_secret_for(&config, &extdns);
    let desired = desired_credentials_secret(&source, &destination, &extdns, resolved.mode)
        .expect("synthesis succeeds");

    let azure_json = value(&desired, "azure.json").expect("azure.json is written");
    let azure: AzureConfig = serde_json::from_str(&azure_json).unwrap();
    assert_eq!(azure.aad_client_id, "client");
    assert_eq!(azure.aad_client_secret, "s3cr3t");
    assert_eq!(azure.resource_group, "dns");
    assert_eq!(azure.subscription_id, "sub");
    assert_eq!(azure.tenant_id, "tenant");

    // First reconcile: nothing written yet, the driver creates `desired`.
    // Second reconcile: the stored object matches, no write.
    let mut stored = desired.clone();
    stored.metadata.resource_version = Some("1".to_string());
    assert!(!credentials_secret_needs_update(&stored, &desired));

    // Credentials rotated by the platform: the driver writes the updated object.
    let rotated = secret(
        &resolved.secret.namespace,
        &resolved.secret.name,
        &[
            ("azure_client_id", "client"),
            ("azure_client_secret", "rotated"),
            ("azure_resourcegroup", "dns"),
            ("azure_subscription_id", "sub"),
            ("azure_tenant_id", "tenant"),
        ],
    );
    let desired = desired_credentials_secret(&rotated, &destination, &extdns, resolved.mode)
        .expect("synthesis succeeds");
    assert!(credentials_secret_needs_update(&stored, &desired));

    let updated = updated_credentials_secret(&stored, &desired);
    assert_eq!(updated.metadata.resource_version.as_deref(), Some("1"));
    assert!(value(&updated, "azure.json").unwrap().contains("rotated"));

    let flags = compile_domain_filters(&extdns.spec.domains).unwrap();
    assert_eq!(
        flags,
        vec![
            "--domain-filter=example.com",
            "--exclude-domains=staging.example.com"
        ]
    );
}

#[test]
fn test_infoblox_user_credentials_and_bad_filter() {
    let config = OperatorConfig::default();
    let extdns = external_dns(INFOBLOX);

    let resolved = credentials_source(&extdns, &config).expect("user secret applies");
    assert_eq!(resolved.mode, SynthesisMode::UserSecret);
    assert_eq!(resolved.secret.namespace, "external-dns-operator");
    assert_eq!(resolved.secret.name, "infoblox-credentials");

    let destination = destination_secret_for(&config, &extdns);

    let missing_password = secret(
        "external-dns-operator",
        "infoblox-credentials",
        &[("EXTERNAL_DNS_INFOBLOX_WAPI_USERNAME", "admin")],
    );
    let err = desired_credentials_secret(&missing_password, &destination, &extdns, resolved.mode)
        .unwrap_err();
    assert!(matches!(err, CredentialsError::InvalidCredentials { .. }));
    assert_eq!(
        SynthesisError::from(err).status_reason(),
        "InvalidCredentials"
    );

    let complete = secret(
        "external-dns-operator",
        "infoblox-credentials",
        &[
            ("EXTERNAL_DNS_INFOBLOX_WAPI_USERNAME", "admin"),
            ("EXTERNAL_DNS_INFOBLOX_WAPI_PASSWORD", "infoblox"),
        ],
    );
    let desired = desired_credentials_secret(&complete, &destination, &extdns, resolved.mode)
        .expect("synthesis succeeds");
    assert_eq!(
        value(&desired, "EXTERNAL_DNS_INFOBLOX_WAPI_PASSWORD").as_deref(),
        Some("infoblox")
    );

    let err = compile_domain_filters(&extdns.spec.domains).unwrap_err();
    assert!(err.to_string().contains(r"input pattern (.*]\.def\.com is invalid"));
    assert_eq!(
        SynthesisError::from(err).status_reason(),
        "InvalidDomainPattern"
    );
}
