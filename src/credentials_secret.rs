// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Credentials secret synthesis.
//!
//! `external-dns` reads provider credentials from a secret in the operand namespace,
//! in the exact key layout its provider client expects. The operator builds that
//! destination secret from a source secret which is either:
//!
//! - **platform-issued** ([`SynthesisMode::ManagedIdentity`]): a fixed key vocabulary
//!   (`service_account.json`, `azure_client_id`, ...) remapped to provider-native keys, or
//! - **user-provided** ([`SynthesisMode::UserSecret`]): already provider-native, copied
//!   verbatim, supplemented with derived keys and validated for required keys.
//!
//! [`synthesize_credentials`] and [`needs_update`] are pure functions over
//! [`CredentialBundle`]s. The `*_secret` functions wrap them for Kubernetes `Secret`
//! objects; creating and updating those objects is left to the caller.

use crate::constants::{
    API_GROUP_VERSION, AWS_ACCESS_KEY_ID_KEY, AWS_CREDENTIALS_KEY, AWS_DEFAULT_PROFILE,
    AWS_SECRET_ACCESS_KEY_KEY, AZURE_CONFIG_KEY, BLUECAT_CONFIG_KEY, CLOUDFLARE_API_TOKEN_KEY,
    GCP_CREDENTIALS_KEY, INFOBLOX_WAPI_PASSWORD_KEY, INFOBLOX_WAPI_USERNAME_KEY,
    KIND_EXTERNAL_DNS, OPERATOR_NAME, PLATFORM_AZURE_CLIENT_ID_KEY,
    PLATFORM_AZURE_CLIENT_SECRET_KEY, PLATFORM_AZURE_RESOURCE_GROUP_KEY,
    PLATFORM_AZURE_SUBSCRIPTION_ID_KEY, PLATFORM_AZURE_TENANT_ID_KEY,
    PLATFORM_GCP_SERVICE_ACCOUNT_KEY,
};
use crate::config::NamespacedName;
use crate::crd::{ExternalDNS, ProviderType};
use crate::errors::CredentialsError;
use crate::labels::{
    APP_NAME_EXTERNAL_DNS, COMPONENT_CREDENTIALS, K8S_COMPONENT, K8S_INSTANCE, K8S_MANAGED_BY,
    K8S_NAME, OWNING_EXTERNAL_DNS_LABEL,
};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use k8s_openapi::ByteString;
use kube::ResourceExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Secret content: key to opaque bytes.
pub type CredentialBundle = BTreeMap<String, Vec<u8>>;

/// Key vocabulary of a source bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SynthesisMode {
    /// Source was issued by the platform credential mechanism and must be remapped.
    ManagedIdentity,
    /// Source was provided by the user in provider-native form.
    UserSecret,
}

/// Azure cloud provider configuration written to `azure.json`.
///
/// Field order is the serialized key order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureConfig {
    pub aad_client_id: String,
    pub aad_client_secret: String,
    pub resource_group: String,
    pub subscription_id: String,
    pub tenant_id: String,
}

/// Computes the destination bundle for `provider` from `source`.
///
/// # Errors
///
/// - [`CredentialsError::MissingField`] if a platform-issued bundle lacks a key the remap reads
/// - [`CredentialsError::UnsupportedManagedProvider`] for platform-issued bundles of providers
///   without a remap
/// - [`CredentialsError::InvalidCredentials`] / [`CredentialsError::InvalidConfig`] if a
///   user-provided bundle lacks the provider's required keys
pub fn synthesize_credentials(
    source: &CredentialBundle,
    provider: ProviderType,
    mode: SynthesisMode,
) -> Result<CredentialBundle, CredentialsError> {
    match mode {
        SynthesisMode::ManagedIdentity => remap_platform_credentials(source, provider),
        SynthesisMode::UserSecret => supplement_user_credentials(source, provider),
    }
}

/// Returns true iff `current` and `desired` differ in key set or in any value.
#[must_use]
pub fn needs_update(current: &CredentialBundle, desired: &CredentialBundle) -> bool {
    current.len() != desired.len()
        || desired
            .iter()
            .any(|(key, value)| current.get(key) != Some(value))
}

/// Builds the `[default]` profile of an AWS shared credentials file.
///
/// No trailing newline.
#[must_use]
pub fn static_credentials_file(access_key_id: &[u8], secret_access_key: &[u8]) -> Vec<u8> {
    let parts: [&[u8]; 9] = [
        AWS_DEFAULT_PROFILE.as_bytes(),
        b"\n",
        AWS_ACCESS_KEY_ID_KEY.as_bytes(),
        b" = ",
        access_key_id,
        b"\n",
        AWS_SECRET_ACCESS_KEY_KEY.as_bytes(),
        b" = ",
        secret_access_key,
    ];
    parts.concat()
}

fn non_empty<'a>(bundle: &'a CredentialBundle, key: &str) -> Option<&'a [u8]> {
    bundle
        .get(key)
        .map(Vec::as_slice)
        .filter(|value| !value.is_empty())
}

fn platform_field<'a>(
    source: &'a CredentialBundle,
    provider: ProviderType,
    field: &str,
) -> Result<&'a [u8], CredentialsError> {
    non_empty(source, field).ok_or_else(|| CredentialsError::MissingField {
        provider,
        field: field.to_string(),
    })
}

fn platform_text(
    source: &CredentialBundle,
    provider: ProviderType,
    field: &str,
) -> Result<String, CredentialsError> {
    platform_field(source, provider, field)
        .map(|value| String::from_utf8_lossy(value).into_owned())
}

fn remap_platform_credentials(
    source: &CredentialBundle,
    provider: ProviderType,
) -> Result<CredentialBundle, CredentialsError> {
    let mut destination = CredentialBundle::new();

    match provider {
        // Platform-issued AWS secrets already carry a `credentials` file.
        ProviderType::Aws => return Ok(source.clone()),
        ProviderType::Gcp => {
            let key = platform_field(source, provider, PLATFORM_GCP_SERVICE_ACCOUNT_KEY)?;
            destination.insert(GCP_CREDENTIALS_KEY.to_string(), key.to_vec());
        }
        ProviderType::Azure => {
            let config = AzureConfig {
                aad_client_id: platform_text(source, provider, PLATFORM_AZURE_CLIENT_ID_KEY)?,
                aad_client_secret: platform_text(source, provider, PLATFORM_AZURE_CLIENT_SECRET_KEY)?,
                resource_group: platform_text(source, provider, PLATFORM_AZURE_RESOURCE_GROUP_KEY)?,
                subscription_id: platform_text(source, provider, PLATFORM_AZURE_SUBSCRIPTION_ID_KEY)?,
                tenant_id: platform_text(source, provider, PLATFORM_AZURE_TENANT_ID_KEY)?,
            };
            let encoded =
                serde_json::to_vec(&config).map_err(|e| CredentialsError::Encoding {
                    key: AZURE_CONFIG_KEY.to_string(),
                    reason: e.to_string(),
                })?;
            destination.insert(AZURE_CONFIG_KEY.to_string(), encoded);
        }
        ProviderType::Infoblox | ProviderType::BlueCat | ProviderType::Cloudflare => {
            return Err(CredentialsError::UnsupportedManagedProvider { provider });
        }
    }

    Ok(destination)
}

fn supplement_user_credentials(
    source: &CredentialBundle,
    provider: ProviderType,
) -> Result<CredentialBundle, CredentialsError> {
    let mut destination = source.clone();

    let require = |key: &str| non_empty(source, key).is_some();
    let invalid_credentials =
        |reason: String| CredentialsError::InvalidCredentials { provider, reason };
    let invalid_config = |reason: String| CredentialsError::InvalidConfig { provider, reason };

    match provider {
        ProviderType::Aws => {
            if !require(AWS_CREDENTIALS_KEY) {
                let access_key_id = non_empty(source, AWS_ACCESS_KEY_ID_KEY);
                let secret_access_key = non_empty(source, AWS_SECRET_ACCESS_KEY_KEY);
                let (Some(access_key_id), Some(secret_access_key)) =
                    (access_key_id, secret_access_key)
                else {
                    return Err(invalid_credentials(format!(
                        "{AWS_CREDENTIALS_KEY} not found and {AWS_ACCESS_KEY_ID_KEY}/{AWS_SECRET_ACCESS_KEY_KEY} are incomplete"
                    )));
                };
                destination.insert(
                    AWS_CREDENTIALS_KEY.to_string(),
                    static_credentials_file(access_key_id, secret_access_key),
                );
            }
        }
        ProviderType::Infoblox => {
            if !require(INFOBLOX_WAPI_USERNAME_KEY) {
                return Err(invalid_credentials("username not found".to_string()));
            }
            if !require(INFOBLOX_WAPI_PASSWORD_KEY) {
                return Err(invalid_credentials("password not found".to_string()));
            }
        }
        ProviderType::Azure => {
            if !require(AZURE_CONFIG_KEY) {
                return Err(invalid_config(format!("{AZURE_CONFIG_KEY} not found")));
            }
        }
        ProviderType::Gcp => {
            if !require(GCP_CREDENTIALS_KEY) {
                return Err(invalid_credentials(format!("{GCP_CREDENTIALS_KEY} not found")));
            }
        }
        ProviderType::BlueCat => {
            if !require(BLUECAT_CONFIG_KEY) {
                return Err(invalid_config(format!("{BLUECAT_CONFIG_KEY} not found")));
            }
        }
        ProviderType::Cloudflare => {
            if !require(CLOUDFLARE_API_TOKEN_KEY) {
                return Err(invalid_config(format!("{CLOUDFLARE_API_TOKEN_KEY} not found")));
            }
        }
    }

    Ok(destination)
}

/// Reads the `data` of a secret as a bundle. `stringData` is write-only and ignored.
#[must_use]
pub fn bundle_from_secret(secret: &Secret) -> CredentialBundle {
    secret
        .data
        .as_ref()
        .map(|data| {
            data.iter()
                .map(|(key, value)| (key.clone(), value.0.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn bundle_into_data(bundle: CredentialBundle) -> BTreeMap<String, ByteString> {
    bundle
        .into_iter()
        .map(|(key, value)| (key, ByteString(value)))
        .collect()
}

/// Builds the standard labels of a destination credentials secret.
#[must_use]
pub fn build_credentials_labels(extdns_name: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(K8S_NAME.to_string(), APP_NAME_EXTERNAL_DNS.to_string());
    labels.insert(K8S_INSTANCE.to_string(), extdns_name.to_string());
    labels.insert(K8S_COMPONENT.to_string(), COMPONENT_CREDENTIALS.to_string());
    labels.insert(K8S_MANAGED_BY.to_string(), OPERATOR_NAME.to_string());
    labels.insert(OWNING_EXTERNAL_DNS_LABEL.to_string(), extdns_name.to_string());
    labels
}

/// Builds the controller owner reference pointing at `extdns`.
///
/// Deleting the `ExternalDNS` then garbage-collects the destination secret.
#[must_use]
pub fn build_owner_references(extdns: &ExternalDNS) -> Vec<OwnerReference> {
    vec![OwnerReference {
        api_version: API_GROUP_VERSION.to_string(),
        kind: KIND_EXTERNAL_DNS.to_string(),
        name: extdns.name_any(),
        uid: extdns.metadata.uid.clone().unwrap_or_default(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }]
}

/// Builds the desired destination secret for `extdns` from `source`.
///
/// # Arguments
///
/// * `source` - The resolved source secret
/// * `destination` - Namespace and name of the destination secret
/// * `extdns` - The owning resource; selects the provider
/// * `mode` - Key vocabulary of `source`
///
/// # Errors
///
/// Propagates any [`CredentialsError`] from [`synthesize_credentials`].
pub fn desired_credentials_secret(
    source: &Secret,
    destination: &NamespacedName,
    extdns: &ExternalDNS,
    mode: SynthesisMode,
) -> Result<Secret, CredentialsError> {
    let provider = extdns.spec.provider.r#type;

    debug!(
        source = %source.name_any(),
        destination = %destination,
        provider = %provider,
        mode = ?mode,
        "Synthesizing credentials secret"
    );

    let data = synthesize_credentials(&bundle_from_secret(source), provider, mode)?;

    debug!(
        destination = %destination,
        keys = ?data.keys().collect::<Vec<_>>(),
        "Synthesized credentials secret"
    );

    Ok(Secret {
        metadata: ObjectMeta {
            name: Some(destination.name.clone()),
            namespace: Some(destination.namespace.clone()),
            labels: Some(build_credentials_labels(&extdns.name_any())),
            owner_references: Some(build_owner_references(extdns)),
            ..Default::default()
        },
        data: Some(bundle_into_data(data)),
        ..Default::default()
    })
}

/// Returns true if `current` must be replaced to carry `desired`'s data.
///
/// Only `data` is compared; metadata drift is not a reason to rewrite credentials.
#[must_use]
pub fn credentials_secret_needs_update(current: &Secret, desired: &Secret) -> bool {
    let changed = needs_update(&bundle_from_secret(current), &bundle_from_secret(desired));
    debug!(
        name = %current.name_any(),
        changed,
        "Compared credentials secret data"
    );
    changed
}

/// Returns a copy of `current` carrying `desired`'s data, ready to be written back.
#[must_use]
pub fn updated_credentials_secret(current: &Secret, desired: &Secret) -> Secret {
    let mut updated = current.clone();
    updated.data.clone_from(&desired.data);
    updated
}
