// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Operator configuration and credentials secret resolution.
//!
//! The operator reads user-provided (or platform-issued) source secrets from its own
//! namespace and writes the synthesized destination secret next to the operand. This
//! module decides which source secret applies to an [`ExternalDNS`] resource, which
//! synthesis mode it needs, and what the destination secret is called.

use crate::constants::{
    DEFAULT_OPERAND_NAMESPACE, DEFAULT_OPERATOR_NAMESPACE, DEFAULT_PLATFORM_CREDENTIALS_SECRET,
    DEST_CREDENTIALS_SECRET_PREFIX,
};
use crate::credentials_secret::SynthesisMode;
use crate::crd::ExternalDNS;
use kube::ResourceExt;
use std::fmt;

/// Namespace and name of a namespaced object.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamespacedName {
    pub namespace: String,
    pub name: String,
}

impl NamespacedName {
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NamespacedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Static configuration of the operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorConfig {
    /// Namespace holding source credentials secrets
    pub operator_namespace: String,
    /// Namespace holding operands and their destination secrets
    pub operand_namespace: String,
    /// Whether the platform credential mechanism is available
    pub is_openshift: bool,
    /// Name of the platform-issued credentials secret in the operator namespace
    pub platform_credentials_secret: String,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            operator_namespace: DEFAULT_OPERATOR_NAMESPACE.to_string(),
            operand_namespace: DEFAULT_OPERAND_NAMESPACE.to_string(),
            is_openshift: false,
            platform_credentials_secret: DEFAULT_PLATFORM_CREDENTIALS_SECRET.to_string(),
        }
    }
}

/// Where the source credentials of an `ExternalDNS` come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialsSource {
    pub secret: NamespacedName,
    pub mode: SynthesisMode,
}

/// Resolves the source credentials secret for `extdns`.
///
/// A secret named in the provider options always wins and is synthesized in
/// [`SynthesisMode::UserSecret`]. Without one, OpenShift clusters fall back to the
/// platform-issued secret for providers the platform can issue credentials for.
///
/// Returns `None` when no source applies; the caller has nothing to synthesize yet.
#[must_use]
pub fn credentials_source(extdns: &ExternalDNS, config: &OperatorConfig) -> Option<CredentialsSource> {
    let provider = &extdns.spec.provider;

    if let Some(secret) = provider.credentials_ref() {
        return Some(CredentialsSource {
            secret: NamespacedName::new(&config.operator_namespace, &secret.name),
            mode: SynthesisMode::UserSecret,
        });
    }

    if config.is_openshift && provider.r#type.has_platform_credentials() {
        return Some(CredentialsSource {
            secret: NamespacedName::new(
                &config.operator_namespace,
                &config.platform_credentials_secret,
            ),
            mode: SynthesisMode::ManagedIdentity,
        });
    }

    None
}

/// Name of the destination credentials secret for an `ExternalDNS` named `extdns_name`.
#[must_use]
pub fn destination_secret_name(config: &OperatorConfig, extdns_name: &str) -> NamespacedName {
    NamespacedName::new(
        &config.operand_namespace,
        format!("{DEST_CREDENTIALS_SECRET_PREFIX}{extdns_name}"),
    )
}

/// [`destination_secret_name`] for a resource.
#[must_use]
pub fn destination_secret_for(config: &OperatorConfig, extdns: &ExternalDNS) -> NamespacedName {
    destination_secret_name(config, &extdns.name_any())
}
