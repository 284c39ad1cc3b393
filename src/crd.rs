// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definition for the `ExternalDNS` operand.
//!
//! An [`ExternalDNS`] resource describes one `external-dns` deployment: which DNS provider
//! it publishes to, where that provider's credentials come from, and which domains it is
//! allowed to manage.
//!
//! # Example
//!
//! ```rust,no_run
//! use external_dns_operator::crd::{
//!     DomainMatchType, ExternalDNSDomain, ExternalDNSProvider, ExternalDNSSpec, FilterType,
//!     ProviderType,
//! };
//!
//! let spec = ExternalDNSSpec {
//!     provider: ExternalDNSProvider {
//!         r#type: ProviderType::Aws,
//!         ..Default::default()
//!     },
//!     domains: vec![ExternalDNSDomain {
//!         match_type: DomainMatchType::Exact,
//!         name: Some("example.com".to_string()),
//!         pattern: None,
//!         filter_type: FilterType::Include,
//!     }],
//!     zones: None,
//! };
//! ```

use crate::errors::DomainFilterError;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a Secret in the operator namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SecretReference {
    /// Name of the secret.
    pub name: String,
}

/// DNS provider an `external-dns` operand publishes records to.
///
/// The provider selects both the credential remapping rule and the required-key
/// validation applied to the destination credentials secret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ProviderType {
    /// Amazon Route 53
    #[default]
    #[serde(rename = "AWS")]
    Aws,
    /// Azure DNS
    Azure,
    /// Google Cloud DNS
    #[serde(rename = "GCP")]
    Gcp,
    /// Infoblox NIOS via WAPI
    Infoblox,
    /// BlueCat Address Manager via the BlueCat gateway
    BlueCat,
    /// Cloudflare DNS
    Cloudflare,
}

impl ProviderType {
    /// Lower-case provider name, as used in `external-dns --provider` and in error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
            Self::Infoblox => "infoblox",
            Self::BlueCat => "bluecat",
            Self::Cloudflare => "cloudflare",
        }
    }

    /// Whether the platform credential mechanism can issue credentials for this provider.
    #[must_use]
    pub fn has_platform_credentials(self) -> bool {
        matches!(self, Self::Aws | Self::Azure | Self::Gcp)
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AWS provider options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSAWSProviderOptions {
    /// Secret holding either a `credentials` file or static `aws_access_key_id` /
    /// `aws_secret_access_key` keys. Optional on OpenShift, where the platform issues one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SecretReference>,

    /// IAM role to assume when publishing records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assume_role_arn: Option<String>,
}

/// Azure provider options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSAzureProviderOptions {
    /// Secret holding an `azure.json` cloud provider configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<SecretReference>,
}

/// GCP provider options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSGCPProviderOptions {
    /// Secret holding a `gcp-credentials.json` service account key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SecretReference>,

    /// Project hosting the managed zones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Infoblox provider options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSInfobloxProviderOptions {
    /// Secret holding the WAPI username and password.
    pub credentials: SecretReference,

    /// Grid Master host.
    pub grid_host: String,

    /// WAPI port.
    #[schemars(range(min = 1, max = 65535))]
    pub wapi_port: i32,

    /// WAPI version, for example `2.12.2`.
    pub wapi_version: String,
}

/// BlueCat provider options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSBlueCatProviderOptions {
    /// Secret holding a `bluecat.json` gateway configuration.
    pub config_file: SecretReference,
}

/// Cloudflare provider options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSCloudflareProviderOptions {
    /// Secret holding a `CF_API_TOKEN`.
    pub credentials: SecretReference,
}

/// Provider selection and per-provider options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSProvider {
    /// Which DNS provider to publish to.
    pub r#type: ProviderType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws: Option<ExternalDNSAWSProviderOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure: Option<ExternalDNSAzureProviderOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcp: Option<ExternalDNSGCPProviderOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub infoblox: Option<ExternalDNSInfobloxProviderOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bluecat: Option<ExternalDNSBlueCatProviderOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudflare: Option<ExternalDNSCloudflareProviderOptions>,
}

impl ExternalDNSProvider {
    /// Returns the user-supplied credentials secret for the selected provider type.
    ///
    /// Options blocks for other provider types are ignored.
    #[must_use]
    pub fn credentials_ref(&self) -> Option<&SecretReference> {
        let secret = match self.r#type {
            ProviderType::Aws => self.aws.as_ref()?.credentials.as_ref(),
            ProviderType::Azure => self.azure.as_ref()?.config_file.as_ref(),
            ProviderType::Gcp => self.gcp.as_ref()?.credentials.as_ref(),
            ProviderType::Infoblox => self.infoblox.as_ref().map(|o| &o.credentials),
            ProviderType::BlueCat => self.bluecat.as_ref().map(|o| &o.config_file),
            ProviderType::Cloudflare => self.cloudflare.as_ref().map(|o| &o.credentials),
        };
        secret.filter(|secret| !secret.name.is_empty())
    }
}

/// How a domain entry matches names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DomainMatchType {
    /// Literal domain name.
    #[default]
    Exact,
    /// Regular expression over domain names.
    Regex,
}

/// Whether a domain entry allows or forbids matching names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FilterType {
    #[default]
    Include,
    Exclude,
}

/// A domain the operand may (or may not) manage, as written in the custom resource.
///
/// `name` is set when `matchType` is `Exact`, `pattern` when it is `Regex`; never both.
/// Use [`ExternalDNSDomain::rule`] to obtain the typed form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSDomain {
    pub match_type: DomainMatchType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    pub filter_type: FilterType,
}

impl ExternalDNSDomain {
    /// Converts the wire shape into a [`DomainFilterRule`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainFilterError::InvalidRule`] if the field required by `matchType` is
    /// missing or empty, or if the other field is also set.
    pub fn rule(&self) -> Result<DomainFilterRule, DomainFilterError> {
        let invalid = |reason: &str| DomainFilterError::InvalidRule {
            reason: reason.to_string(),
        };

        let matcher = match self.match_type {
            DomainMatchType::Exact => {
                if self.pattern.is_some() {
                    return Err(invalid("pattern must not be set when matchType is Exact"));
                }
                match self.name.as_deref() {
                    Some(name) if !name.is_empty() => DomainMatcher::Exact(name.to_string()),
                    _ => return Err(invalid("name is required when matchType is Exact")),
                }
            }
            DomainMatchType::Regex => {
                if self.name.is_some() {
                    return Err(invalid("name must not be set when matchType is Regex"));
                }
                match self.pattern.as_deref() {
                    Some(pattern) if !pattern.is_empty() => {
                        DomainMatcher::Regex(pattern.to_string())
                    }
                    _ => return Err(invalid("pattern is required when matchType is Regex")),
                }
            }
        };

        Ok(DomainFilterRule {
            matcher,
            direction: self.filter_type,
        })
    }
}

/// Name matcher of a [`DomainFilterRule`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainMatcher {
    Exact(String),
    Regex(String),
}

/// Typed domain filter rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainFilterRule {
    pub matcher: DomainMatcher,
    pub direction: FilterType,
}

/// Condition represents an observation of a resource's current state.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition. Common types include: Ready, Degraded.
    pub r#type: String,

    /// Status of the condition: True, False, or Unknown.
    pub status: String,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

/// `ExternalDNS` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    /// Zones the operand is currently restricted to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<String>>,
}

/// `ExternalDNS` describes an `external-dns` deployment managed by the operator.
///
/// # Example
///
/// ```yaml
/// apiVersion: externaldns.olm.openshift.io/v1beta1
/// kind: ExternalDNS
/// metadata:
///   name: sample
/// spec:
///   provider:
///     type: AWS
///     aws:
///       credentials:
///         name: aws-access-key
///   domains:
///   - matchType: Exact
///     name: example.com
///     filterType: Include
///   - matchType: Regex
///     pattern: '(.*)\.internal\.example\.com'
///     filterType: Exclude
/// ```
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "externaldns.olm.openshift.io",
    version = "v1beta1",
    kind = "ExternalDNS",
    plural = "externaldnses",
    doc = "ExternalDNS describes an external-dns deployment: the DNS provider it publishes to, the secret holding that provider's credentials, and the domains it may manage."
)]
#[kube(status = "ExternalDNSStatus")]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSSpec {
    /// DNS provider and its options.
    pub provider: ExternalDNSProvider,

    /// Ordered domain filters. Exact entries map to one flag each; regex entries of the
    /// same filter type are merged into a single alternation.
    #[serde(default)]
    pub domains: Vec<ExternalDNSDomain>,

    /// Hosted zone IDs the operand is restricted to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<String>>,
}
