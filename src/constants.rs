// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the ExternalDNS operator.
//!
//! This module contains all string constants used throughout the codebase:
//! API coordinates, well-known credential keys, and the flags understood by
//! the `external-dns` workload. Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for the `ExternalDNS` CRD
pub const API_GROUP: &str = "externaldns.olm.openshift.io";

/// API version for the `ExternalDNS` CRD
pub const API_VERSION: &str = "v1beta1";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "externaldns.olm.openshift.io/v1beta1";

/// Kind name for `ExternalDNS` resource
pub const KIND_EXTERNAL_DNS: &str = "ExternalDNS";

// ============================================================================
// Operator Defaults
// ============================================================================

/// Namespace the operator runs in; user-provided source secrets live here
pub const DEFAULT_OPERATOR_NAMESPACE: &str = "external-dns-operator";

/// Namespace the `external-dns` workloads and their credentials live in
pub const DEFAULT_OPERAND_NAMESPACE: &str = "external-dns";

/// Secret issued by the platform credential mechanism (cloud-credential-operator)
pub const DEFAULT_PLATFORM_CREDENTIALS_SECRET: &str = "externaldns-cloud-credentials";

/// Prefix of the destination credentials secret, suffixed with the `ExternalDNS` name
pub const DEST_CREDENTIALS_SECRET_PREFIX: &str = "external-dns-credentials-";

/// Field manager / managed-by value for objects produced by this operator
pub const OPERATOR_NAME: &str = "external-dns-operator";

// ============================================================================
// Platform-Issued Credential Keys
// ============================================================================

/// GCP service account key issued by the platform
pub const PLATFORM_GCP_SERVICE_ACCOUNT_KEY: &str = "service_account.json";

/// Azure client ID issued by the platform
pub const PLATFORM_AZURE_CLIENT_ID_KEY: &str = "azure_client_id";

/// Azure client secret issued by the platform
pub const PLATFORM_AZURE_CLIENT_SECRET_KEY: &str = "azure_client_secret";

/// Azure resource group issued by the platform
pub const PLATFORM_AZURE_RESOURCE_GROUP_KEY: &str = "azure_resourcegroup";

/// Azure subscription ID issued by the platform
pub const PLATFORM_AZURE_SUBSCRIPTION_ID_KEY: &str = "azure_subscription_id";

/// Azure tenant ID issued by the platform
pub const PLATFORM_AZURE_TENANT_ID_KEY: &str = "azure_tenant_id";

// ============================================================================
// Provider-Native Credential Keys
// ============================================================================

/// AWS shared credentials file
pub const AWS_CREDENTIALS_KEY: &str = "credentials";

/// AWS static access key ID
pub const AWS_ACCESS_KEY_ID_KEY: &str = "aws_access_key_id";

/// AWS static secret access key
pub const AWS_SECRET_ACCESS_KEY_KEY: &str = "aws_secret_access_key";

/// Profile header written into a synthesized AWS credentials file
pub const AWS_DEFAULT_PROFILE: &str = "[default]";

/// GCP service account credentials file
pub const GCP_CREDENTIALS_KEY: &str = "gcp-credentials.json";

/// Azure cloud provider configuration file
pub const AZURE_CONFIG_KEY: &str = "azure.json";

/// BlueCat gateway configuration file
pub const BLUECAT_CONFIG_KEY: &str = "bluecat.json";

/// Infoblox WAPI username
pub const INFOBLOX_WAPI_USERNAME_KEY: &str = "EXTERNAL_DNS_INFOBLOX_WAPI_USERNAME";

/// Infoblox WAPI password
pub const INFOBLOX_WAPI_PASSWORD_KEY: &str = "EXTERNAL_DNS_INFOBLOX_WAPI_PASSWORD";

/// Cloudflare API token
pub const CLOUDFLARE_API_TOKEN_KEY: &str = "CF_API_TOKEN";

// ============================================================================
// external-dns Domain Filter Flags
// ============================================================================

/// Include a single domain by exact name
pub const DOMAIN_FILTER_FLAG: &str = "--domain-filter";

/// Exclude a single domain by exact name
pub const EXCLUDE_DOMAINS_FLAG: &str = "--exclude-domains";

/// Include domains matching a regular expression
pub const REGEX_DOMAIN_FILTER_FLAG: &str = "--regex-domain-filter";

/// Exclude domains matching a regular expression
pub const REGEX_DOMAIN_EXCLUSION_FLAG: &str = "--regex-domain-exclusion";
