// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for credential synthesis and domain filter compilation.
//!
//! Every error is terminal for the invocation that produced it and carries the
//! provider, field, or pattern needed to build an actionable status message.

use crate::crd::{FilterType, ProviderType};
use std::fmt;
use thiserror::Error;

/// Errors raised while synthesizing a destination credentials bundle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// A platform-issued source bundle lacks a field the remap needs.
    ///
    /// Only raised for managed-identity sources, whose key vocabulary is fixed.
    #[error("missing field '{field}' in platform credentials for {provider}")]
    MissingField {
        /// Provider whose remap needed the field
        provider: ProviderType,
        /// The absent or empty source key
        field: String,
    },

    /// The source secret does not carry usable credentials for the provider.
    #[error("invalid credentials for {provider}: {reason}")]
    InvalidCredentials {
        /// Provider the credentials were meant for
        provider: ProviderType,
        /// Which credential is missing
        reason: String,
    },

    /// The source secret does not carry the provider's configuration file.
    #[error("invalid config for {provider}: {reason}")]
    InvalidConfig {
        /// Provider the configuration was meant for
        provider: ProviderType,
        /// Which configuration key is missing
        reason: String,
    },

    /// No platform credential remap exists for the provider.
    #[error("platform-issued credentials are not supported for {provider}")]
    UnsupportedManagedProvider {
        /// Provider without a managed-identity remap
        provider: ProviderType,
    },

    /// A synthesized document could not be encoded.
    #[error("failed to encode {key}: {reason}")]
    Encoding {
        /// Destination key of the document
        key: String,
        /// Encoder error
        reason: String,
    },
}

/// Direction of a regex filter, as named in pattern validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDirection {
    /// Pattern selects domains to manage
    Input,
    /// Pattern selects domains to skip
    Exclude,
}

impl From<FilterType> for FilterDirection {
    fn from(filter_type: FilterType) -> Self {
        match filter_type {
            FilterType::Include => Self::Input,
            FilterType::Exclude => Self::Exclude,
        }
    }
}

impl fmt::Display for FilterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}

/// Errors raised while compiling domain filters into `external-dns` flags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainFilterError {
    /// A regex domain filter does not compile.
    #[error("{direction} pattern {pattern} is invalid: {reason}")]
    InvalidPattern {
        /// Include (`input`) or exclude group the pattern belongs to
        direction: FilterDirection,
        /// The offending pattern, verbatim
        pattern: String,
        /// Regex parser error
        reason: String,
    },

    /// A domain entry does not populate exactly the field its match type requires.
    #[error("invalid domain filter: {reason}")]
    InvalidRule {
        /// What is wrong with the entry
        reason: String,
    },
}

/// Composite error for callers handling both subsystems uniformly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    DomainFilter(#[from] DomainFilterError),
}

impl SynthesisError {
    /// Returns the Kubernetes status reason code for this error.
    ///
    /// Used when a driver records the failure in an `ExternalDNS` status condition.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            Self::Credentials(CredentialsError::MissingField { .. }) => "MissingCredentialsField",
            Self::Credentials(CredentialsError::InvalidCredentials { .. }) => "InvalidCredentials",
            Self::Credentials(CredentialsError::InvalidConfig { .. }) => "InvalidProviderConfig",
            Self::Credentials(CredentialsError::UnsupportedManagedProvider { .. }) => {
                "UnsupportedPlatformCredentials"
            }
            Self::Credentials(CredentialsError::Encoding { .. }) => "CredentialsEncodingFailed",
            Self::DomainFilter(DomainFilterError::InvalidPattern { .. }) => "InvalidDomainPattern",
            Self::DomainFilter(DomainFilterError::InvalidRule { .. }) => "InvalidDomainFilter",
        }
    }
}
