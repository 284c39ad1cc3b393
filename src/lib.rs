// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # ExternalDNS operator core
//!
//! Decision logic of an operator that runs `external-dns` on behalf of an
//! [`ExternalDNS`](crd::ExternalDNS) custom resource.
//!
//! ## Overview
//!
//! The operator has two places where it transforms user intent rather than copying it:
//!
//! - **Credentials secret synthesis** - turning a provider-specific source secret into the
//!   exact key layout the `external-dns` provider client expects, and deciding whether an
//!   existing destination secret must be rewritten
//! - **Domain filter compilation** - turning `spec.domains` into `external-dns` flags
//!
//! Both are pure: they never talk to the API server. Watching resources, writing
//! secrets, and retrying belong to the caller.
//!
//! ## Modules
//!
//! - [`crd`] - The `ExternalDNS` custom resource and its typed domain filter rules
//! - [`config`] - Operator configuration and source/destination secret resolution
//! - [`credentials_secret`] - Credentials synthesis and update decisions
//! - [`domain_filters`] - Domain filter to flag compilation
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```rust
//! use external_dns_operator::credentials_secret::{
//!     synthesize_credentials, CredentialBundle, SynthesisMode,
//! };
//! use external_dns_operator::crd::ProviderType;
//!
//! let mut source = CredentialBundle::new();
//! source.insert("aws_access_key_id".to_string(), b"AKIA1".to_vec());
//! source.insert("aws_secret_access_key".to_string(), b"secret1".to_vec());
//!
//! let destination =
//!     synthesize_credentials(&source, ProviderType::Aws, SynthesisMode::UserSecret).unwrap();
//! assert_eq!(
//!     destination["credentials"],
//!     b"[default]\naws_access_key_id = AKIA1\naws_secret_access_key = secret1".to_vec()
//! );
//! ```

pub mod config;
pub mod constants;
pub mod crd;
pub mod credentials_secret;
pub mod domain_filters;
pub mod errors;
pub mod labels;

#[cfg(test)]
mod crd_tests;
