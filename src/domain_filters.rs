// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Domain filter compilation.
//!
//! Translates the ordered `spec.domains` of an [`ExternalDNS`](crate::crd::ExternalDNS)
//! into `external-dns` command-line flags:
//!
//! | matchType | filterType | flag                                  |
//! |-----------|------------|---------------------------------------|
//! | Exact     | Include    | `--domain-filter=<name>` per entry    |
//! | Exact     | Exclude    | `--exclude-domains=<name>` per entry  |
//! | Regex     | Include    | one `--regex-domain-filter=<union>`   |
//! | Regex     | Exclude    | one `--regex-domain-exclusion=<union>`|
//!
//! `external-dns` accepts a single regex per direction, so all regex entries of a
//! direction are merged into one alternation, emitted where the first of them appears.

use crate::constants::{
    DOMAIN_FILTER_FLAG, EXCLUDE_DOMAINS_FLAG, REGEX_DOMAIN_EXCLUSION_FLAG,
    REGEX_DOMAIN_FILTER_FLAG,
};
use crate::crd::{DomainFilterRule, DomainMatcher, ExternalDNSDomain, FilterType};
use crate::errors::DomainFilterError;
use regex::Regex;

/// Combines patterns into one alternation.
///
/// A single pattern is returned as is; several are each parenthesized and joined
/// with `|`, e.g. `(p1)|(p2)`.
#[must_use]
pub fn regex_union(patterns: &[&str]) -> String {
    match patterns {
        [single] => (*single).to_string(),
        _ => patterns
            .iter()
            .map(|pattern| format!("({pattern})"))
            .collect::<Vec<_>>()
            .join("|"),
    }
}

/// Compiles domain filters into `external-dns` flags, in input order.
///
/// Exact entries each produce their own flag at their own position. Regex entries of
/// one filter type produce a single flag at the position of the first such entry.
///
/// # Errors
///
/// - [`DomainFilterError::InvalidRule`] if an entry populates the wrong field for its match type
/// - [`DomainFilterError::InvalidPattern`] if any regex pattern does not compile
///
/// No flags are returned on error.
pub fn compile_domain_filters(domains: &[ExternalDNSDomain]) -> Result<Vec<String>, DomainFilterError> {
    let rules = domains
        .iter()
        .map(ExternalDNSDomain::rule)
        .collect::<Result<Vec<_>, _>>()?;

    let include_patterns = regex_patterns(&rules, FilterType::Include);
    let exclude_patterns = regex_patterns(&rules, FilterType::Exclude);

    let mut flags = Vec::with_capacity(rules.len());
    let mut include_emitted = false;
    let mut exclude_emitted = false;

    for rule in &rules {
        match (&rule.matcher, rule.direction) {
            (DomainMatcher::Exact(name), FilterType::Include) => {
                flags.push(format!("{DOMAIN_FILTER_FLAG}={name}"));
            }
            (DomainMatcher::Exact(name), FilterType::Exclude) => {
                flags.push(format!("{EXCLUDE_DOMAINS_FLAG}={name}"));
            }
            (DomainMatcher::Regex(_), FilterType::Include) if !include_emitted => {
                validate_patterns(&include_patterns, FilterType::Include)?;
                flags.push(format!(
                    "{REGEX_DOMAIN_FILTER_FLAG}={}",
                    regex_union(&include_patterns)
                ));
                include_emitted = true;
            }
            (DomainMatcher::Regex(_), FilterType::Exclude) if !exclude_emitted => {
                validate_patterns(&exclude_patterns, FilterType::Exclude)?;
                flags.push(format!(
                    "{REGEX_DOMAIN_EXCLUSION_FLAG}={}",
                    regex_union(&exclude_patterns)
                ));
                exclude_emitted = true;
            }
            // Already covered by the union flag.
            (DomainMatcher::Regex(_), _) => {}
        }
    }

    Ok(flags)
}

fn regex_patterns(rules: &[DomainFilterRule], direction: FilterType) -> Vec<&str> {
    rules
        .iter()
        .filter(|rule| rule.direction == direction)
        .filter_map(|rule| match &rule.matcher {
            DomainMatcher::Regex(pattern) => Some(pattern.as_str()),
            DomainMatcher::Exact(_) => None,
        })
        .collect()
}

fn validate_patterns(patterns: &[&str], direction: FilterType) -> Result<(), DomainFilterError> {
    for pattern in patterns {
        Regex::new(pattern).map_err(|e| DomainFilterError::InvalidPattern {
            direction: direction.into(),
            pattern: (*pattern).to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}
