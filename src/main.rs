// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `externaldns-synth` - offline driver for credentials synthesis and domain filter compilation.
//!
//! Reads `ExternalDNS` and `Secret` manifests from disk and prints what the operator would
//! write: the destination credentials secret, or the `external-dns` domain filter flags.
//! Nothing is sent to a cluster.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use external_dns_operator::{
    config::{credentials_source, destination_secret_for, OperatorConfig},
    constants::{
        DEFAULT_OPERAND_NAMESPACE, DEFAULT_OPERATOR_NAMESPACE, DEFAULT_PLATFORM_CREDENTIALS_SECRET,
    },
    crd::ExternalDNS,
    credentials_secret::{
        credentials_secret_needs_update, desired_credentials_secret, updated_credentials_secret,
        SynthesisMode,
    },
    domain_filters::compile_domain_filters,
};
use k8s_openapi::api::core::v1::Secret;
use kube::ResourceExt;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "externaldns-synth",
    version,
    about = "Synthesize ExternalDNS credentials secrets and domain filter flags from manifests"
)]
struct Cli {
    #[command(flatten)]
    operator: OperatorArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct OperatorArgs {
    /// Namespace holding source credentials secrets
    #[arg(
        long,
        global = true,
        env = "EXTERNAL_DNS_OPERATOR_NAMESPACE",
        default_value = DEFAULT_OPERATOR_NAMESPACE
    )]
    operator_namespace: String,

    /// Namespace holding operands and their credentials secrets
    #[arg(
        long,
        global = true,
        env = "EXTERNAL_DNS_OPERAND_NAMESPACE",
        default_value = DEFAULT_OPERAND_NAMESPACE
    )]
    operand_namespace: String,

    /// Platform-issued credentials are available
    #[arg(long, global = true, env = "EXTERNAL_DNS_IS_OPENSHIFT")]
    openshift: bool,

    /// Name of the platform-issued credentials secret
    #[arg(
        long,
        global = true,
        env = "EXTERNAL_DNS_PLATFORM_CREDENTIALS_SECRET",
        default_value = DEFAULT_PLATFORM_CREDENTIALS_SECRET
    )]
    platform_credentials_secret: String,
}

impl From<&OperatorArgs> for OperatorConfig {
    fn from(args: &OperatorArgs) -> Self {
        Self {
            operator_namespace: args.operator_namespace.clone(),
            operand_namespace: args.operand_namespace.clone(),
            is_openshift: args.openshift,
            platform_credentials_secret: args.platform_credentials_secret.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the destination credentials secret for an ExternalDNS
    Credentials(CredentialsArgs),
    /// Print the external-dns domain filter flags for an ExternalDNS, one per line
    DomainFilters(DomainFiltersArgs),
}

#[derive(Debug, Args)]
struct CredentialsArgs {
    /// ExternalDNS manifest
    #[arg(long)]
    external_dns: PathBuf,

    /// Source Secret manifest
    #[arg(long)]
    source: PathBuf,

    /// Existing destination Secret manifest; prints the updated object instead
    #[arg(long)]
    current: Option<PathBuf>,

    /// Treat the source as platform-issued regardless of the ExternalDNS spec
    #[arg(long)]
    managed: bool,
}

#[derive(Debug, Args)]
struct DomainFiltersArgs {
    /// ExternalDNS manifest
    #[arg(long)]
    external_dns: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}

fn init_logging() {
    // Respects RUST_LOG (default: info) and RUST_LOG_FORMAT (json|text).
    // Logs go to stderr; stdout carries the manifests and flags.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .compact()
                .init();
        }
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = OperatorConfig::from(&cli.operator);
    debug!(?config, "Loaded operator configuration");

    match &cli.command {
        Command::Credentials(args) => run_credentials(args, &config, out),
        Command::DomainFilters(args) => run_domain_filters(args, out),
    }
}

fn run_credentials(
    args: &CredentialsArgs,
    config: &OperatorConfig,
    out: &mut impl Write,
) -> Result<()> {
    let extdns: ExternalDNS = load_manifest(&args.external_dns)?;
    let source: Secret = load_manifest(&args.source)?;

    let mode = if args.managed {
        SynthesisMode::ManagedIdentity
    } else {
        match credentials_source(&extdns, config) {
            Some(resolved) => {
                if resolved.secret.name != source.name_any() {
                    warn!(
                        expected = %resolved.secret,
                        given = %source.name_any(),
                        "Source secret differs from the one the ExternalDNS resolves to"
                    );
                }
                resolved.mode
            }
            None => SynthesisMode::UserSecret,
        }
    };

    let destination = destination_secret_for(config, &extdns);
    let desired = desired_credentials_secret(&source, &destination, &extdns, mode).with_context(|| {
        format!(
            "failed to synthesize credentials for ExternalDNS {}",
            extdns.name_any()
        )
    })?;

    let output = match &args.current {
        None => {
            info!(destination = %destination, "Synthesized credentials secret");
            desired
        }
        Some(path) => {
            let current: Secret = load_manifest(path)?;
            if credentials_secret_needs_update(&current, &desired) {
                info!(destination = %destination, "Credentials secret needs update");
                updated_credentials_secret(&current, &desired)
            } else {
                info!(destination = %destination, "Credentials secret is up to date");
                current
            }
        }
    };

    let yaml = serde_yaml::to_string(&output).context("failed to encode Secret as YAML")?;
    out.write_all(yaml.as_bytes())?;
    Ok(())
}

fn run_domain_filters(args: &DomainFiltersArgs, out: &mut impl Write) -> Result<()> {
    let extdns: ExternalDNS = load_manifest(&args.external_dns)?;

    let flags = compile_domain_filters(&extdns.spec.domains).with_context(|| {
        format!("failed to compile domain filters for ExternalDNS {}", extdns.name_any())
    })?;
    info!(count = flags.len(), "Compiled domain filters");

    for flag in flags {
        writeln!(out, "{flag}")?;
    }
    Ok(())
}

fn load_manifest<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
