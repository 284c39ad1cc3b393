// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common label constants applied to objects produced by the operator.

// ============================================================================
// Kubernetes Standard Labels
// https://kubernetes.io/docs/concepts/overview/working-with-objects/common-labels/
// ============================================================================

/// Standard label for the component name within the architecture
pub const K8S_COMPONENT: &str = "app.kubernetes.io/component";

/// Standard label for the tool being used to manage the operation of an application
pub const K8S_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Standard label for the name of the application (e.g., "external-dns")
pub const K8S_NAME: &str = "app.kubernetes.io/name";

/// Standard label for a unique name identifying the instance of an application
pub const K8S_INSTANCE: &str = "app.kubernetes.io/instance";

// ============================================================================
// Kubernetes Standard Label Values
// ============================================================================

/// Application name for `external-dns` operands
pub const APP_NAME_EXTERNAL_DNS: &str = "external-dns";

/// Component value for credentials secrets
pub const COMPONENT_CREDENTIALS: &str = "credentials";

// ============================================================================
// Operator-Specific Labels
// ============================================================================

/// Label naming the `ExternalDNS` resource that owns an operand object
pub const OWNING_EXTERNAL_DNS_LABEL: &str = "externaldns.olm.openshift.io/owning-externaldns";
