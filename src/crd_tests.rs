// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod tests {
    use crate::crd::*;
    use crate::errors::DomainFilterError;
    use kube::CustomResourceExt;

    const SAMPLE: &str = r#"
apiVersion: externaldns.olm.openshift.io/v1beta1
kind: ExternalDNS
metadata:
  name: sample
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
  - matchType: Exact
    name: example.com
    filterType: Include
  - matchType: Regex
    pattern: '(.*)\.internal\.example\.com'
    filterType: Exclude
"#;

    #[test]
    fn test_deserialize_external_dns() {
        let extdns: ExternalDNS = serde_yaml::from_str(SAMPLE).unwrap();

        assert_eq!(extdns.spec.provider.r#type, ProviderType::Infoblox);
        let infoblox = extdns.spec.provider.infoblox.as_ref().unwrap();
        assert_eq!(infoblox.grid_host, "grid.example.com");
        assert_eq!(infoblox.wapi_port, 443);
        assert_eq!(infoblox.wapi_version, "2.12.2");

        assert_eq!(extdns.spec.domains.len(), 2);
        assert_eq!(extdns.spec.domains[1].match_type, DomainMatchType::Regex);
        assert_eq!(
            extdns.spec.domains[1].pattern.as_deref(),
            Some(r"(.*)\.internal\.example\.com")
        );
        assert_eq!(extdns.spec.domains[1].filter_type, FilterType::Exclude);
    }

    #[test]
    fn test_provider_type_wire_names() {
        let cases = [
            (ProviderType::Aws, "AWS", "aws"),
            (ProviderType::Azure, "Azure", "azure"),
            (ProviderType::Gcp, "GCP", "gcp"),
            (ProviderType::Infoblox, "Infoblox", "infoblox"),
            (ProviderType::BlueCat, "BlueCat", "bluecat"),
            (ProviderType::Cloudflare, "Cloudflare", "cloudflare"),
        ];

        for (provider, wire, name) in cases {
            assert_eq!(serde_json::to_value(provider).unwrap(), wire);
            assert_eq!(provider.as_str(), name);
            assert_eq!(provider.to_string(), name);
        }
    }

    #[test]
    fn test_platform_credential_providers() {
        assert!(ProviderType::Aws.has_platform_credentials());
        assert!(ProviderType::Azure.has_platform_credentials());
        assert!(ProviderType::Gcp.has_platform_credentials());
        assert!(!ProviderType::Infoblox.has_platform_credentials());
        assert!(!ProviderType::BlueCat.has_platform_credentials());
        assert!(!ProviderType::Cloudflare.has_platform_credentials());
    }

    #[test]
    fn test_credentials_ref_follows_provider_type() {
        let provider = ExternalDNSProvider {
            r#type: ProviderType::Gcp,
            aws: Some(ExternalDNSAWSProviderOptions {
                credentials: Some(SecretReference {
                    name: "aws-secret".to_string(),
                }),
                assume_role_arn: None,
            }),
            ..Default::default()
        };
        assert!(provider.credentials_ref().is_none());

        let provider = ExternalDNSProvider {
            r#type: ProviderType::Azure,
            azure: Some(ExternalDNSAzureProviderOptions {
                config_file: Some(SecretReference {
                    name: "azure-config".to_string(),
                }),
            }),
            ..Default::default()
        };
        assert_eq!(
            provider.credentials_ref().map(|s| s.name.as_str()),
            Some("azure-config")
        );
    }

    #[test]
    fn test_credentials_ref_ignores_empty_name() {
        let provider = ExternalDNSProvider {
            r#type: ProviderType::Aws,
            aws: Some(ExternalDNSAWSProviderOptions {
                credentials: Some(SecretReference::default()),
                assume_role_arn: None,
            }),
            ..Default::default()
        };
        assert!(provider.credentials_ref().is_none());
    }

    #[test]
    fn test_domain_rule_conversion() {
        let exact = ExternalDNSDomain {
            match_type: DomainMatchType::Exact,
            name: Some("abc.com".to_string()),
            pattern: None,
            filter_type: FilterType::Exclude,
        };
        assert_eq!(
            exact.rule().unwrap(),
            DomainFilterRule {
                matcher: DomainMatcher::Exact("abc.com".to_string()),
                direction: FilterType::Exclude,
            }
        );

        let regex = ExternalDNSDomain {
            match_type: DomainMatchType::Regex,
            name: None,
            pattern: Some(r"(.*)\.abc\.com".to_string()),
            filter_type: FilterType::Include,
        };
        assert_eq!(
            regex.rule().unwrap().matcher,
            DomainMatcher::Regex(r"(.*)\.abc\.com".to_string())
        );
    }

    #[test]
    fn test_domain_rule_rejects_both_or_neither() {
        let both = ExternalDNSDomain {
            match_type: DomainMatchType::Exact,
            name: Some("abc.com".to_string()),
            pattern: Some("abc".to_string()),
            filter_type: FilterType::Include,
        };
        let neither = ExternalDNSDomain {
            match_type: DomainMatchType::Regex,
            name: None,
            pattern: None,
            filter_type: FilterType::Include,
        };
        let empty = ExternalDNSDomain {
            match_type: DomainMatchType::Exact,
            name: Some(String::new()),
            pattern: None,
            filter_type: FilterType::Include,
        };

        for domain in [both, neither, empty] {
            assert!(matches!(
                domain.rule(),
                Err(DomainFilterError::InvalidRule { .. })
            ));
        }
    }

    #[test]
    fn test_crd_metadata() {
        let crd = ExternalDNS::crd();

        assert_eq!(
            crd.metadata.name.as_deref(),
            Some("externaldnses.externaldns.olm.openshift.io")
        );
        assert_eq!(crd.spec.group, "externaldns.olm.openshift.io");
        assert_eq!(crd.spec.scope, "Cluster");
        assert_eq!(crd.spec.names.kind, "ExternalDNS");
    }
}
