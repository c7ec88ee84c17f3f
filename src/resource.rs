//! Managed-cluster resource-ID validation and re-casing.
//!
//! A resource ID arrives as a previously assembled ARM path string. We only
//! validate its shape and re-case it for the destination table; we never
//! build one from raw components here.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Structural pattern for one managed cluster, matched case-insensitively:
/// `/subscriptions/<guid>/resourcegroups/<name>/providers/microsoft.containerservice/managedclusters/<name>`.
#[allow(clippy::expect_used)] // pattern is a compile-time constant
static MANAGED_CLUSTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^/subscriptions/[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}/resourcegroups/[a-z0-9._()-]+/providers/microsoft\.containerservice/managedclusters/[a-z0-9][a-z0-9_-]*$",
    )
    .expect("managed cluster pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a managed-cluster resource id: '{0}'")]
pub struct InvalidResourceId(pub String);

/// True when the string has the shape of a managed-cluster resource ID.
pub fn is_managed_cluster_id(resource_id: &str) -> bool {
    MANAGED_CLUSTER_RE.is_match(resource_id)
}

/// The components of a managed-cluster resource ID.
///
/// Components keep their input casing; the query layer re-cases the full ID
/// as each destination table family expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub subscription: String,
    pub resource_group: String,
    pub cluster_name: String,
}

impl ResourceId {
    pub fn parse(resource_id: &str) -> Result<Self, InvalidResourceId> {
        if !is_managed_cluster_id(resource_id) {
            return Err(InvalidResourceId(resource_id.to_string()));
        }
        // Shape is guaranteed by the pattern: 9 segments, values at fixed
        // positions.
        let segments: Vec<&str> = resource_id.split('/').collect();
        Ok(Self {
            subscription: segments[2].to_string(),
            resource_group: segments[4].to_string(),
            cluster_name: segments[8].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "/subscriptions/12345678-1234-1234-1234-123456789abc/resourcegroups/my-rg/providers/microsoft.containerservice/managedclusters/my-cluster";

    #[test]
    fn test_valid_id_matches() {
        assert!(is_managed_cluster_id(VALID));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let upper = "/SUBSCRIPTIONS/12345678-1234-1234-1234-123456789ABC/RESOURCEGROUPS/MY-RG/PROVIDERS/MICROSOFT.CONTAINERSERVICE/MANAGEDCLUSTERS/MY-CLUSTER";
        assert!(is_managed_cluster_id(upper));
        let mixed = "/subscriptions/12345678-1234-1234-1234-123456789abc/resourceGroups/My-RG/providers/Microsoft.ContainerService/managedClusters/my-cluster";
        assert!(is_managed_cluster_id(mixed));
    }

    #[test]
    fn test_other_resource_types_rejected() {
        let vm = "/subscriptions/12345678-1234-1234-1234-123456789abc/resourcegroups/my-rg/providers/microsoft.compute/virtualmachines/my-vm";
        assert!(!is_managed_cluster_id(vm));
    }

    #[test]
    fn test_malformed_ids_rejected() {
        for id in [
            "",
            "my-cluster",
            "/subscriptions/not-a-guid/resourcegroups/rg/providers/microsoft.containerservice/managedclusters/c",
            "/subscriptions/12345678-1234-1234-1234-123456789abc/resourcegroups/rg",
            "/subscriptions/12345678-1234-1234-1234-123456789abc/resourcegroups/rg/providers/microsoft.containerservice/managedclusters/",
            "/subscriptions/12345678-1234-1234-1234-123456789abc/resourcegroups/rg/providers/microsoft.containerservice/managedclusters/c/extra",
        ] {
            assert!(!is_managed_cluster_id(id), "expected rejection for {id:?}");
        }
    }

    #[test]
    fn test_no_trailing_injection() {
        let poisoned = format!("{VALID}' or 1==1");
        assert!(!is_managed_cluster_id(&poisoned));
    }

    #[test]
    fn test_parse_extracts_components() -> Result<(), InvalidResourceId> {
        let parsed = ResourceId::parse(VALID)?;
        assert_eq!(parsed.subscription, "12345678-1234-1234-1234-123456789abc");
        assert_eq!(parsed.resource_group, "my-rg");
        assert_eq!(parsed.cluster_name, "my-cluster");
        Ok(())
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(ResourceId::parse("nope").is_err());
    }
}
