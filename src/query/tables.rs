//! Immutable lookup tables for the query builder.
//!
//! All maps are built once on first use and never mutated, so any number of
//! threads can resolve tables and level filters concurrently without locks.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Multi-tenant destination shared by every category.
pub const SHARED_TABLE: &str = "AzureDiagnostics";

/// Diagnostic categories a cluster can emit. Unknown categories are still
/// accepted in shared mode for forward compatibility; this list exists for
/// CLI help and documentation.
pub const KNOWN_CATEGORIES: [&str; 14] = [
    "kube-apiserver",
    "kube-audit",
    "kube-audit-admin",
    "kube-controller-manager",
    "kube-scheduler",
    "cluster-autoscaler",
    "cloud-controller-manager",
    "guard",
    "csi-azuredisk-controller",
    "csi-azurefile-controller",
    "csi-snapshot-controller",
    "fleet-member-agent",
    "fleet-member-net-controller-manager",
    "fleet-mcs-controller-manager",
];

/// Audit categories have no level-prefix convention in their schema, so the
/// builder never attaches a level predicate to them.
const AUDIT_CATEGORIES: [&str; 2] = ["kube-audit", "kube-audit-admin"];

/// Category to dedicated-table mapping, populated only for categories that
/// exist in resource-specific mode.
static CATEGORY_TABLES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("kube-audit", "AKSAudit"),
        ("kube-audit-admin", "AKSAuditAdmin"),
        ("kube-apiserver", "AKSControlPlane"),
        ("kube-controller-manager", "AKSControlPlane"),
        ("kube-scheduler", "AKSControlPlane"),
        ("cluster-autoscaler", "AKSControlPlane"),
        ("cloud-controller-manager", "AKSControlPlane"),
    ])
});

/// How a level name renders in each table family: a single message-prefix
/// letter on the shared table, an exact level string on dedicated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFilter {
    pub message_prefix: char,
    pub level_value: &'static str,
}

static LEVEL_FILTERS: LazyLock<HashMap<&'static str, LevelFilter>> = LazyLock::new(|| {
    HashMap::from([
        ("info", LevelFilter { message_prefix: 'I', level_value: "INFO" }),
        ("warning", LevelFilter { message_prefix: 'W', level_value: "WARNING" }),
        ("error", LevelFilter { message_prefix: 'E', level_value: "ERROR" }),
    ])
});

pub fn is_audit_category(category: &str) -> bool {
    AUDIT_CATEGORIES.contains(&category)
}

/// Dedicated table for a category, when one exists.
pub fn dedicated_table(category: &str) -> Option<&'static str> {
    CATEGORY_TABLES.get(category).copied()
}

/// Filter spec for a known level name; `None` for unknown names and for the
/// empty string.
pub fn level_filter(level: &str) -> Option<LevelFilter> {
    LEVEL_FILTERS.get(level).copied()
}

/// Projection for a table, by shape: audit tables carry structured request
/// fields, everything else projects timestamp/level/message.
pub fn projection(table: &str) -> &'static str {
    match table {
        "AKSAudit" | "AKSAuditAdmin" => {
            "TimeGenerated, Level, AuditId, Stage, RequestUri, Verb, User"
        }
        SHARED_TABLE => "TimeGenerated, Level, log_s",
        _ => "TimeGenerated, Level, Message",
    }
}
