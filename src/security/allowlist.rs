//! Command allow-list management.
//!
//! The allow-list holds token-prefix sequences classified as read operations.
//! A command is read-classified when its leading whitespace tokens match an
//! entry token-for-token, or when it carries a help flag (help output is
//! always read-only). Entries are built once at startup and never mutated
//! afterwards, so concurrent lookups need no locking.

use std::sync::LazyLock;

/// `az` command prefixes that only read cluster or account state.
/// Prefix lengths vary between 2 and 5 tokens.
const DEFAULT_READ_PREFIXES: &[&str] = &[
    "az account list",
    "az account show",
    "az aks show",
    "az aks list",
    "az aks get-versions",
    "az aks get-upgrades",
    "az aks nodepool list",
    "az aks nodepool show",
    "az aks nodepool get-upgrades",
    "az aks machine list",
    "az aks machine show",
    "az group show",
    "az group list",
    "az monitor diagnostic-settings list",
    "az monitor diagnostic-settings show",
    "az monitor log-analytics workspace show",
    "az monitor log-analytics query",
    "az vmss list",
    "az vmss show",
    "az vmss list-instances",
    "az network vnet show",
    "az network vnet list",
    "az network vnet subnet show",
    "az network vnet subnet list",
    "az network nsg show",
    "az network route-table show",
    "az network lb list",
    "az network lb show",
    "az network public-ip list",
    "az network public-ip show",
    "az network private-endpoint show",
];

static DEFAULT_ALLOWLIST: LazyLock<Allowlist> = LazyLock::new(Allowlist::with_defaults);

/// Process-wide allow-list built from [`DEFAULT_READ_PREFIXES`].
pub(crate) fn default_allowlist() -> &'static Allowlist {
    &DEFAULT_ALLOWLIST
}

/// Ordered set of token-prefix sequences classified as read operations.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    entries: Vec<Vec<String>>,
}

impl Allowlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in read-only `az` prefixes.
    pub fn with_defaults() -> Self {
        let mut list = Self::new();
        for prefix in DEFAULT_READ_PREFIXES {
            list.allow_prefix(prefix);
        }
        list
    }

    /// Register a prefix; it is tokenized on whitespace. Empty prefixes are
    /// ignored so that nothing can accidentally allow every command.
    pub fn allow_prefix(&mut self, prefix: &str) {
        let tokens: Vec<String> = prefix.split_whitespace().map(str::to_string).collect();
        if !tokens.is_empty() {
            self.entries.push(tokens);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the command is classified as a read operation: help flag
    /// present, or some entry's tokens align 1:1 with the command's leading
    /// tokens.
    pub fn is_read_operation(&self, command: &str) -> bool {
        let tokens: Vec<&str> = command.split_whitespace().collect();
        if tokens.iter().any(|t| *t == "--help" || *t == "-h") {
            return true;
        }
        self.matches_prefix(&tokens)
    }

    fn matches_prefix(&self, tokens: &[&str]) -> bool {
        self.entries.iter().any(|entry| {
            entry.len() <= tokens.len()
                && entry.iter().zip(tokens).all(|(want, got)| want == got)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_populated() {
        let list = Allowlist::with_defaults();
        assert!(!list.is_empty());
        assert_eq!(list.len(), DEFAULT_READ_PREFIXES.len());
    }

    #[test]
    fn test_prefix_matches_longer_command() {
        let list = Allowlist::with_defaults();
        assert!(list.is_read_operation("az aks show --name demo --resource-group rg"));
        assert!(list.is_read_operation("az network vnet subnet list --vnet-name v -g rg"));
    }

    #[test]
    fn test_match_is_token_for_token() {
        let list = Allowlist::with_defaults();
        // "showx" must not match the "show" entry by substring.
        assert!(!list.is_read_operation("az aks showx --name demo"));
        // Bare "az aks" is shorter than every aks entry.
        assert!(!list.is_read_operation("az aks"));
    }

    #[test]
    fn test_write_prefixes_do_not_match() {
        let list = Allowlist::with_defaults();
        assert!(!list.is_read_operation("az aks create --name demo"));
        assert!(!list.is_read_operation("az aks delete --name demo"));
        assert!(!list.is_read_operation("az group delete --name rg"));
    }

    #[test]
    fn test_help_flag_always_reads() {
        let list = Allowlist::with_defaults();
        assert!(list.is_read_operation("az aks create --help"));
        assert!(list.is_read_operation("az aks delete -h"));
        assert!(list.is_read_operation("az aks -h create"));
        // "-help" and "--h" are neither flag.
        assert!(!list.is_read_operation("az aks create -help"));
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let mut list = Allowlist::new();
        list.allow_prefix("   ");
        assert!(list.is_empty());
        assert!(!list.is_read_operation("anything at all"));
    }

    #[test]
    fn test_extra_whitespace_in_command() {
        let list = Allowlist::with_defaults();
        assert!(list.is_read_operation("  az   aks   show  --name demo "));
    }
}
