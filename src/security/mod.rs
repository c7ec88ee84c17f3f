//! Security module for command authorization.
//!
//! Every command an agent asks us to run passes through [`validate`] before it
//! gets anywhere near a shell: first an injection scan (shell metacharacters,
//! here-document structure), then an access-level check against the read
//! allow-list. A command that fails any step must not be executed.

mod allowlist;
mod injection;

pub use allowlist::Allowlist;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access level configured once per process; gates which operation classes
/// the agent may submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Only commands classified as read operations are accepted.
    ReadOnly,
    /// Read and write operations are accepted.
    ReadWrite,
    /// All operations are accepted (injection checks still apply).
    Admin,
}

/// Rejection reasons for command validation. None of these are retryable:
/// the caller must treat a rejection as "do not execute".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("injection detected: {0}")]
    InjectionDetected(String),

    #[error("malformed here-document: {0}")]
    MalformedHereDocument(String),

    #[error("access denied: {0}")]
    AccessDenied(String),
}

impl CommandError {
    /// Stable machine-readable name for the error kind, used in CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InjectionDetected(_) => "injection_detected",
            Self::MalformedHereDocument(_) => "malformed_heredoc",
            Self::AccessDenied(_) => "access_denied",
        }
    }
}

/// Validate a raw command string against the injection policy and the
/// default read allow-list.
///
/// Injection and here-document failures take precedence over the access-level
/// check: an admin-level caller submitting `az aks create; rm -rf /` is still
/// rejected.
pub fn validate(command: &str, access_level: AccessLevel) -> Result<(), CommandError> {
    validate_with(command, access_level, allowlist::default_allowlist())
}

/// Same as [`validate`] but with a caller-supplied allow-list.
pub fn validate_with(
    command: &str,
    access_level: AccessLevel,
    allowlist: &Allowlist,
) -> Result<(), CommandError> {
    injection::scan(command)?;

    if access_level == AccessLevel::ReadOnly && !allowlist.is_read_operation(command) {
        tracing::warn!(command, "rejecting non-read command under read-only access");
        return Err(CommandError::AccessDenied(format!(
            "'{}' is not a recognized read-only operation",
            first_tokens(command, 3)
        )));
    }

    tracing::debug!(command, ?access_level, "command accepted");
    Ok(())
}

/// Leading tokens of a command, for error messages that should not echo
/// arbitrary payloads back verbatim.
fn first_tokens(command: &str, n: usize) -> String {
    command
        .split_whitespace()
        .take(n)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_LEVELS: [AccessLevel; 3] = [
        AccessLevel::ReadOnly,
        AccessLevel::ReadWrite,
        AccessLevel::Admin,
    ];

    #[test]
    fn test_read_command_accepted_under_readonly() {
        let result = validate("az aks show --name x --resource-group y", AccessLevel::ReadOnly);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_injection_rejected_even_for_admin() {
        let result = validate("az aks create --name x; rm -rf /", AccessLevel::Admin);
        assert!(matches!(result, Err(CommandError::InjectionDetected(_))));
    }

    #[test]
    fn test_injection_rejected_at_every_access_level() {
        let attacks = [
            "az aks list; whoami",
            "az aks list | tee /etc/passwd",
            "az aks list && az aks delete",
            "az aks list || true",
            "az aks list > /tmp/out",
            "az aks list >> /tmp/out",
            "az aks list `whoami`",
            "az aks list $(whoami)",
            "az aks list ${HOME}",
            "az aks list & az aks delete",
        ];
        for cmd in attacks {
            for level in ALL_LEVELS {
                assert!(
                    matches!(validate(cmd, level), Err(CommandError::InjectionDetected(_))),
                    "expected injection rejection for {cmd:?} at {level:?}"
                );
            }
        }
    }

    #[test]
    fn test_write_command_rejected_under_readonly() {
        let result = validate("az aks delete --name x --resource-group y", AccessLevel::ReadOnly);
        assert!(matches!(result, Err(CommandError::AccessDenied(_))));
    }

    #[test]
    fn test_write_command_accepted_under_readwrite_and_admin() {
        let cmd = "az aks create --name x --resource-group y --node-count 3";
        assert_eq!(validate(cmd, AccessLevel::ReadWrite), Ok(()));
        assert_eq!(validate(cmd, AccessLevel::Admin), Ok(()));
    }

    #[test]
    fn test_help_is_read_only_at_any_level() {
        assert_eq!(validate("az aks create --help", AccessLevel::ReadOnly), Ok(()));
        assert_eq!(validate("az aks delete -h", AccessLevel::ReadOnly), Ok(()));
    }

    #[test]
    fn test_heredoc_failure_beats_access_check() {
        // Malformed here-document is fatal even though Admin would otherwise
        // accept the command without classification.
        let result = validate("az deployment create << EOF", AccessLevel::Admin);
        assert!(matches!(result, Err(CommandError::MalformedHereDocument(_))));
    }

    #[test]
    fn test_custom_allowlist() {
        let mut allowlist = Allowlist::new();
        allowlist.allow_prefix("kubectl get");
        assert_eq!(
            validate_with("kubectl get pods -A", AccessLevel::ReadOnly, &allowlist),
            Ok(())
        );
        assert!(matches!(
            validate_with("kubectl delete pod x", AccessLevel::ReadOnly, &allowlist),
            Err(CommandError::AccessDenied(_))
        ));
    }
}
