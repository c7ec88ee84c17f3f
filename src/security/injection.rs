//! Injection scanning for agent-submitted commands.
//!
//! The command string comes out of a language model and is untrusted. Before
//! anything is handed to a shell we reject every construct that could chain,
//! redirect, or substitute a second command. The only tolerated multi-token
//! construct is a structurally complete here-document, which legitimate
//! commands use to pass inline JSON/YAML payloads.

use super::CommandError;

/// Scan a command for shell metacharacters and here-document structure.
///
/// Rejected unconditionally: `;` `|` `&` `` ` `` `$(` `${` `>` and a single
/// `<` that is not part of `<<`. Newlines and carriage returns are rejected
/// unless the command is a complete here-document, where they separate the
/// payload lines.
pub(crate) fn scan(command: &str) -> Result<(), CommandError> {
    let heredoc = if command.contains("<<") {
        check_heredoc(command)?;
        true
    } else {
        false
    };

    let bytes = command.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b';' => return Err(reject("command chaining with ';'")),
            b'|' => return Err(reject("pipe or '||' operator")),
            b'&' => return Err(reject("background or '&&' operator")),
            b'`' => return Err(reject("backtick command substitution")),
            b'>' => return Err(reject("output redirection")),
            b'$' => {
                if matches!(bytes.get(i + 1), Some(b'(') | Some(b'{')) {
                    return Err(reject("command or variable substitution"));
                }
            }
            b'<' => {
                if bytes.get(i + 1) == Some(&b'<') {
                    // Here-document marker, already structurally checked.
                    i += 2;
                    continue;
                }
                return Err(reject("input redirection with single '<'"));
            }
            b'\n' | b'\r' => {
                if !heredoc {
                    return Err(reject("newline outside a here-document"));
                }
            }
            _ => {}
        }
        i += 1;
    }

    Ok(())
}

/// Structural check for a here-document.
///
/// This is a best-effort heuristic, not a shell grammar. A delimiter token
/// must follow `<<`. A single-line here-document (no newline in the command)
/// must additionally carry an inline payload after the delimiter and more
/// than 3 tokens before `<<`, so that `--template-body << EOF {...} EOF`
/// passes while a minimal `create << EOF` does not.
fn check_heredoc(command: &str) -> Result<(), CommandError> {
    let Some(marker) = command.find("<<") else {
        return Ok(());
    };
    let before = &command[..marker];
    let after = &command[marker + 2..];

    let after_tokens = after.split_whitespace().count();
    if after_tokens == 0 {
        return Err(CommandError::MalformedHereDocument(
            "no delimiter after '<<'".into(),
        ));
    }

    let multi_line = command.contains('\n') || command.contains('\r');
    if !multi_line {
        if after_tokens < 2 {
            return Err(CommandError::MalformedHereDocument(
                "single-line here-document carries no payload".into(),
            ));
        }
        if before.split_whitespace().count() <= 3 {
            return Err(CommandError::MalformedHereDocument(
                "too few arguments before '<<' for a real invocation".into(),
            ));
        }
    }

    Ok(())
}

fn reject(reason: &str) -> CommandError {
    CommandError::InjectionDetected(reason.to_string())
}
