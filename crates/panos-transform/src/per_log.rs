//! Per-log positional and structural corrections.
//!
//! Each log type may carry an ordered list of edits that repair documented
//! format strings the vendor got wrong: a token at a fixed position or with
//! a known value is replaced, or split into several tokens. Edits are
//! applied in order, so later entries see the list as reshaped by earlier
//! splits. A broken entry is logged and skipped; it never fails the log
//! type.

use panos_model::{
    CorrectionAction, CorrectionEdit, CorrectionRules, CorrectionTarget, FUTURE_USE,
};
use tracing::{debug, warn};

/// Drop one leading [`FUTURE_USE`] token, if present.
pub fn strip_leading_future_use(mut tokens: Vec<String>) -> Vec<String> {
    if tokens.first().is_some_and(|token| token == FUTURE_USE) {
        tokens.remove(0);
    }
    tokens
}

/// Apply the optional leading strip, then every edit configured for `log_type`.
pub fn apply_per_log_corrections(
    tokens: Vec<String>,
    log_type: &str,
    rules: &CorrectionRules,
) -> Vec<String> {
    let tokens = if rules.strip_leading_future_use {
        strip_leading_future_use(tokens)
    } else {
        tokens
    };

    rules
        .corrections_for(log_type)
        .iter()
        .enumerate()
        .fold(tokens, |tokens, (index, correction)| match correction.edit() {
            Ok(edit) => apply_edit(tokens, &edit, log_type, index),
            Err(err) => {
                warn!(log_type, correction = index, error = %err, "skipping malformed correction");
                tokens
            }
        })
}

fn apply_edit(
    mut tokens: Vec<String>,
    edit: &CorrectionEdit,
    log_type: &str,
    index: usize,
) -> Vec<String> {
    let Some(position) = resolve_target(&tokens, &edit.target, log_type, index) else {
        return tokens;
    };
    match &edit.action {
        CorrectionAction::Replace(new) => {
            debug!(log_type, position, old = %tokens[position], new = %new, "replacing token");
            tokens[position] = new.clone();
        }
        CorrectionAction::Split(parts) => {
            debug!(log_type, position, old = %tokens[position], parts = ?parts, "splitting token");
            tokens.splice(position..=position, parts.iter().cloned());
        }
    }
    tokens
}

/// Index the edit applies to, or `None` (logged) when it cannot apply.
fn resolve_target(
    tokens: &[String],
    target: &CorrectionTarget,
    log_type: &str,
    index: usize,
) -> Option<usize> {
    match target {
        CorrectionTarget::Match(value) => {
            let found = tokens.iter().position(|token| token == value);
            if found.is_none() {
                warn!(
                    log_type,
                    correction = index,
                    value = %value,
                    "match value not found in token list"
                );
            }
            found
        }
        CorrectionTarget::Position(position) => {
            let found = usize::try_from(*position)
                .ok()
                .filter(|position| *position < tokens.len());
            if found.is_none() {
                warn!(
                    log_type,
                    correction = index,
                    position,
                    len = tokens.len(),
                    "position out of bounds"
                );
            }
            found
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn strip_only_touches_the_first_token() {
        assert_eq!(
            strip_leading_future_use(tokens(&["FUTURE_USE", "a", "FUTURE_USE"])),
            tokens(&["a", "FUTURE_USE"])
        );
        assert_eq!(
            strip_leading_future_use(tokens(&["a", "FUTURE_USE"])),
            tokens(&["a", "FUTURE_USE"])
        );
        assert!(strip_leading_future_use(Vec::new()).is_empty());
    }

    #[test]
    fn negative_position_is_out_of_bounds() {
        assert_eq!(
            resolve_target(&tokens(&["a"]), &CorrectionTarget::Position(-1), "T", 0),
            None
        );
    }
}
