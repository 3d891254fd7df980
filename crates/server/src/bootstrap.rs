//! Operator registry initialization.

use crate::auth::OperatorRegistry;
use anyhow::{Result, bail};
use filegate_core::config::OperatorConfig;
use filegate_core::operator::Operator;
use std::collections::HashMap;
use time::OffsetDateTime;

/// Build the operator registry from configuration, validating every entry.
///
/// Hashes are normalized to lowercase hex (an optional `sha256:` prefix is
/// stripped) so config casing cannot break authentication lookups. Duplicate
/// hashes and malformed hashes fail startup; an already-expired entry only
/// logs a warning since it may be a not-yet-rotated leftover.
pub fn build_operator_registry(configs: &[OperatorConfig]) -> Result<OperatorRegistry> {
    if configs.is_empty() {
        bail!(
            "no operators configured; add at least one [[operators]] entry \
             with a token_hash and role"
        );
    }

    let mut operators = HashMap::new();
    let now = OffsetDateTime::now_utc();

    for (position, config) in configs.iter().enumerate() {
        let hash = config
            .token_hash
            .strip_prefix("sha256:")
            .unwrap_or(&config.token_hash)
            .to_lowercase();

        if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("operators[{position}]: invalid token_hash, expected 64 hex chars");
        }

        if let Some(expires_at) = config.expires_at
            && expires_at <= now
        {
            tracing::warn!(
                position,
                role = %config.role,
                "Configured operator token is already expired"
            );
        }

        let operator = Operator {
            role: config.role,
            description: config.description.clone(),
            expires_at: config.expires_at,
        };

        if operators.insert(hash, operator).is_some() {
            bail!("operators[{position}]: duplicate token_hash");
        }
    }

    tracing::info!(count = operators.len(), "Operator registry loaded");
    Ok(OperatorRegistry::new(operators))
}
