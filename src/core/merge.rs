//! Attribute merging
//!
//! Order is fixed: bound attributes, then call-site attributes, then values
//! resolved from the ambient context in the order their keys were declared.
//! Context keys with no value are skipped. Duplicate keys are kept.

use super::log_context::{Attr, ContextKey, FieldValue, LogContext};

pub fn merge_attrs(
    bound: &[Attr],
    call_site: Vec<Attr>,
    context_keys: &[ContextKey],
    ctx: &LogContext,
) -> Vec<Attr> {
    let mut merged = Vec::with_capacity(bound.len() + call_site.len() + context_keys.len());
    merged.extend_from_slice(bound);
    merged.extend(call_site);
    merged.extend(resolve_context(context_keys, ctx));
    merged
}

/// Context values for the given keys, stringified
pub fn resolve_context<'a>(
    context_keys: &'a [ContextKey],
    ctx: &'a LogContext,
) -> impl Iterator<Item = Attr> + 'a {
    context_keys.iter().filter_map(move |key| {
        ctx.lookup(key)
            .map(|value| Attr::new(key.name(), FieldValue::String(value.to_string())))
    })
}
