//! Matching path segments to struct fields.

use crate::shape::FieldInfo;

/// The names a field answers to, in priority order.
const STRATEGIES: [fn(&FieldInfo) -> Option<&'static str>; 3] =
    [param_rename, serde_rename, declared_name];

fn param_rename(field: &FieldInfo) -> Option<&'static str> {
    field.rename
}

fn serde_rename(field: &FieldInfo) -> Option<&'static str> {
    field.serde_rename
}

fn declared_name(field: &FieldInfo) -> Option<&'static str> {
    Some(field.name)
}

/// Finds the index of the field `key` addresses.
///
/// Each strategy is tried against every field before moving to the next one,
/// so a `#[param(rename)]` on one field beats a plain field name on another.
/// Matching is exact and case-sensitive.
pub(crate) fn resolve_field(fields: &[FieldInfo], key: &str) -> Option<usize> {
    STRATEGIES.iter().find_map(|strategy| {
        fields
            .iter()
            .position(|field| strategy(field) == Some(key))
    })
}
