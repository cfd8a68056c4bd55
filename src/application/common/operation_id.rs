use crate::domain::identifiers::OperationId;

/// Mints a fresh, time-ordered operation id. Used when the ingress
/// message (or CLI invocation) carries none, or an unparseable one —
/// callers are expected to log a warning alongside this.
#[must_use]
pub fn default_factory() -> OperationId {
    OperationId::new()
}
