//! Fault injection port.

/// Decides, per request, whether to short-circuit with a simulated
/// upstream failure.
///
/// Implementations may be random or scripted; callers only see the verdict.
pub trait FaultStrategy: Send + Sync + 'static {
    fn should_fail(&self) -> bool;
}
