/// Classification for failover policy.
///
/// Used by the failover executor to decide what happens to a provider after
/// one of its attempts fails. Every class moves on to the next provider; the
/// class only decides whether the failing provider is penalized.
///
/// # Behavior Summary
///
/// | Class | Try Next Provider? | Mark Provider Rate-Limited? |
/// |-------|-------------------|-----------------------------|
/// | `FailoverWithPenalty` | Yes | Yes (skipped until its cooldown elapses) |
/// | `NextProvider` | Yes | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Failover to next provider and put this one into cooldown.
    ///
    /// Used when the provider throttled the request. Later calls skip the
    /// provider until its cooldown period has elapsed.
    FailoverWithPenalty,

    /// Try next provider without recording any penalty.
    ///
    /// The provider stays immediately eligible for the next unrelated call.
    NextProvider,
}
