use crate::domain::{command::Command, outcome::Outcome};

/// One command/reply exchange with the remote sensor node.
///
/// Implementations never fail outside of [`Outcome`]: every transport
/// problem, including the deadline elapsing, is reported as a variant.
/// Replies are not correlated to requests, so callers must keep at most
/// one exchange in flight per instance.
pub trait SensorCommandDrivenPort {
    fn send_command(&self, command: &Command) -> impl Future<Output = Outcome> + Send;
}
