//! Device command port — actuating entities on the host.

use std::future::Future;

use nightwatch_domain::command::Command;
use nightwatch_domain::error::NightwatchError;

/// Executes device commands against the host.
pub trait DeviceCommands {
    /// Execute a single command.
    fn execute(&self, command: Command) -> impl Future<Output = Result<(), NightwatchError>> + Send;
}

impl<T: DeviceCommands + Send + Sync> DeviceCommands for std::sync::Arc<T> {
    fn execute(&self, command: Command) -> impl Future<Output = Result<(), NightwatchError>> + Send {
        (**self).execute(command)
    }
}
