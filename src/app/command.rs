use crate::app::command_palette::PendingAction;

/// Side effects the runtime performs after a reducer step.
#[derive(Debug)]
pub enum Command {
    /// Drive asynchronous action invocations to completion.
    RunActions(Vec<PendingAction>),
}
