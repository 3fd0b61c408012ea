use crate::ports::ProgressObserver;

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressObserver;

impl ProgressObserver for NoopProgressObserver {}
