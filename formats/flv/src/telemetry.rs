use tracing::{Dispatch, dispatcher};

/// Logging capability handed to each reader when it is built.
///
/// Events are routed through the carried [`Dispatch`] instead of whatever
/// subscriber happens to be the process wide default, so two streams parsed
/// side by side can log to different places.
#[derive(Debug, Clone)]
pub struct Telemetry {
    dispatch: Dispatch,
}

impl Telemetry {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Capture the dispatcher that is current for the calling thread.
    pub fn current() -> Self {
        dispatcher::get_default(|dispatch| Self::new(dispatch.clone()))
    }

    /// Drop every event.
    pub fn none() -> Self {
        Self::new(Dispatch::none())
    }

    #[inline]
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::current()
    }
}

impl From<Dispatch> for Telemetry {
    fn from(value: Dispatch) -> Self {
        Self::new(value)
    }
}
