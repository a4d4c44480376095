use crate::runtime::RuntimeHandle;
use crate::TickerId;
use std::rc::Rc;

impl RuntimeHandle {
    /// Registers `callback` to fire every `period_millis` of pumped time,
    /// starting one period from now. The callback keeps firing until the
    /// returned registration is cancelled or dropped.
    pub fn set_interval(
        &self,
        period_millis: u64,
        callback: impl Fn() + 'static,
    ) -> TickerRegistration {
        match self.register_ticker(period_millis, Rc::new(callback)) {
            Some(id) => TickerRegistration::new(self.clone(), id),
            None => TickerRegistration::inactive(self.clone()),
        }
    }
}

/// Owned handle to a repeating ticker. Dropping it stops the ticker.
pub struct TickerRegistration {
    runtime: RuntimeHandle,
    id: Option<TickerId>,
}

impl TickerRegistration {
    fn new(runtime: RuntimeHandle, id: TickerId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_ticker(id);
        }
    }
}

impl Drop for TickerRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_ticker(id);
        }
    }
}
