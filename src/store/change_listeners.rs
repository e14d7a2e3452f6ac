use std::fmt;
use std::sync::Arc;

pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Ordered listener registry. Identity is the `Arc` allocation.
#[derive(Clone, Default)]
pub struct ChangeListeners {
    listeners: Vec<ChangeListener>,
}

impl ChangeListeners {
    pub fn add(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    /// Drops every registration of `listener`.
    pub fn remove(&mut self, listener: &ChangeListener) {
        self.listeners
            .retain(|registered| !Arc::ptr_eq(registered, listener));
    }

    pub fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}

impl fmt::Debug for ChangeListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting() -> (Arc<AtomicUsize>, ChangeListener) {
        let calls = Arc::new(AtomicUsize::new(0));
        let listener: ChangeListener = {
            let calls = Arc::clone(&calls);
            Arc::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };

        (calls, listener)
    }

    #[test]
    fn duplicate_registration_fires_twice() {
        let (calls, listener) = counting();
        let mut listeners = ChangeListeners::default();
        listeners.add(Arc::clone(&listener));
        listeners.add(listener);

        listeners.notify();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn remove_drops_every_copy_of_that_listener_only() {
        let (first_calls, first) = counting();
        let (second_calls, second) = counting();
        let mut listeners = ChangeListeners::default();
        listeners.add(Arc::clone(&first));
        listeners.add(Arc::clone(&second));
        listeners.add(Arc::clone(&first));

        listeners.remove(&first);
        listeners.notify();

        assert_eq!(first_calls.load(Ordering::SeqCst), 0);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn equal_closures_are_distinct_listeners() {
        let calls = Arc::new(AtomicUsize::new(0));
        let make = || -> ChangeListener {
            let calls = Arc::clone(&calls);
            Arc::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };
        let a = make();
        let b = make();
        let mut listeners = ChangeListeners::default();
        listeners.add(Arc::clone(&a));
        listeners.add(b);

        listeners.remove(&a);
        listeners.notify();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
