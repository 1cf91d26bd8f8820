use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use ember_common::WindowHandle;

use crate::events::RawEvent;
use crate::router::{InputRouter, RouterId};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("no input router is attached to window {0:?}")]
    UnknownWindow(WindowHandle),
}

#[derive(Default)]
pub(crate) struct RegistryState {
    routers: HashMap<WindowHandle, (RouterId, Weak<InputRouter>)>,
}

/// Window handle → router lookup used by the windowing layer.
///
/// Cheap to clone; clones share one table. Routers register themselves on
/// [`attach`](Self::attach) and unregister when dropped.
#[derive(Clone, Default)]
pub struct RouterRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl RouterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the router for `handle` and register it.
    ///
    /// Attaching a handle that already has a router redirects the handle to
    /// the new router. The old router keeps working if still held, but no
    /// longer receives raw events.
    pub fn attach(&self, handle: WindowHandle) -> Rc<InputRouter> {
        let id = RouterId::new();
        let router = Rc::new(InputRouter::new(handle, id, Rc::downgrade(&self.state)));

        let mut state = self.state.borrow_mut();
        if state.routers.is_empty() {
            tracing::debug!("router registry populated");
        }
        if let Some((previous, _)) = state.routers.insert(handle, (id, Rc::downgrade(&router))) {
            tracing::warn!(
                window = handle.0,
                %previous,
                replacement = %id,
                "window re-attached, previous router no longer receives events"
            );
        } else {
            tracing::debug!(window = handle.0, router = %id, "router attached");
        }
        router
    }

    /// The live router registered for `handle`, if any.
    pub fn router(&self, handle: WindowHandle) -> Option<Rc<InputRouter>> {
        let state = self.state.borrow();
        state.routers.get(&handle).and_then(|(_, router)| router.upgrade())
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.state.borrow().routers.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().routers.is_empty()
    }

    /// Forward `event` to the router of `handle`.
    pub fn try_deliver(&self, handle: WindowHandle, event: RawEvent) -> Result<(), InputError> {
        // Release the table before calling in, consumers may attach or drop routers.
        let router = self.router(handle).ok_or(InputError::UnknownWindow(handle))?;
        router.handle_raw(event);
        Ok(())
    }

    /// Forward `event` to the router of `handle`.
    ///
    /// # Panics
    ///
    /// If no router is attached to `handle`. The windowing layer must only
    /// deliver events for windows it attached.
    pub fn deliver(&self, handle: WindowHandle, event: RawEvent) {
        if let Err(err) = self.try_deliver(handle, event) {
            panic!("raw event delivered without a router: {err}");
        }
    }
}

impl std::fmt::Debug for RouterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RouterRegistry")
            .field("windows", &state.routers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Remove the entry for `handle` if it still belongs to router `id`.
pub(crate) fn detach(state: &Weak<RefCell<RegistryState>>, handle: WindowHandle, id: RouterId) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = state.borrow_mut();
    let owned = matches!(state.routers.get(&handle), Some((owner, _)) if *owner == id);
    if !owned {
        tracing::debug!(window = handle.0, router = %id, "replaced router dropped");
        return;
    }
    state.routers.remove(&handle);
    tracing::debug!(window = handle.0, router = %id, "router detached");
    if state.routers.is_empty() {
        tracing::debug!("router registry empty");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{KeyEvent, ScrollEvent};
    use ember_common::keys::{key, scancode};
    use ember_common::{Action, Modifiers};
    use glam::DVec2;
    use std::cell::Cell;

    const H1: WindowHandle = WindowHandle(1);

    fn escape_press() -> RawEvent {
        RawEvent::Key(KeyEvent {
            key: key::ESCAPE,
            scancode: scancode::ESCAPE,
            action: Action::Press,
            mods: Modifiers::NONE,
        })
    }

    #[test]
    fn one_shot_key_consumer_end_to_end() {
        let registry = RouterRegistry::new();
        let router = registry.attach(H1);
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let sub = router.on_key(move |ev| {
            counter.set(counter.get() + 1);
            ev.key == key::ESCAPE
        });

        registry.deliver(H1, escape_press());
        assert_eq!(calls.get(), 1);
        assert!(!sub.is_active());

        registry.deliver(H1, escape_press());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn router_drop_removes_entry() {
        let registry = RouterRegistry::new();
        let router = registry.attach(H1);
        assert_eq!(registry.len(), 1);
        drop(router);
        assert!(registry.is_empty());
        assert!(registry.router(H1).is_none());
    }

    #[test]
    fn replaced_router_drop_keeps_new_owner() {
        let registry = RouterRegistry::new();
        let old = registry.attach(H1);
        let new = registry.attach(H1);
        drop(old);

        let found = registry.router(H1).unwrap();
        assert_eq!(found.id(), new.id());
    }

    #[test]
    fn events_reach_only_their_window() {
        let registry = RouterRegistry::new();
        let a = registry.attach(WindowHandle(10));
        let b = registry.attach(WindowHandle(20));
        registry.deliver(
            WindowHandle(20),
            RawEvent::Scroll(ScrollEvent {
                offset: DVec2::new(0.0, 2.0),
            }),
        );
        assert_eq!(a.scroll_offset(), DVec2::ZERO);
        assert_eq!(b.scroll_offset(), DVec2::new(0.0, 2.0));
    }

    #[test]
    fn try_deliver_reports_unknown_window() {
        let registry = RouterRegistry::new();
        let err = registry.try_deliver(H1, escape_press()).unwrap_err();
        assert!(matches!(err, InputError::UnknownWindow(WindowHandle(1))));
    }

    #[test]
    #[should_panic(expected = "without a router")]
    fn deliver_to_unknown_window_panics() {
        let registry = RouterRegistry::new();
        registry.deliver(WindowHandle(99), escape_press());
    }

    #[test]
    fn consumer_may_drop_the_last_outside_handle() {
        let registry = RouterRegistry::new();
        let router = registry.attach(H1);
        let holder = Rc::new(RefCell::new(Some(router)));

        let slot = holder.clone();
        let _sub = holder
            .borrow()
            .as_ref()
            .unwrap()
            .on_key(move |_| {
                slot.borrow_mut().take();
                true
            });

        registry.deliver(H1, escape_press());
        assert!(holder.borrow().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn consumer_reaching_its_router_through_the_registry() {
        let registry = RouterRegistry::new();
        let router = registry.attach(H1);
        let lookup = registry.clone();
        let nested = Rc::new(RefCell::new(Vec::new()));

        let keep = nested.clone();
        let _sub = router.on_key(move |_| {
            if let Some(r) = lookup.router(H1) {
                keep.borrow_mut().push(r.on_key(|_| true));
            }
            true
        });

        registry.deliver(H1, escape_press());
        assert_eq!(nested.borrow().len(), 1);
        assert!(nested.borrow()[0].is_active());
        registry.deliver(H1, escape_press());
        assert!(!nested.borrow()[0].is_active());
    }

    #[test]
    fn registry_outliving_nothing_is_fine() {
        let registry = RouterRegistry::new();
        let router = registry.attach(H1);
        drop(registry);
        router.handle_raw(escape_press());
        drop(router);
    }
}
