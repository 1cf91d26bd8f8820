use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use ember_common::{Action, Scancode};

/// Callback fired for a held scancode on every tick. Returning `true`
/// removes the binding from the scancode it fired for.
///
/// Shared so that one binding can serve several scancodes.
pub type KeyBinding = Rc<RefCell<dyn FnMut(Scancode, Action) -> bool>>;

/// Wrap a closure as a [`KeyBinding`].
pub fn key_binding<F>(f: F) -> KeyBinding
where
    F: FnMut(Scancode, Action) -> bool + 'static,
{
    Rc::new(RefCell::new(f))
}

/// Scancode → binding table plus the last action seen per scancode.
///
/// Bindings are re-armed every tick while their key is held: `tick` calls
/// the binding for each recorded action, and a release is delivered once
/// before the record is forgotten. No table borrow is held while a binding
/// runs, so bindings may bind or unbind scancodes themselves.
#[derive(Default)]
pub struct ScancodeBindings {
    bindings: RefCell<BTreeMap<Scancode, KeyBinding>>,
    actions: RefCell<BTreeMap<Scancode, Action>>,
}

impl ScancodeBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `binding` for `scancode`. Fails (returns `false`) when the
    /// scancode is already bound and `overwrite` is not set.
    pub fn bind(&self, scancode: Scancode, binding: KeyBinding, overwrite: bool) -> bool {
        let previous = {
            let mut bindings = self.bindings.borrow_mut();
            if !overwrite && bindings.contains_key(&scancode) {
                tracing::debug!(scancode = scancode.0, "scancode already bound");
                return false;
            }
            bindings.insert(scancode, binding)
        };
        drop(previous);
        tracing::debug!(scancode = scancode.0, overwrite, "scancode bound");
        true
    }

    pub fn unbind(&self, scancode: Scancode) -> Option<KeyBinding> {
        self.bindings.borrow_mut().remove(&scancode)
    }

    pub fn is_bound(&self, scancode: Scancode) -> bool {
        self.bindings.borrow().contains_key(&scancode)
    }

    pub fn record_action(&self, scancode: Scancode, action: Action) {
        self.actions.borrow_mut().insert(scancode, action);
    }

    pub fn recorded_action(&self, scancode: Scancode) -> Option<Action> {
        self.actions.borrow().get(&scancode).copied()
    }

    /// Number of scancodes with a recorded action pending.
    pub fn pending(&self) -> usize {
        self.actions.borrow().len()
    }

    /// Fire bindings for every recorded action in ascending scancode order.
    /// Returns how many bindings were invoked.
    pub fn tick(&self) -> usize {
        let recorded: Vec<(Scancode, Action)> = self
            .actions
            .borrow()
            .iter()
            .map(|(sc, action)| (*sc, *action))
            .collect();

        let mut invoked = 0;
        for (scancode, action) in recorded {
            let binding = self.bindings.borrow().get(&scancode).cloned();
            if let Some(binding) = binding {
                let done = match binding.try_borrow_mut() {
                    Ok(mut f) => Some((&mut *f)(scancode, action)),
                    Err(_) => {
                        tracing::warn!(scancode = scancode.0, "binding already running, skipped");
                        None
                    }
                };
                if let Some(done) = done {
                    invoked += 1;
                    if done {
                        self.unbind_if_current(scancode, &binding);
                    }
                }
            }
            if action.is_release() {
                // A press recorded while the binding ran is kept.
                let mut actions = self.actions.borrow_mut();
                if actions.get(&scancode) == Some(&action) {
                    actions.remove(&scancode);
                }
            }
        }
        invoked
    }

    fn unbind_if_current(&self, scancode: Scancode, binding: &KeyBinding) {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.get(&scancode).is_some_and(|b| Rc::ptr_eq(b, binding)) {
            bindings.remove(&scancode);
            tracing::debug!(scancode = scancode.0, "binding finished, unbound");
        }
    }
}

impl std::fmt::Debug for ScancodeBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScancodeBindings")
            .field("bound", &self.bindings.borrow().keys().collect::<Vec<_>>())
            .field("actions", &*self.actions.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Seen = Rc<RefCell<Vec<(Scancode, Action)>>>;

    fn recording(seen: &Seen, done: bool) -> KeyBinding {
        let seen = seen.clone();
        key_binding(move |sc, action| {
            seen.borrow_mut().push((sc, action));
            done
        })
    }

    const W: Scancode = Scancode(0x11);
    const A: Scancode = Scancode(0x1E);

    #[test]
    fn second_bind_without_overwrite_keeps_first() {
        let first = Seen::default();
        let second = Seen::default();
        let table = ScancodeBindings::new();
        assert!(table.bind(W, recording(&first, false), false));
        assert!(!table.bind(W, recording(&second, false), false));

        table.record_action(W, Action::Press);
        table.tick();
        assert_eq!(first.borrow().len(), 1);
        assert!(second.borrow().is_empty());

        assert!(table.bind(W, recording(&second, false), true));
        table.tick();
        assert_eq!(first.borrow().len(), 1);
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn held_key_fires_every_tick_and_release_once() {
        let seen = Seen::default();
        let table = ScancodeBindings::new();
        table.bind(W, recording(&seen, false), false);

        table.record_action(W, Action::Press);
        table.tick();
        table.tick();
        table.tick();
        table.record_action(W, Action::Release);
        table.tick();
        table.tick();

        assert_eq!(
            *seen.borrow(),
            vec![
                (W, Action::Press),
                (W, Action::Press),
                (W, Action::Press),
                (W, Action::Release),
            ]
        );
        assert_eq!(table.recorded_action(W), None);
    }

    #[test]
    fn repeat_replaces_press_record() {
        let seen = Seen::default();
        let table = ScancodeBindings::new();
        table.bind(W, recording(&seen, false), false);
        table.record_action(W, Action::Press);
        table.record_action(W, Action::Repeat);
        table.tick();
        assert_eq!(*seen.borrow(), vec![(W, Action::Repeat)]);
    }

    #[test]
    fn binding_returning_true_is_unbound() {
        let seen = Seen::default();
        let table = ScancodeBindings::new();
        table.bind(W, recording(&seen, true), false);
        table.record_action(W, Action::Press);

        assert_eq!(table.tick(), 1);
        assert!(!table.is_bound(W));
        assert_eq!(table.tick(), 0);
        assert_eq!(table.recorded_action(W), Some(Action::Press));
    }

    #[test]
    fn shared_binding_serves_several_scancodes_in_order() {
        let seen = Seen::default();
        let shared = recording(&seen, false);
        let table = ScancodeBindings::new();
        table.bind(A, shared.clone(), false);
        table.bind(W, shared, false);

        table.record_action(A, Action::Press);
        table.record_action(W, Action::Press);
        table.tick();
        assert_eq!(*seen.borrow(), vec![(W, Action::Press), (A, Action::Press)]);
    }

    #[test]
    fn unbound_release_record_is_still_erased() {
        let table = ScancodeBindings::new();
        table.record_action(A, Action::Press);
        table.record_action(A, Action::Release);
        assert_eq!(table.tick(), 0);
        assert_eq!(table.pending(), 0);
    }

    #[test]
    fn binding_finishing_on_release_is_unbound_and_record_erased() {
        let seen = Seen::default();
        let log = seen.clone();
        let table = ScancodeBindings::new();
        table.bind(
            W,
            key_binding(move |sc, action| {
                log.borrow_mut().push((sc, action));
                action.is_release()
            }),
            false,
        );

        table.record_action(W, Action::Press);
        assert_eq!(table.tick(), 1);
        table.record_action(W, Action::Release);
        assert_eq!(table.tick(), 1);

        assert!(!table.is_bound(W));
        assert_eq!(table.recorded_action(W), None);
        assert_eq!(table.pending(), 0);
        assert_eq!(*seen.borrow(), vec![(W, Action::Press), (W, Action::Release)]);
    }

    #[test]
    fn binding_can_bind_another_scancode_while_firing() {
        let seen = Seen::default();
        let table = Rc::new(ScancodeBindings::new());
        let weak = Rc::downgrade(&table);
        let follow_up = recording(&seen, false);
        table.bind(
            W,
            key_binding(move |_, _| {
                if let Some(table) = weak.upgrade() {
                    table.bind(A, follow_up.clone(), false);
                }
                true
            }),
            false,
        );

        table.record_action(W, Action::Press);
        table.record_action(A, Action::Press);
        // W sorts before A, so the new binding already fires this tick.
        assert_eq!(table.tick(), 2);
        assert!(table.is_bound(A));
        assert!(!table.is_bound(W));
        assert_eq!(table.tick(), 1);
        assert_eq!(*seen.borrow(), vec![(A, Action::Press), (A, Action::Press)]);
    }

    #[test]
    fn rebinding_own_scancode_survives_finishing() {
        let seen = Seen::default();
        let table = Rc::new(ScancodeBindings::new());
        let weak = Rc::downgrade(&table);
        let replacement = recording(&seen, false);
        table.bind(
            W,
            key_binding(move |_, _| {
                if let Some(table) = weak.upgrade() {
                    table.bind(W, replacement.clone(), true);
                }
                true
            }),
            false,
        );

        table.record_action(W, Action::Press);
        table.tick();
        assert!(table.is_bound(W));
        table.tick();
        assert_eq!(*seen.borrow(), vec![(W, Action::Press)]);
    }

    #[test]
    fn unbind_returns_binding() {
        let seen = Seen::default();
        let table = ScancodeBindings::new();
        table.bind(W, recording(&seen, false), false);
        assert!(table.unbind(W).is_some());
        assert!(table.unbind(W).is_none());
    }
}
