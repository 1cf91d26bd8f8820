use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use ember_common::{KeyCode, KeySequence};
use ember_kernel::Update;
use glam::DVec2;

/// Polling primitives of a window.
pub trait InputSource {
    fn key_state(&self, key: KeyCode) -> bool;
    fn cursor_position(&self) -> DVec2;
    fn scroll_offset(&self) -> DVec2;
}

impl<S: InputSource + ?Sized> InputSource for &S {
    fn key_state(&self, key: KeyCode) -> bool {
        (**self).key_state(key)
    }

    fn cursor_position(&self) -> DVec2 {
        (**self).cursor_position()
    }

    fn scroll_offset(&self) -> DVec2 {
        (**self).scroll_offset()
    }
}

impl<S: InputSource + ?Sized> InputSource for Rc<S> {
    fn key_state(&self, key: KeyCode) -> bool {
        (**self).key_state(key)
    }

    fn cursor_position(&self) -> DVec2 {
        (**self).cursor_position()
    }

    fn scroll_offset(&self) -> DVec2 {
        (**self).scroll_offset()
    }
}

impl<S: InputSource + ?Sized> InputSource for RefCell<S> {
    fn key_state(&self, key: KeyCode) -> bool {
        self.borrow().key_state(key)
    }

    fn cursor_position(&self) -> DVec2 {
        self.borrow().cursor_position()
    }

    fn scroll_offset(&self) -> DVec2 {
        self.borrow().scroll_offset()
    }
}

/// Whether every key of `sequence` is currently held on `source`.
///
/// The empty sequence is always held.
pub fn sequence_held(source: &impl InputSource, sequence: &KeySequence) -> bool {
    sequence.iter().all(|key| source.key_state(key))
}

/// Legacy polling view: key states of a watch list plus cursor and scroll,
/// refreshed by [`sample`](Self::sample).
///
/// Values only change on sampling, so every reader within a frame sees the
/// same state. Unwatched keys always read as released.
#[derive(Debug)]
pub struct InputSnapshot<S> {
    source: S,
    keys: BTreeMap<KeyCode, bool>,
    cursor: DVec2,
    scroll: DVec2,
}

impl<S: InputSource> InputSnapshot<S> {
    pub fn new(source: S) -> Self {
        let cursor = source.cursor_position();
        Self {
            source,
            keys: BTreeMap::new(),
            cursor,
            scroll: DVec2::ZERO,
        }
    }

    /// Add `key` to the watch list. It reads as released until the next sample.
    pub fn watch(&mut self, key: KeyCode) {
        self.keys.entry(key).or_insert(false);
    }

    /// Watch every key of `sequence`.
    pub fn watch_sequence(&mut self, sequence: &KeySequence) {
        for key in sequence.iter() {
            self.watch(key);
        }
    }

    pub fn unwatch(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    pub fn watched(&self) -> BTreeSet<KeyCode> {
        self.keys.keys().copied().collect()
    }

    pub fn sample(&mut self) {
        for (key, down) in self.keys.iter_mut() {
            *down = self.source.key_state(*key);
        }
        self.cursor = self.source.cursor_position();
        self.scroll = self.source.scroll_offset();
    }

    pub fn check_key(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    pub fn check_sequence(&self, sequence: &KeySequence) -> bool {
        sequence.iter().all(|key| self.check_key(key))
    }

    pub fn cursor_position(&self) -> DVec2 {
        self.cursor
    }

    pub fn scroll_offset(&self) -> DVec2 {
        self.scroll
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: InputSource> Update for InputSnapshot<S> {
    fn update(&mut self, _tick: u64) {
        self.sample();
    }
}
