use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Weak;

use ember_common::{KeyCode, Scancode, WindowHandle};
use ember_kernel::SharedUpdate;
use glam::DVec2;
use uuid::Uuid;

use crate::bindings::{KeyBinding, ScancodeBindings};
use crate::consumer::{ConsumerStack, Subscription};
use crate::events::{
    CharEvent, CursorEnterEvent, CursorPosEvent, DropEvent, KeyEvent, MouseButtonEvent, RawEvent,
    ScrollEvent,
};
use crate::registry::{self, RegistryState};
use crate::snapshot::InputSource;

/// Identity of one router instance, distinct across re-attaches of the
/// same window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouterId(Uuid);

impl RouterId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-window input state and consumer chains.
///
/// Created through [`crate::RouterRegistry::attach`]; dropping the router
/// removes its registry entry.
///
/// Every method takes `&self` and no internal borrow is held while a
/// consumer or binding runs. Callbacks can therefore reach the router
/// through its `Rc` to push consumers, add bindings or feed events.
pub struct InputRouter {
    id: RouterId,
    handle: WindowHandle,
    registry: Weak<RefCell<RegistryState>>,

    cursor: Cell<DVec2>,
    scroll: Cell<DVec2>,
    pressed: RefCell<HashSet<KeyCode>>,

    keys: ConsumerStack<KeyEvent>,
    chars: ConsumerStack<CharEvent>,
    mouse_buttons: ConsumerStack<MouseButtonEvent>,
    cursor_moves: ConsumerStack<CursorPosEvent>,
    cursor_enters: ConsumerStack<CursorEnterEvent>,
    scrolls: ConsumerStack<ScrollEvent>,
    drops: ConsumerStack<DropEvent>,

    bindings: ScancodeBindings,
}

impl InputRouter {
    pub(crate) fn new(
        handle: WindowHandle,
        id: RouterId,
        registry: Weak<RefCell<RegistryState>>,
    ) -> Self {
        Self {
            id,
            handle,
            registry,
            cursor: Cell::new(DVec2::ZERO),
            scroll: Cell::new(DVec2::ZERO),
            pressed: RefCell::new(HashSet::new()),
            keys: ConsumerStack::new(),
            chars: ConsumerStack::new(),
            mouse_buttons: ConsumerStack::new(),
            cursor_moves: ConsumerStack::new(),
            cursor_enters: ConsumerStack::new(),
            scrolls: ConsumerStack::new(),
            drops: ConsumerStack::new(),
            bindings: ScancodeBindings::new(),
        }
    }

    pub fn id(&self) -> RouterId {
        self.id
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    /// Route one raw window event to its typed callback.
    pub fn handle_raw(&self, event: RawEvent) {
        match event {
            RawEvent::Key(ev) => self.key_callback(ev),
            RawEvent::Char(ev) => self.char_callback(ev),
            RawEvent::MouseButton(ev) => self.mouse_button_callback(ev),
            RawEvent::CursorPos(ev) => self.cursor_pos_callback(ev),
            RawEvent::CursorEnter(ev) => self.cursor_enter_callback(ev),
            RawEvent::Scroll(ev) => self.scroll_callback(ev),
            RawEvent::Drop(ev) => self.drop_callback(ev),
        }
    }

    // Raw callbacks. Stack dispatch always happens before any state the
    // router records for the event.

    pub fn key_callback(&self, event: KeyEvent) {
        let notified = self.keys.dispatch(&event);
        tracing::trace!(
            window = self.handle.0,
            key = event.key.0,
            scancode = event.scancode.0,
            action = ?event.action,
            notified,
            "key"
        );
        // Unnamed keys all share one key code, only their scancodes differ.
        if event.key != KeyCode::UNKNOWN {
            if event.action.is_down() {
                self.pressed.borrow_mut().insert(event.key);
            } else {
                self.pressed.borrow_mut().remove(&event.key);
            }
        }
        self.bindings.record_action(event.scancode, event.action);
    }

    pub fn char_callback(&self, event: CharEvent) {
        let notified = self.chars.dispatch(&event);
        tracing::trace!(window = self.handle.0, codepoint = event.codepoint, notified, "char");
    }

    pub fn mouse_button_callback(&self, event: MouseButtonEvent) {
        let notified = self.mouse_buttons.dispatch(&event);
        tracing::trace!(
            window = self.handle.0,
            button = ?event.button,
            action = ?event.action,
            notified,
            "mouse button"
        );
    }

    pub fn cursor_pos_callback(&self, event: CursorPosEvent) {
        self.cursor_moves.dispatch(&event);
        self.cursor.set(event.position);
    }

    pub fn cursor_enter_callback(&self, event: CursorEnterEvent) {
        let notified = self.cursor_enters.dispatch(&event);
        tracing::trace!(window = self.handle.0, entered = event.entered, notified, "cursor enter");
    }

    pub fn scroll_callback(&self, event: ScrollEvent) {
        self.scrolls.dispatch(&event);
        self.scroll.set(event.offset);
    }

    pub fn drop_callback(&self, event: DropEvent) {
        tracing::debug!(
            window = self.handle.0,
            count = event.paths.len(),
            paths = ?event.paths,
            "files dropped"
        );
        self.drops.dispatch(&event);
    }

    // Consumer registration.

    pub fn on_key<F>(&self, consumer: F) -> Subscription
    where
        F: FnMut(&KeyEvent) -> bool + 'static,
    {
        self.keys.push(consumer)
    }

    pub fn on_char<F>(&self, consumer: F) -> Subscription
    where
        F: FnMut(&CharEvent) -> bool + 'static,
    {
        self.chars.push(consumer)
    }

    pub fn on_mouse_button<F>(&self, consumer: F) -> Subscription
    where
        F: FnMut(&MouseButtonEvent) -> bool + 'static,
    {
        self.mouse_buttons.push(consumer)
    }

    pub fn on_cursor_pos<F>(&self, consumer: F) -> Subscription
    where
        F: FnMut(&CursorPosEvent) -> bool + 'static,
    {
        self.cursor_moves.push(consumer)
    }

    pub fn on_cursor_enter<F>(&self, consumer: F) -> Subscription
    where
        F: FnMut(&CursorEnterEvent) -> bool + 'static,
    {
        self.cursor_enters.push(consumer)
    }

    pub fn on_scroll<F>(&self, consumer: F) -> Subscription
    where
        F: FnMut(&ScrollEvent) -> bool + 'static,
    {
        self.scrolls.push(consumer)
    }

    pub fn on_drop<F>(&self, consumer: F) -> Subscription
    where
        F: FnMut(&DropEvent) -> bool + 'static,
    {
        self.drops.push(consumer)
    }

    /// Bind a scancode in this window's binding table. Returns `false` when
    /// it is already bound and `rewrite` is not set.
    pub fn add_key_callback(&self, scancode: Scancode, binding: KeyBinding, rewrite: bool) -> bool {
        self.bindings.bind(scancode, binding, rewrite)
    }

    pub fn bindings(&self) -> &ScancodeBindings {
        &self.bindings
    }

    /// Fire scancode bindings for this tick. Returns how many were invoked.
    pub fn update(&self, tick: u64) -> usize {
        let invoked = self.bindings.tick();
        if invoked > 0 {
            tracing::trace!(window = self.handle.0, tick, invoked, "bindings fired");
        }
        invoked
    }

    pub fn cursor_position(&self) -> DVec2 {
        self.cursor.get()
    }

    /// Offsets of the most recent scroll event.
    pub fn scroll_offset(&self) -> DVec2 {
        self.scroll.get()
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.pressed.borrow().contains(&key)
    }

    pub fn pressed_keys(&self) -> Vec<KeyCode> {
        self.pressed.borrow().iter().copied().collect()
    }
}

impl SharedUpdate for InputRouter {
    fn update(&self, tick: u64) {
        InputRouter::update(self, tick);
    }
}

impl InputSource for InputRouter {
    fn key_state(&self, key: KeyCode) -> bool {
        self.is_key_down(key)
    }

    fn cursor_position(&self) -> DVec2 {
        self.cursor.get()
    }

    fn scroll_offset(&self) -> DVec2 {
        self.scroll.get()
    }
}

impl Drop for InputRouter {
    fn drop(&mut self) {
        registry::detach(&self.registry, self.handle, self.id);
    }
}

impl fmt::Debug for InputRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRouter")
            .field("id", &self.id)
            .field("handle", &self.handle)
            .field("cursor", &self.cursor.get())
            .field("scroll", &self.scroll.get())
            .field("pressed", &self.pressed.borrow().len())
            .finish_non_exhaustive()
    }
}
