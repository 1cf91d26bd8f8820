//! Translation of winit window events into [`RawEvent`]s.

use ember_common::keys::{key, scancode};
use ember_common::{Action, KeyCode, Modifiers, MouseButton, Scancode, WindowHandle};
use glam::DVec2;
use winit::event::{ElementState, Ime, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::WindowId;

use crate::events::{
    CharEvent, CursorEnterEvent, CursorPosEvent, DropEvent, KeyEvent, MouseButtonEvent, RawEvent,
    ScrollEvent,
};

/// Pixel scroll deltas are divided by this to get lines.
pub const DEFAULT_PIXELS_PER_LINE: f64 = 20.0;

/// Registry handle of a winit window.
pub fn handle_of(id: WindowId) -> WindowHandle {
    WindowHandle(u64::from(id))
}

/// Stateful winit → [`RawEvent`] translator for one event loop.
///
/// Modifier state arrives as its own winit event, so the bridge keeps the
/// latest value and stamps it onto key and mouse button events.
#[derive(Debug, Clone)]
pub struct WinitBridge {
    modifiers: Modifiers,
    pixels_per_line: f64,
}

impl WinitBridge {
    pub fn new() -> Self {
        Self::with_pixels_per_line(DEFAULT_PIXELS_PER_LINE)
    }

    pub fn with_pixels_per_line(pixels_per_line: f64) -> Self {
        Self {
            modifiers: Modifiers::NONE,
            pixels_per_line: if pixels_per_line > 0.0 {
                pixels_per_line
            } else {
                DEFAULT_PIXELS_PER_LINE
            },
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Translate one window event. Events the router has no use for yield
    /// nothing; a key press carrying text yields the key event followed by
    /// one char event per character. Keys [`map_key`] cannot place still
    /// yield their text.
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<RawEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.modifiers = Modifiers {
                    shift: state.shift_key(),
                    ctrl: state.control_key(),
                    alt: state.alt_key(),
                    meta: state.super_key(),
                };
                Vec::new()
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    tracing::trace!(key = ?event.physical_key, "unidentified key ignored");
                    return Vec::new();
                };
                let action = match (event.state, event.repeat) {
                    (ElementState::Released, _) => Action::Release,
                    (ElementState::Pressed, false) => Action::Press,
                    (ElementState::Pressed, true) => Action::Repeat,
                };

                let mut out = Vec::new();
                match map_key(code) {
                    Some((key, scancode)) => out.push(RawEvent::Key(KeyEvent {
                        key,
                        scancode,
                        action,
                        mods: self.modifiers,
                    })),
                    None => tracing::trace!(?code, "key without a scancode ignored"),
                }
                if event.state == ElementState::Pressed {
                    if let Some(text) = &event.text {
                        out.extend(text_chars(text.as_str()));
                    }
                }
                out
            }

            WindowEvent::Ime(Ime::Commit(text)) => text_chars(text).collect(),

            WindowEvent::MouseInput { state, button, .. } => {
                vec![RawEvent::MouseButton(MouseButtonEvent {
                    button: map_button(*button),
                    action: match state {
                        ElementState::Pressed => Action::Press,
                        ElementState::Released => Action::Release,
                    },
                    mods: self.modifiers,
                })]
            }

            WindowEvent::CursorMoved { position, .. } => {
                vec![RawEvent::CursorPos(CursorPosEvent {
                    position: DVec2::new(position.x, position.y),
                })]
            }

            WindowEvent::CursorEntered { .. } => {
                vec![RawEvent::CursorEnter(CursorEnterEvent { entered: true })]
            }
            WindowEvent::CursorLeft { .. } => {
                vec![RawEvent::CursorEnter(CursorEnterEvent { entered: false })]
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let offset = match delta {
                    MouseScrollDelta::LineDelta(x, y) => DVec2::new(f64::from(*x), f64::from(*y)),
                    MouseScrollDelta::PixelDelta(pos) => {
                        DVec2::new(pos.x, pos.y) / self.pixels_per_line
                    }
                };
                vec![RawEvent::Scroll(ScrollEvent { offset })]
            }

            WindowEvent::DroppedFile(path) => vec![RawEvent::Drop(DropEvent {
                paths: vec![path.clone()],
            })],

            _ => Vec::new(),
        }
    }
}

impl Default for WinitBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn text_chars(text: &str) -> impl Iterator<Item = RawEvent> + '_ {
    text.chars()
        .filter(|ch| !ch.is_control())
        .map(|ch| RawEvent::Char(CharEvent::new(ch)))
}

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as W;
    match button {
        W::Left => MouseButton::Left,
        W::Right => MouseButton::Right,
        W::Middle => MouseButton::Middle,
        W::Back => MouseButton::Back,
        W::Forward => MouseButton::Forward,
        W::Other(n) => MouseButton::Other(n),
    }
}

macro_rules! key_table {
    (
        named: [$($winit:ident => $name:ident),+ $(,)?],
        scancode_only: [$($other:ident => $sc:ident),+ $(,)?] $(,)?
    ) => {
        /// Key code and PC set 1 scancode for a physical key.
        ///
        /// Keys without a named key code still get their own scancode and
        /// [`KeyCode::UNKNOWN`]. Keys with no set 1 scancode yield `None`.
        pub fn map_key(code: WinitKey) -> Option<(KeyCode, Scancode)> {
            match code {
                $(WinitKey::$winit => Some((key::$name, scancode::$name)),)+
                $(WinitKey::$other => Some((KeyCode::UNKNOWN, scancode::$sc)),)+
                _ => None,
            }
        }

        #[cfg(test)]
        const MAPPED_KEYS: &[WinitKey] = &[$(WinitKey::$winit,)+ $(WinitKey::$other,)+];
    };
}

key_table!(
    named: [
        KeyA => A, KeyB => B, KeyC => C, KeyD => D, KeyE => E, KeyF => F, KeyG => G,
        KeyH => H, KeyI => I, KeyJ => J, KeyK => K, KeyL => L, KeyM => M, KeyN => N,
        KeyO => O, KeyP => P, KeyQ => Q, KeyR => R, KeyS => S, KeyT => T, KeyU => U,
        KeyV => V, KeyW => W, KeyX => X, KeyY => Y, KeyZ => Z,
        Digit0 => DIGIT_0, Digit1 => DIGIT_1, Digit2 => DIGIT_2, Digit3 => DIGIT_3,
        Digit4 => DIGIT_4, Digit5 => DIGIT_5, Digit6 => DIGIT_6, Digit7 => DIGIT_7,
        Digit8 => DIGIT_8, Digit9 => DIGIT_9,
        Space => SPACE, Quote => APOSTROPHE, Comma => COMMA, Minus => MINUS,
        Period => PERIOD, Slash => SLASH, Semicolon => SEMICOLON, Equal => EQUAL,
        BracketLeft => LEFT_BRACKET, Backslash => BACKSLASH, BracketRight => RIGHT_BRACKET,
        Backquote => GRAVE_ACCENT, IntlBackslash => INTL_BACKSLASH,
        Escape => ESCAPE, Enter => ENTER, Tab => TAB, Backspace => BACKSPACE,
        Insert => INSERT, Delete => DELETE, Home => HOME, End => END,
        PageUp => PAGE_UP, PageDown => PAGE_DOWN,
        ArrowRight => RIGHT, ArrowLeft => LEFT, ArrowDown => DOWN, ArrowUp => UP,
        CapsLock => CAPS_LOCK, ScrollLock => SCROLL_LOCK, NumLock => NUM_LOCK,
        PrintScreen => PRINT_SCREEN, Pause => PAUSE,
        F1 => F1, F2 => F2, F3 => F3, F4 => F4, F5 => F5, F6 => F6,
        F7 => F7, F8 => F8, F9 => F9, F10 => F10, F11 => F11, F12 => F12,
        F13 => F13, F14 => F14, F15 => F15, F16 => F16, F17 => F17, F18 => F18,
        F19 => F19, F20 => F20, F21 => F21, F22 => F22, F23 => F23, F24 => F24,
        Numpad0 => NUMPAD_0, Numpad1 => NUMPAD_1, Numpad2 => NUMPAD_2, Numpad3 => NUMPAD_3,
        Numpad4 => NUMPAD_4, Numpad5 => NUMPAD_5, Numpad6 => NUMPAD_6, Numpad7 => NUMPAD_7,
        Numpad8 => NUMPAD_8, Numpad9 => NUMPAD_9,
        NumpadDecimal => NUMPAD_DECIMAL, NumpadDivide => NUMPAD_DIVIDE,
        NumpadMultiply => NUMPAD_MULTIPLY, NumpadSubtract => NUMPAD_SUBTRACT,
        NumpadAdd => NUMPAD_ADD, NumpadEnter => NUMPAD_ENTER, NumpadEqual => NUMPAD_EQUAL,
        ShiftLeft => LEFT_SHIFT, ControlLeft => LEFT_CONTROL, AltLeft => LEFT_ALT,
        SuperLeft => LEFT_SUPER, ShiftRight => RIGHT_SHIFT, ControlRight => RIGHT_CONTROL,
        AltRight => RIGHT_ALT, SuperRight => RIGHT_SUPER, ContextMenu => MENU,
    ],
    scancode_only: [
        IntlRo => INTL_RO, IntlYen => INTL_YEN, KanaMode => KANA_MODE,
        Convert => CONVERT, NonConvert => NON_CONVERT, Lang1 => LANG1, Lang2 => LANG2,
        NumpadComma => NUMPAD_COMMA,
        MediaTrackPrevious => MEDIA_TRACK_PREVIOUS, MediaTrackNext => MEDIA_TRACK_NEXT,
        MediaPlayPause => MEDIA_PLAY_PAUSE, MediaStop => MEDIA_STOP,
        MediaSelect => MEDIA_SELECT,
        AudioVolumeMute => AUDIO_VOLUME_MUTE, AudioVolumeDown => AUDIO_VOLUME_DOWN,
        AudioVolumeUp => AUDIO_VOLUME_UP,
        BrowserHome => BROWSER_HOME, BrowserSearch => BROWSER_SEARCH,
        BrowserFavorites => BROWSER_FAVORITES, BrowserRefresh => BROWSER_REFRESH,
        BrowserStop => BROWSER_STOP, BrowserForward => BROWSER_FORWARD,
        BrowserBack => BROWSER_BACK,
        LaunchApp1 => LAUNCH_APP1, LaunchApp2 => LAUNCH_APP2, LaunchMail => LAUNCH_MAIL,
        Power => POWER, Sleep => SLEEP, WakeUp => WAKE_UP,
    ],
);
