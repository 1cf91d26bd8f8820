//! Named key codes and scancodes.
//!
//! Key codes use the GLFW numbering (printable keys are their ASCII value).
//! Scancodes use PC set 1; extended keys carry their `0xE0` (or `0xE1`) prefix
//! in the high byte.

use crate::types::{KeyCode, Scancode};

pub mod key {
    use super::KeyCode;

    pub const SPACE: KeyCode = KeyCode(32);
    pub const APOSTROPHE: KeyCode = KeyCode(39);
    pub const COMMA: KeyCode = KeyCode(44);
    pub const MINUS: KeyCode = KeyCode(45);
    pub const PERIOD: KeyCode = KeyCode(46);
    pub const SLASH: KeyCode = KeyCode(47);
    pub const DIGIT_0: KeyCode = KeyCode(48);
    pub const DIGIT_1: KeyCode = KeyCode(49);
    pub const DIGIT_2: KeyCode = KeyCode(50);
    pub const DIGIT_3: KeyCode = KeyCode(51);
    pub const DIGIT_4: KeyCode = KeyCode(52);
    pub const DIGIT_5: KeyCode = KeyCode(53);
    pub const DIGIT_6: KeyCode = KeyCode(54);
    pub const DIGIT_7: KeyCode = KeyCode(55);
    pub const DIGIT_8: KeyCode = KeyCode(56);
    pub const DIGIT_9: KeyCode = KeyCode(57);
    pub const SEMICOLON: KeyCode = KeyCode(59);
    pub const EQUAL: KeyCode = KeyCode(61);
    pub const A: KeyCode = KeyCode(65);
    pub const B: KeyCode = KeyCode(66);
    pub const C: KeyCode = KeyCode(67);
    pub const D: KeyCode = KeyCode(68);
    pub const E: KeyCode = KeyCode(69);
    pub const F: KeyCode = KeyCode(70);
    pub const G: KeyCode = KeyCode(71);
    pub const H: KeyCode = KeyCode(72);
    pub const I: KeyCode = KeyCode(73);
    pub const J: KeyCode = KeyCode(74);
    pub const K: KeyCode = KeyCode(75);
    pub const L: KeyCode = KeyCode(76);
    pub const M: KeyCode = KeyCode(77);
    pub const N: KeyCode = KeyCode(78);
    pub const O: KeyCode = KeyCode(79);
    pub const P: KeyCode = KeyCode(80);
    pub const Q: KeyCode = KeyCode(81);
    pub const R: KeyCode = KeyCode(82);
    pub const S: KeyCode = KeyCode(83);
    pub const T: KeyCode = KeyCode(84);
    pub const U: KeyCode = KeyCode(85);
    pub const V: KeyCode = KeyCode(86);
    pub const W: KeyCode = KeyCode(87);
    pub const X: KeyCode = KeyCode(88);
    pub const Y: KeyCode = KeyCode(89);
    pub const Z: KeyCode = KeyCode(90);
    pub const LEFT_BRACKET: KeyCode = KeyCode(91);
    pub const BACKSLASH: KeyCode = KeyCode(92);
    pub const RIGHT_BRACKET: KeyCode = KeyCode(93);
    pub const GRAVE_ACCENT: KeyCode = KeyCode(96);
    pub const INTL_BACKSLASH: KeyCode = KeyCode(162);
    pub const ESCAPE: KeyCode = KeyCode(256);
    pub const ENTER: KeyCode = KeyCode(257);
    pub const TAB: KeyCode = KeyCode(258);
    pub const BACKSPACE: KeyCode = KeyCode(259);
    pub const INSERT: KeyCode = KeyCode(260);
    pub const DELETE: KeyCode = KeyCode(261);
    pub const RIGHT: KeyCode = KeyCode(262);
    pub const LEFT: KeyCode = KeyCode(263);
    pub const DOWN: KeyCode = KeyCode(264);
    pub const UP: KeyCode = KeyCode(265);
    pub const PAGE_UP: KeyCode = KeyCode(266);
    pub const PAGE_DOWN: KeyCode = KeyCode(267);
    pub const HOME: KeyCode = KeyCode(268);
    pub const END: KeyCode = KeyCode(269);
    pub const CAPS_LOCK: KeyCode = KeyCode(280);
    pub const SCROLL_LOCK: KeyCode = KeyCode(281);
    pub const NUM_LOCK: KeyCode = KeyCode(282);
    pub const PRINT_SCREEN: KeyCode = KeyCode(283);
    pub const PAUSE: KeyCode = KeyCode(284);
    pub const F1: KeyCode = KeyCode(290);
    pub const F2: KeyCode = KeyCode(291);
    pub const F3: KeyCode = KeyCode(292);
    pub const F4: KeyCode = KeyCode(293);
    pub const F5: KeyCode = KeyCode(294);
    pub const F6: KeyCode = KeyCode(295);
    pub const F7: KeyCode = KeyCode(296);
    pub const F8: KeyCode = KeyCode(297);
    pub const F9: KeyCode = KeyCode(298);
    pub const F10: KeyCode = KeyCode(299);
    pub const F11: KeyCode = KeyCode(300);
    pub const F12: KeyCode = KeyCode(301);
    pub const F13: KeyCode = KeyCode(302);
    pub const F14: KeyCode = KeyCode(303);
    pub const F15: KeyCode = KeyCode(304);
    pub const F16: KeyCode = KeyCode(305);
    pub const F17: KeyCode = KeyCode(306);
    pub const F18: KeyCode = KeyCode(307);
    pub const F19: KeyCode = KeyCode(308);
    pub const F20: KeyCode = KeyCode(309);
    pub const F21: KeyCode = KeyCode(310);
    pub const F22: KeyCode = KeyCode(311);
    pub const F23: KeyCode = KeyCode(312);
    pub const F24: KeyCode = KeyCode(313);
    pub const NUMPAD_0: KeyCode = KeyCode(320);
    pub const NUMPAD_1: KeyCode = KeyCode(321);
    pub const NUMPAD_2: KeyCode = KeyCode(322);
    pub const NUMPAD_3: KeyCode = KeyCode(323);
    pub const NUMPAD_4: KeyCode = KeyCode(324);
    pub const NUMPAD_5: KeyCode = KeyCode(325);
    pub const NUMPAD_6: KeyCode = KeyCode(326);
    pub const NUMPAD_7: KeyCode = KeyCode(327);
    pub const NUMPAD_8: KeyCode = KeyCode(328);
    pub const NUMPAD_9: KeyCode = KeyCode(329);
    pub const NUMPAD_DECIMAL: KeyCode = KeyCode(330);
    pub const NUMPAD_DIVIDE: KeyCode = KeyCode(331);
    pub const NUMPAD_MULTIPLY: KeyCode = KeyCode(332);
    pub const NUMPAD_SUBTRACT: KeyCode = KeyCode(333);
    pub const NUMPAD_ADD: KeyCode = KeyCode(334);
    pub const NUMPAD_ENTER: KeyCode = KeyCode(335);
    pub const NUMPAD_EQUAL: KeyCode = KeyCode(336);
    pub const LEFT_SHIFT: KeyCode = KeyCode(340);
    pub const LEFT_CONTROL: KeyCode = KeyCode(341);
    pub const LEFT_ALT: KeyCode = KeyCode(342);
    pub const LEFT_SUPER: KeyCode = KeyCode(343);
    pub const RIGHT_SHIFT: KeyCode = KeyCode(344);
    pub const RIGHT_CONTROL: KeyCode = KeyCode(345);
    pub const RIGHT_ALT: KeyCode = KeyCode(346);
    pub const RIGHT_SUPER: KeyCode = KeyCode(347);
    pub const MENU: KeyCode = KeyCode(348);
}

pub mod scancode {
    use super::Scancode;

    pub const ESCAPE: Scancode = Scancode(0x01);
    pub const DIGIT_1: Scancode = Scancode(0x02);
    pub const DIGIT_2: Scancode = Scancode(0x03);
    pub const DIGIT_3: Scancode = Scancode(0x04);
    pub const DIGIT_4: Scancode = Scancode(0x05);
    pub const DIGIT_5: Scancode = Scancode(0x06);
    pub const DIGIT_6: Scancode = Scancode(0x07);
    pub const DIGIT_7: Scancode = Scancode(0x08);
    pub const DIGIT_8: Scancode = Scancode(0x09);
    pub const DIGIT_9: Scancode = Scancode(0x0A);
    pub const DIGIT_0: Scancode = Scancode(0x0B);
    pub const MINUS: Scancode = Scancode(0x0C);
    pub const EQUAL: Scancode = Scancode(0x0D);
    pub const BACKSPACE: Scancode = Scancode(0x0E);
    pub const TAB: Scancode = Scancode(0x0F);
    pub const Q: Scancode = Scancode(0x10);
    pub const W: Scancode = Scancode(0x11);
    pub const E: Scancode = Scancode(0x12);
    pub const R: Scancode = Scancode(0x13);
    pub const T: Scancode = Scancode(0x14);
    pub const Y: Scancode = Scancode(0x15);
    pub const U: Scancode = Scancode(0x16);
    pub const I: Scancode = Scancode(0x17);
    pub const O: Scancode = Scancode(0x18);
    pub const P: Scancode = Scancode(0x19);
    pub const LEFT_BRACKET: Scancode = Scancode(0x1A);
    pub const RIGHT_BRACKET: Scancode = Scancode(0x1B);
    pub const ENTER: Scancode = Scancode(0x1C);
    pub const LEFT_CONTROL: Scancode = Scancode(0x1D);
    pub const A: Scancode = Scancode(0x1E);
    pub const S: Scancode = Scancode(0x1F);
    pub const D: Scancode = Scancode(0x20);
    pub const F: Scancode = Scancode(0x21);
    pub const G: Scancode = Scancode(0x22);
    pub const H: Scancode = Scancode(0x23);
    pub const J: Scancode = Scancode(0x24);
    pub const K: Scancode = Scancode(0x25);
    pub const L: Scancode = Scancode(0x26);
    pub const SEMICOLON: Scancode = Scancode(0x27);
    pub const APOSTROPHE: Scancode = Scancode(0x28);
    pub const GRAVE_ACCENT: Scancode = Scancode(0x29);
    pub const LEFT_SHIFT: Scancode = Scancode(0x2A);
    pub const BACKSLASH: Scancode = Scancode(0x2B);
    pub const Z: Scancode = Scancode(0x2C);
    pub const X: Scancode = Scancode(0x2D);
    pub const C: Scancode = Scancode(0x2E);
    pub const V: Scancode = Scancode(0x2F);
    pub const B: Scancode = Scancode(0x30);
    pub const N: Scancode = Scancode(0x31);
    pub const M: Scancode = Scancode(0x32);
    pub const COMMA: Scancode = Scancode(0x33);
    pub const PERIOD: Scancode = Scancode(0x34);
    pub const SLASH: Scancode = Scancode(0x35);
    pub const RIGHT_SHIFT: Scancode = Scancode(0x36);
    pub const NUMPAD_MULTIPLY: Scancode = Scancode(0x37);
    pub const LEFT_ALT: Scancode = Scancode(0x38);
    pub const SPACE: Scancode = Scancode(0x39);
    pub const CAPS_LOCK: Scancode = Scancode(0x3A);
    pub const F1: Scancode = Scancode(0x3B);
    pub const F2: Scancode = Scancode(0x3C);
    pub const F3: Scancode = Scancode(0x3D);
    pub const F4: Scancode = Scancode(0x3E);
    pub const F5: Scancode = Scancode(0x3F);
    pub const F6: Scancode = Scancode(0x40);
    pub const F7: Scancode = Scancode(0x41);
    pub const F8: Scancode = Scancode(0x42);
    pub const F9: Scancode = Scancode(0x43);
    pub const F10: Scancode = Scancode(0x44);
    pub const NUM_LOCK: Scancode = Scancode(0x45);
    pub const SCROLL_LOCK: Scancode = Scancode(0x46);
    pub const NUMPAD_7: Scancode = Scancode(0x47);
    pub const NUMPAD_8: Scancode = Scancode(0x48);
    pub const NUMPAD_9: Scancode = Scancode(0x49);
    pub const NUMPAD_SUBTRACT: Scancode = Scancode(0x4A);
    pub const NUMPAD_4: Scancode = Scancode(0x4B);
    pub const NUMPAD_5: Scancode = Scancode(0x4C);
    pub const NUMPAD_6: Scancode = Scancode(0x4D);
    pub const NUMPAD_ADD: Scancode = Scancode(0x4E);
    pub const NUMPAD_1: Scancode = Scancode(0x4F);
    pub const NUMPAD_2: Scancode = Scancode(0x50);
    pub const NUMPAD_3: Scancode = Scancode(0x51);
    pub const NUMPAD_0: Scancode = Scancode(0x52);
    pub const NUMPAD_DECIMAL: Scancode = Scancode(0x53);
    pub const INTL_BACKSLASH: Scancode = Scancode(0x56);
    pub const F11: Scancode = Scancode(0x57);
    pub const F12: Scancode = Scancode(0x58);
    pub const NUMPAD_EQUAL: Scancode = Scancode(0x59);
    pub const F13: Scancode = Scancode(0x64);
    pub const F14: Scancode = Scancode(0x65);
    pub const F15: Scancode = Scancode(0x66);
    pub const F16: Scancode = Scancode(0x67);
    pub const F17: Scancode = Scancode(0x68);
    pub const F18: Scancode = Scancode(0x69);
    pub const F19: Scancode = Scancode(0x6A);
    pub const F20: Scancode = Scancode(0x6B);
    pub const F21: Scancode = Scancode(0x6C);
    pub const F22: Scancode = Scancode(0x6D);
    pub const F23: Scancode = Scancode(0x6E);
    pub const KANA_MODE: Scancode = Scancode(0x70);
    pub const LANG2: Scancode = Scancode(0x71);
    pub const LANG1: Scancode = Scancode(0x72);
    pub const INTL_RO: Scancode = Scancode(0x73);
    pub const F24: Scancode = Scancode(0x76);
    pub const CONVERT: Scancode = Scancode(0x79);
    pub const NON_CONVERT: Scancode = Scancode(0x7B);
    pub const INTL_YEN: Scancode = Scancode(0x7D);
    pub const NUMPAD_COMMA: Scancode = Scancode(0x7E);
    pub const MEDIA_TRACK_PREVIOUS: Scancode = Scancode(0xE010);
    pub const MEDIA_TRACK_NEXT: Scancode = Scancode(0xE019);
    pub const NUMPAD_ENTER: Scancode = Scancode(0xE01C);
    pub const RIGHT_CONTROL: Scancode = Scancode(0xE01D);
    pub const AUDIO_VOLUME_MUTE: Scancode = Scancode(0xE020);
    pub const LAUNCH_APP2: Scancode = Scancode(0xE021);
    pub const MEDIA_PLAY_PAUSE: Scancode = Scancode(0xE022);
    pub const MEDIA_STOP: Scancode = Scancode(0xE024);
    pub const AUDIO_VOLUME_DOWN: Scancode = Scancode(0xE02E);
    pub const AUDIO_VOLUME_UP: Scancode = Scancode(0xE030);
    pub const BROWSER_HOME: Scancode = Scancode(0xE032);
    pub const NUMPAD_DIVIDE: Scancode = Scancode(0xE035);
    pub const PRINT_SCREEN: Scancode = Scancode(0xE037);
    pub const RIGHT_ALT: Scancode = Scancode(0xE038);
    pub const HOME: Scancode = Scancode(0xE047);
    pub const UP: Scancode = Scancode(0xE048);
    pub const PAGE_UP: Scancode = Scancode(0xE049);
    pub const LEFT: Scancode = Scancode(0xE04B);
    pub const RIGHT: Scancode = Scancode(0xE04D);
    pub const END: Scancode = Scancode(0xE04F);
    pub const DOWN: Scancode = Scancode(0xE050);
    pub const PAGE_DOWN: Scancode = Scancode(0xE051);
    pub const INSERT: Scancode = Scancode(0xE052);
    pub const DELETE: Scancode = Scancode(0xE053);
    pub const LEFT_SUPER: Scancode = Scancode(0xE05B);
    pub const RIGHT_SUPER: Scancode = Scancode(0xE05C);
    pub const MENU: Scancode = Scancode(0xE05D);
    pub const POWER: Scancode = Scancode(0xE05E);
    pub const SLEEP: Scancode = Scancode(0xE05F);
    pub const WAKE_UP: Scancode = Scancode(0xE063);
    pub const BROWSER_SEARCH: Scancode = Scancode(0xE065);
    pub const BROWSER_FAVORITES: Scancode = Scancode(0xE066);
    pub const BROWSER_REFRESH: Scancode = Scancode(0xE067);
    pub const BROWSER_STOP: Scancode = Scancode(0xE068);
    pub const BROWSER_FORWARD: Scancode = Scancode(0xE069);
    pub const BROWSER_BACK: Scancode = Scancode(0xE06A);
    pub const LAUNCH_APP1: Scancode = Scancode(0xE06B);
    pub const LAUNCH_MAIL: Scancode = Scancode(0xE06C);
    pub const MEDIA_SELECT: Scancode = Scancode(0xE06D);
    // Pause sends E1 1D 45; the E1 prefix keeps it apart from right control.
    pub const PAUSE: Scancode = Scancode(0xE11D);
}
