//! Pre-1.5 board names
//!
//! Before Arduino 1.5 every CPU variant of a board was a separate entry in
//! `boards.txt` (`nano328`, `mega2560`, ...). From 1.5 on, variants share one
//! board entry and override values below `menu.cpu.<cpu>`. This table maps the
//! old names (as of Arduino 1.0.5) to the new board/CPU pair.

/// A pre-1.5 board name translated to 1.5+ terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyBoard {
    /// Board name in Arduino 1.0.x
    pub name_1_0: &'static str,
    /// Board name in Arduino 1.5+
    pub board: &'static str,
    /// CPU menu entry, when the board has CPU variants
    pub cpu: Option<&'static str>,
    /// Human-readable board name
    pub long_name: &'static str,
}

const fn entry(
    board: &'static str,
    cpu: Option<&'static str>,
    name_1_0: &'static str,
    long_name: &'static str,
) -> LegacyBoard {
    LegacyBoard {
        name_1_0,
        board,
        cpu,
        long_name,
    }
}

/// Every board shipped with Arduino 1.0.5
pub const LEGACY_BOARDS: &[LegacyBoard] = &[
    entry("atmegang", Some("atmega168"), "atmega168", "Arduino NG or older w/ ATmega168"),
    entry("atmegang", Some("atmega8"), "atmega8", "Arduino NG or older w/ ATmega8"),
    entry("bt", Some("atmega168"), "bt", "Arduino BT w/ ATmega168"),
    // Arduino 1.5's boards.txt really spells this CPU `atmega238`
    entry("bt", Some("atmega238"), "bt328", "Arduino BT w/ ATmega328"),
    entry("diecimila", Some("atmega168"), "diecimila", "Arduino Diecimila or Duemilanove w/ ATmega168"),
    entry("diecimila", Some("atmega328"), "atmega328", "Arduino Duemilanove w/ ATmega328"),
    entry("esplora", None, "esplora", "Arduino Esplora"),
    entry("ethernet", None, "ethernet", "Arduino Ethernet"),
    entry("fio", None, "fio", "Arduino Fio"),
    entry("leonardo", None, "leonardo", "Arduino Leonardo"),
    entry("lilypad", Some("atmega168"), "lilypad", "LilyPad Arduino w/ ATmega168"),
    entry("lilypad", Some("atmega328"), "lilypad328", "LilyPad Arduino w/ ATmega328"),
    entry("lilypad", None, "LilyPadUSB", "LilyPad Arduino USB"),
    entry("mega", Some("atmega1280"), "mega", "Arduino Mega (ATmega1280)"),
    entry("mega", Some("atmega2560"), "mega2560", "Arduino Mega 2560 or Mega ADK"),
    entry("micro", None, "micro", "Arduino Micro"),
    entry("mini", Some("atmega168"), "mini", "Arduino Mini w/ ATmega168"),
    entry("mini", Some("atmega328"), "mini328", "Arduino Mini w/ ATmega328"),
    entry("nano", Some("atmega168"), "nano", "Arduino Nano w/ ATmega168"),
    entry("nano", Some("atmega328"), "nano328", "Arduino Nano w/ ATmega328"),
    entry("pro", Some("atmega168"), "pro", "Arduino Pro or Pro Mini (3.3V, 8 MHz) w/ ATmega168"),
    entry("pro", Some("atmega328"), "pro328", "Arduino Pro or Pro Mini (3.3V, 8 MHz) w/ ATmega328"),
    entry("pro", Some("atmega168"), "pro5v", "Arduino Pro or Pro Mini (5V, 16 MHz) w/ ATmega168"),
    entry("pro", Some("atmega328"), "pro5v328", "Arduino Pro or Pro Mini (5V, 16 MHz) w/ ATmega328"),
    entry("robotControl", None, "robotControl", "Arduino Robot Control"),
    entry("robotMotor", None, "robotMotor", "Arduino Robot Motor"),
    entry("uno", None, "uno", "Arduino Uno"),
];

/// Translate a pre-1.5 board name
pub fn resolve_legacy_board(name: &str) -> Option<&'static LegacyBoard> {
    LEGACY_BOARDS.iter().find(|entry| entry.name_1_0 == name)
}
