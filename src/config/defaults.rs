//! Default configuration values

/// Upper bound on substitution rounds before a template is declared cyclic
pub const MAX_SUBSTITUTION_ROUNDS: usize = 100;

/// Upper bound on the length of substituted text, in bytes
pub const MAX_SUBSTITUTED_LEN: usize = 1 << 20;

/// Environment variable overriding the Arduino install location
pub const ENV_ARDUINO_HOME: &str = "ARDUINO_HOME";

/// Environment variable overriding the sketchbook location
pub const ENV_SKETCHBOOK_HOME: &str = "SKETCHBOOK_HOME";

/// Install location used by distribution packages on Linux
pub const LINUX_ARDUINO_HOME: &str = "/usr/share/arduino";

/// Upload tool used when a board does not name one
pub const DEFAULT_UPLOAD_TOOL: &str = "avrdude";

/// Family assumed for legacy (pre-1.5) installs and legacy board names
pub const LEGACY_FAMILY: &str = "avr";
