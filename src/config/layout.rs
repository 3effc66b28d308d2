//! Arduino install layout
//!
//! Path segments relative to the install home. Pre-1.5 installs keep a single
//! `hardware/arduino/{cores,boards.txt}` tree; 1.5+ installs add one directory
//! per processor family below `hardware/arduino`.

/// `hardware` directory below the install home
pub const HARDWARE_DIR: &str = "hardware";

/// Directory below `hardware` holding the Arduino cores
pub const ARDUINO_DIR: &str = "arduino";

/// Directory below `hardware` holding compilers and uploaders
pub const TOOLS_DIR: &str = "tools";

/// Version file only shipped with 1.5+ installs
pub const REVISIONS_FILE: &str = "revisions.txt";

/// Board definitions file
pub const BOARDS_FILE: &str = "boards.txt";

/// Platform definitions file (1.5+ only)
pub const PLATFORM_FILE: &str = "platform.txt";

/// ARM toolchain directory name, present only in 1.5+ installs
pub const ARM_TOOLCHAIN_DIR: &str = "g++_arm_none_eabi";

/// Per-family subdirectories
pub const CORES_DIR: &str = "cores";
pub const VARIANTS_DIR: &str = "variants";
pub const LIBRARIES_DIR: &str = "libraries";
pub const BOOTLOADERS_DIR: &str = "bootloaders";
pub const FIRMWARES_DIR: &str = "firmwares";
pub const SYSTEM_DIR: &str = "system";

/// Name of the avrdude configuration file
pub const AVRDUDE_CONF: &str = "avrdude.conf";
