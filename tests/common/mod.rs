//! Common test utilities and helpers
//!
//! Builds throwaway Arduino installs on disk for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use assert_fs::prelude::*;
use assert_fs::TempDir;

/// AVR `boards.txt` in 1.5+ form
pub const AVR_BOARDS: &str = r"
# See: http://code.google.com/p/arduino/wiki/Platforms

menu.cpu=Processor

uno.name=Arduino Uno
uno.upload.tool=avrdude
uno.upload.protocol=arduino
uno.upload.maximum_size=32256
uno.upload.speed=115200
uno.build.mcu=atmega328p
uno.build.f_cpu=16000000L
uno.build.board=AVR_UNO
uno.build.core=arduino
uno.build.variant=standard

nano.name=Arduino Nano
nano.upload.tool=avrdude
nano.upload.protocol=arduino
nano.build.f_cpu=16000000L
nano.build.board=AVR_NANO
nano.build.core=arduino
nano.build.variant=eightanaloginputs
nano.menu.cpu.atmega328=ATmega328
nano.menu.cpu.atmega328.upload.maximum_size=30720
nano.menu.cpu.atmega328.upload.speed=57600
nano.menu.cpu.atmega328.build.mcu=atmega328p
nano.menu.cpu.atmega168=ATmega168
nano.menu.cpu.atmega168.upload.maximum_size=14336
nano.menu.cpu.atmega168.upload.speed=19200
nano.menu.cpu.atmega168.build.mcu=atmega168
";

/// AVR `platform.txt` excerpt
pub const AVR_PLATFORM: &str = r#"
name=Arduino AVR Boards
version=1.6.5

compiler.warning_flags=-w
compiler.path={runtime.ide.path}/hardware/tools/avr/bin/
compiler.c.cmd=avr-gcc
compiler.c.flags=-c -g -Os {compiler.warning_flags} -ffunction-sections -fdata-sections -MMD

recipe.c.o.pattern="{compiler.path}{compiler.c.cmd}" {compiler.c.flags} -mmcu={build.mcu} -DF_CPU={build.f_cpu} -DARDUINO={runtime.ide.version} -DARDUINO_{build.board} -DARDUINO_ARCH_{build.arch} {includes} "{source_file}" -o "{object_file}"
"#;

/// SAM `boards.txt` excerpt
pub const SAM_BOARDS: &str = r"
arduino_due_x.name=Arduino Due (Native USB Port)
arduino_due_x.upload.tool=bossac
arduino_due_x.upload.protocol=sam-ba
arduino_due_x.upload.maximum_size=524288
arduino_due_x.build.mcu=cortex-m3
arduino_due_x.build.usb_product='Arduino Due'
arduino_due_x.build.extra_flags=-D__SAM3X8E__ -DUSB_PRODUCT={build.usb_product}
";

/// Pre-1.5 `boards.txt` excerpt
pub const LEGACY_BOARDS: &str = r"
uno.name=Arduino Uno
uno.upload.protocol=arduino
uno.upload.maximum_size=32256
uno.upload.speed=115200
uno.build.mcu=atmega328p
uno.build.core=arduino

nano328.name=Arduino Nano w/ ATmega328
nano328.upload.protocol=arduino
nano328.upload.speed=57600
nano328.build.mcu=atmega328p
nano328.build.core=arduino
";

/// A fake Arduino install in a temporary directory
pub struct TestInstall {
    /// Install home
    pub dir: TempDir,
}

impl TestInstall {
    fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Arduino 1.6.5 layout with `avr` and `sam` families
    pub fn modern() -> Self {
        let install = Self::empty();
        install.create_file("revisions.txt", "ARDUINO 1.6.5 - 2015.06.15\n\n[core]\n");
        install.create_file("hardware/arduino/avr/boards.txt", AVR_BOARDS);
        install.create_file("hardware/arduino/avr/platform.txt", AVR_PLATFORM);
        install.create_dir("hardware/arduino/avr/cores/arduino");
        install.create_dir("hardware/arduino/avr/variants/standard");
        install.create_dir("hardware/arduino/avr/libraries");
        install.create_file("hardware/arduino/sam/boards.txt", SAM_BOARDS);
        install.create_file("hardware/arduino/sam/platform.txt", "name=Arduino ARM (32-bits) Boards\n");
        install.create_dir("hardware/tools/avr/bin");
        install.create_file("hardware/tools/avr/etc/avrdude.conf", "# avrdude config\n");
        install.create_dir("hardware/tools/g++_arm_none_eabi/bin");
        install
    }

    /// Arduino 1.0.5 layout: a single AVR tree without `revisions.txt`
    pub fn legacy() -> Self {
        let install = Self::empty();
        install.create_file("hardware/arduino/boards.txt", LEGACY_BOARDS);
        install.create_dir("hardware/arduino/cores/arduino");
        install.create_dir("hardware/arduino/variants/standard");
        install.create_dir("libraries/Servo");
        install.create_dir("hardware/tools/avr/bin");
        install.create_file("hardware/tools/avr/etc/avrdude.conf", "# avrdude config\n");
        install
    }

    /// Install home
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file below the install home
    pub fn create_file(&self, name: &str, content: &str) {
        self.dir
            .child(name)
            .write_str(content)
            .expect("Failed to write file");
    }

    /// Create a directory below the install home
    pub fn create_dir(&self, name: &str) {
        self.dir
            .child(name)
            .create_dir_all()
            .expect("Failed to create directory");
    }

    /// Run the binary against this install
    pub fn run(&self, args: &[&str]) -> Output {
        run_cli(self.dir.path(), args)
    }
}

/// Run the binary with `--arduino-home <home>`
pub fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_arduino-helpers"))
        .arg("--arduino-home")
        .arg(home)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute arduino-helpers")
}

/// Stdout of a finished command
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
