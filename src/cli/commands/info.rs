//! CLI command implementation for `arduino-helpers info`

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{status, OutputConfig};
use crate::core::install::Installation;
use crate::infra::install::ArduinoContext;

#[derive(Serialize)]
struct InstallInfo {
    home: PathBuf,
    version: Option<String>,
    pre_1_5: bool,
    families: Vec<String>,
    compiler_dirs: BTreeMap<String, PathBuf>,
    sketchbook: Option<PathBuf>,
    build: BuildInfo,
}

#[derive(Serialize)]
struct BuildInfo {
    version: &'static str,
    git_sha: Option<&'static str>,
    build_date: Option<&'static str>,
    target: Option<&'static str>,
}

impl BuildInfo {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_sha: option_env!("VERGEN_GIT_SHA"),
            build_date: option_env!("VERGEN_BUILD_DATE"),
            target: option_env!("VERGEN_CARGO_TARGET_TRIPLE"),
        }
    }
}

/// Execute the info command
pub fn execute(context: &ArduinoContext, output: OutputConfig) -> Result<()> {
    let sketchbook = match context.sketchbook_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    };
    let info = InstallInfo {
        home: context.home().to_path_buf(),
        version: context.version().map(ToString::to_string),
        pre_1_5: context.is_legacy(),
        families: context.families().map(String::from).collect(),
        compiler_dirs: context.compiler_dir_by_family(),
        sketchbook,
        build: BuildInfo::current(),
    };

    if output.json {
        return output.print_json(&info);
    }

    println!("{} Arduino install: {}", status::INFO, info.home.display());
    println!("  Version:    {}", info.version.as_deref().unwrap_or("unknown"));
    println!("  Pre-1.5:    {}", if info.pre_1_5 { "yes" } else { "no" });
    println!("  Families:   {}", info.families.join(", "));
    for (family, dir) in &info.compiler_dirs {
        println!("  Compiler ({family}): {}", dir.display());
    }
    if let Some(dir) = &info.sketchbook {
        println!("  Sketchbook: {}", dir.display());
    }
    println!(
        "{} arduino-helpers {} ({}, {})",
        status::INFO,
        info.build.version,
        info.build.git_sha.unwrap_or("unknown"),
        info.build.target.unwrap_or("unknown target")
    );
    Ok(())
}
