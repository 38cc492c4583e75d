use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

/// Which crate's API docs to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocTarget {
    Platform,
    Firmware,
    All,
}

/// Package, rustdoc directory and the host feature set its mocks and
/// logging backend need to show up in the docs.
struct CrateDoc {
    package: &'static str,
    dir: &'static str,
    features: &'static str,
}

const PLATFORM: CrateDoc = CrateDoc {
    package: "stick-platform",
    dir: "stick_platform",
    features: "std",
};

const FIRMWARE: CrateDoc = CrateDoc {
    package: "stick-firmware",
    dir: "stick_firmware",
    features: "std,tracing",
};

impl DocTarget {
    fn crates(self) -> &'static [CrateDoc] {
        match self {
            DocTarget::Platform => &[PLATFORM],
            DocTarget::Firmware => &[FIRMWARE],
            DocTarget::All => &[PLATFORM, FIRMWARE],
        }
    }
}

pub fn run(target: DocTarget, open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building API docs...".cyan().bold());
    println!();

    let start = Instant::now();
    let crates = target.crates();

    for (i, krate) in crates.iter().enumerate() {
        // Only the last invocation opens a browser tab.
        let open_this = open && i.saturating_add(1) == crates.len();
        build(krate, open_this)?;
    }

    println!(
        "{}",
        format!("✓ Docs built in {:.2}s", start.elapsed().as_secs_f64()).green()
    );

    if !open {
        let root = target_dir();
        for krate in crates {
            let index = root.join("doc").join(krate.dir).join("index.html");
            println!("   {}", index.display().to_string().dimmed());
        }
    }
    println!();

    Ok(())
}

fn build(krate: &CrateDoc, open: bool) -> Result<()> {
    println!(
        "{}",
        format!("  {} [{}]", krate.package, krate.features).cyan()
    );

    let mut cmd = Command::new("cargo");
    cmd.args([
        "doc",
        "-p",
        krate.package,
        "--no-deps",
        "--features",
        krate.features,
    ]);
    if open {
        cmd.arg("--open");
    }

    let output = cmd
        .output()
        .with_context(|| format!("Failed to run cargo doc for {}", krate.package))?;
    if !output.status.success() {
        eprintln!("{}", format!("  ✗ {} docs failed", krate.package).red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("cargo doc failed for {}", krate.package);
    }
    Ok(())
}

fn target_dir() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target"))
}

#[cfg(test)]
mod tests {
    use super::DocTarget;

    #[test]
    fn test_targets_map_to_packages() {
        let packages = |t: DocTarget| t.crates().iter().map(|c| c.package).collect::<Vec<_>>();
        assert_eq!(packages(DocTarget::Platform), ["stick-platform"]);
        assert_eq!(packages(DocTarget::Firmware), ["stick-firmware"]);
        assert_eq!(
            packages(DocTarget::All),
            ["stick-platform", "stick-firmware"]
        );
    }

    #[test]
    fn test_firmware_docs_use_host_features() {
        let firmware = DocTarget::Firmware.crates().first().unwrap();
        assert_eq!(firmware.features, "std,tracing");
        assert_eq!(firmware.dir, "stick_firmware");
    }
}
