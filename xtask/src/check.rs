use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Bare-metal target used to prove the core crates build without std.
const NO_STD_TARGET: &str = "thumbv7em-none-eabihf";

struct Step {
    label: &'static str,
    args: Vec<&'static str>,
    /// Failure aborts the run; otherwise it is reported and skipped.
    fatal: bool,
}

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking workspace...".cyan().bold());
    println!();

    let total_start = Instant::now();

    let steps = [
        Step {
            label: "platform crate (no_std)",
            args: vec!["check", "-p", "stick-platform", "--target", NO_STD_TARGET],
            fatal: true,
        },
        Step {
            label: "firmware core (no_std)",
            args: vec!["check", "-p", "stick-firmware", "--target", NO_STD_TARGET],
            fatal: true,
        },
        Step {
            label: "firmware core (defmt)",
            args: vec![
                "check",
                "-p",
                "stick-firmware",
                "--target",
                NO_STD_TARGET,
                "--features",
                "defmt",
            ],
            fatal: true,
        },
        Step {
            label: "firmware core (host, tracing)",
            args: vec!["check", "-p", "stick-firmware", "--features", "std,tracing"],
            fatal: true,
        },
        Step {
            label: "clippy lints",
            args: vec!["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            fatal: false,
        },
        Step {
            label: "code formatting",
            args: vec!["fmt", "--all", "--check"],
            fatal: false,
        },
    ];

    for step in &steps {
        run_step(step)?;
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

fn run_step(step: &Step) -> Result<()> {
    println!("{}", format!("  Checking {}...", step.label).cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(&step.args)
        .output()
        .with_context(|| format!("Failed to run cargo for {}", step.label))?;

    if output.status.success() {
        println!(
            "{}",
            format!(
                "  ✓ {} passed in {:.2}s",
                step.label,
                start.elapsed().as_secs_f64()
            )
            .green()
        );
    } else if step.fatal {
        eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("{} failed", step.label);
    } else {
        eprintln!("{}", format!("  ⚠ {} reported issues", step.label).yellow().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
    }
    println!();

    Ok(())
}
