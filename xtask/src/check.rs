//! Workspace-wide quality checks.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use xshell::{Shell, cmd};

/// Library crates that must stay free of renderer and windowing crates.
const LIBRARY_CRATES: [&str; 4] = ["guide-math", "guide-types", "guide-layout", "guide-session"];

/// Dependency names that would pull an engine or window into the tree.
const FORBIDDEN_DEPENDENCIES: [&str; 4] = ["bevy", "wgpu", "winit", "glutin"];

type Step = (&'static str, fn(&Shell) -> Result<()>);

const STEPS: [Step; 6] = [
    ("Formatting", run_fmt_check),
    ("Clippy", run_clippy),
    ("Tests", run_tests),
    ("Documentation", run_doc_check),
    ("Safety", run_safety_scan),
    ("Layer 0", run_layer0_check),
];

/// Run all checks. Outside CI mode failures are reported but not fatal.
pub fn run(ci_mode: bool) -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "Guide Quality Check".bold());
    println!("{}", "===================".bold());
    println!();

    let mut all_passed = true;
    for (name, step) in STEPS {
        println!("{}", format!("Running {name}...").dimmed());
        let result = step(&sh);
        report_result(name, &result);
        all_passed &= result.is_ok();
    }

    println!();

    if all_passed {
        println!("{}", "✓ All checks passed!".green().bold());
        Ok(())
    } else if ci_mode {
        println!("{}", "✗ Some checks failed.".red().bold());
        std::process::exit(1);
    } else {
        println!("{}", "⚠ Some checks failed. Fix before committing.".yellow());
        Ok(())
    }
}

/// Run the full CI suite and print a failure summary.
pub fn run_ci() -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "Guide CI Suite".bold());
    println!("{}", "==============".bold());
    println!();

    let mut failures = Vec::new();
    for (i, (name, step)) in STEPS.iter().enumerate() {
        println!("{}", format!("Step {}/{}: {name}...", i + 1, STEPS.len()).cyan());
        match step(&sh) {
            Ok(()) => println!("  {} {name} OK", "✓".green()),
            Err(e) => {
                println!("  {} {name} failed", "✗".red());
                failures.push(format!("{name}: {e:#}"));
            }
        }
    }

    println!();

    if failures.is_empty() {
        println!("{}", "  ✓ CI PASSED".green().bold());
        Ok(())
    } else {
        println!("{}", "  ✗ CI FAILED".red().bold());
        println!();
        println!("Failures:");
        for f in &failures {
            println!("  - {}", f.red());
        }
        std::process::exit(1);
    }
}

/// Run only the Layer 0 dependency check.
pub fn run_layer0() -> Result<()> {
    let sh = Shell::new()?;
    let result = run_layer0_check(&sh);
    report_result("Layer 0", &result);
    result
}

fn report_result(name: &str, result: &Result<()>) {
    match result {
        Ok(()) => println!("  {} {}", "✓".green(), name),
        Err(e) => println!("  {} {} - {:#}", "✗".red(), name, e),
    }
}

fn run_fmt_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .context("Formatting check failed")?;
    Ok(())
}

fn run_clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings")
        .run()
        .context("Clippy check failed")?;
    Ok(())
}

fn run_tests(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --workspace")
        .run()
        .context("Tests failed")?;
    Ok(())
}

fn run_doc_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo doc --workspace --no-deps")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run()
        .context("Documentation build failed")?;
    Ok(())
}

fn run_layer0_check(sh: &Shell) -> Result<()> {
    let mut violations = Vec::new();
    for krate in LIBRARY_CRATES {
        let tree = cmd!(sh, "cargo tree -p {krate} --edges normal --prefix none")
            .ignore_stderr()
            .read()
            .with_context(|| format!("cargo tree failed for {krate}"))?;
        for line in tree.lines() {
            let name = line.split_whitespace().next().unwrap_or_default();
            if FORBIDDEN_DEPENDENCIES
                .iter()
                .any(|forbidden| name == *forbidden || name.starts_with(&format!("{forbidden}_")))
            {
                violations.push(format!("{krate} -> {name}"));
            }
        }
    }

    violations.sort();
    violations.dedup();
    if !violations.is_empty() {
        anyhow::bail!("Renderer dependencies found: {}", violations.join(", "));
    }
    Ok(())
}

/// Scan library sources for `unwrap()`/`expect()` outside test modules.
fn run_safety_scan(sh: &Shell) -> Result<()> {
    let root = sh.current_dir();
    let mut violations = Vec::new();

    for krate in LIBRARY_CRATES {
        let src = root.join("guide").join(krate).join("src");
        for file in rust_files(&src)? {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            violations.extend(
                scan_source(&text)
                    .into_iter()
                    .map(|line| format!("{}:{line}", relative(&root, &file))),
            );
        }
    }

    if !violations.is_empty() {
        for v in &violations {
            println!("    {}", v.yellow());
        }
        anyhow::bail!(
            "Found {} unwrap/expect calls in library code",
            violations.len()
        );
    }
    Ok(())
}

/// Line numbers of `unwrap()`/`expect(` calls before the file's test module.
fn scan_source(text: &str) -> Vec<usize> {
    text.lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter(|(_, line)| {
            let code = line.trim_start();
            !code.starts_with("//") && (code.contains(".unwrap()") || code.contains(".expect("))
        })
        .map(|(i, _)| i + 1)
        .collect()
}

fn rust_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.exists() {
        return Ok(files);
    }
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(rust_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn relative(root: &Path, file: &Path) -> String {
    file.strip_prefix(root).unwrap_or(file).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_skips_tests_and_comments() {
        let source = "\
fn a() -> Option<u8> { None }
// x.unwrap() in a comment
fn b() { let _ = a().unwrap(); }
#[cfg(test)]
mod tests { fn c() { super::a().unwrap(); } }
";
        assert_eq!(scan_source(source), vec![3]);
    }

    #[test]
    fn scan_finds_expect() {
        assert_eq!(scan_source("let v = x.expect(\"present\");"), vec![1]);
        assert!(scan_source("let v = x.unwrap_or_default();").is_empty());
    }
}
