use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for ramtester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test(TestArgs),
    /// Run benchmarks
    Bench {
        /// Only run benchmarks whose name contains this filter
        filter: Option<String>,
    },
    /// Run the diagnostic binary against a simulated machine
    Diagnose {
        /// Build in release mode
        #[arg(long)]
        release: bool,
        /// Arguments passed through to ramtester
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
}

#[derive(Args, Default)]
struct TestArgs {
    /// Run doc tests only
    #[arg(long)]
    doc: bool,
    /// Run only bank enumeration tests
    #[arg(long)]
    bank: bool,
    /// Run only pattern engine tests
    #[arg(long)]
    pattern: bool,
    /// Run only simulated machine tests
    #[arg(long)]
    machine: bool,
    /// Run only diagnostic driver tests
    #[arg(long)]
    diagnostic: bool,
}

impl TestArgs {
    fn modules(&self) -> Vec<(&'static str, &'static str)> {
        [
            (self.bank, "core::bank", "Bank"),
            (self.pattern, "core::pattern", "Pattern"),
            (self.machine, "core::machine", "Machine"),
            (self.diagnostic, "core::diagnostic", "Diagnostic"),
        ]
        .into_iter()
        .filter(|(enabled, _, _)| *enabled)
        .map(|(_, path, name)| (path, name))
        .collect()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Check { verbose } => run_check(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test(args) => run_test(&args),
        Commands::Bench { filter } => run_bench(filter.as_deref()),
        Commands::Diagnose { release, args } => run_diagnose(release, &args),
        Commands::PreCommit => run_pre_commit(),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task("Test", || run_test(&TestArgs::default()), verbose)?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_check(verbose: bool) -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ Checks passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("fmt").arg("--all");

    if check {
        cmd.arg("--").arg("--check");
    }

    execute_command(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("clippy").arg("--workspace").arg("--all-targets");

    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }

    execute_command(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("build").arg("--workspace");

    if release {
        cmd.arg("--release");
    }

    execute_command(&mut cmd)
}

fn run_test(args: &TestArgs) -> Result<()> {
    if args.doc {
        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--doc");
        return execute_command(&mut cmd);
    }

    let modules = args.modules();

    if modules.is_empty() {
        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--workspace");
        return execute_command(&mut cmd);
    }

    let mut failed = Vec::new();

    for (module_path, module_name) in &modules {
        println!("{} Running {} tests...", "→".blue(), module_name.bold());

        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--lib").arg(module_path);

        match execute_command(&mut cmd) {
            Ok(_) => println!("{} {} tests passed\n", "✓".green(), module_name),
            Err(e) => {
                println!("{} {} tests failed\n", "✗".red(), module_name);
                if modules.len() == 1 {
                    return Err(e);
                }
                failed.push(*module_name);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} tests failed", failed.join(", "))
    }
}

fn run_bench(filter: Option<&str>) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("bench");

    if let Some(filter) = filter {
        cmd.arg("--").arg(filter);
    }

    execute_command(&mut cmd)
}

fn run_diagnose(release: bool, args: &[String]) -> Result<()> {
    println!("{}", "=== RAM Diagnostic ===".bold().blue());
    println!(
        "{} Build mode: {}",
        "→".blue(),
        if release {
            "release".green().bold()
        } else {
            "debug".yellow().bold()
        }
    );
    if !args.is_empty() {
        println!("{} Arguments: {}", "→".blue(), args.join(" ").cyan());
    }
    println!();

    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.arg("run").arg("--bin").arg("ramtester");

    if release {
        cmd.arg("--release");
    }

    cmd.arg("--").args(args);

    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    match status.code() {
        Some(0) => {
            println!(
                "\n{} Diagnostic passed in {}",
                "✓".green().bold(),
                format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
            );
            Ok(())
        }
        Some(1) => {
            println!("\n{} Diagnostic reported failures", "✗".red().bold());
            anyhow::bail!("diagnostic found memory faults")
        }
        _ => {
            println!("\n{} Diagnostic could not run", "✗".red().bold());
            anyhow::bail!("ramtester exited with: {}", status)
        }
    }
}

fn run_pre_commit() -> Result<()> {
    println!("{}", "=== Pre-commit Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), false)?;
    run_task("Clippy", || run_clippy(false), false)?;
    run_task("Test", || run_test(&TestArgs::default()), false)?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ Pre-commit checks passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", elapsed.as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
