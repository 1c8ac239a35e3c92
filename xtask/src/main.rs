use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for spincube")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run fmt, clippy, tests and doc in order, stopping at the first failure
    Check,
    /// Check formatting
    Fmt,
    /// Lint every crate and target, warnings are errors
    Clippy,
    /// Run all tests (headless; no GPU needed)
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Launch the desktop app with debug logging
    Run,
}

/// One cargo invocation.
struct Step {
    name: &'static str,
    args: &'static [&'static str],
}

const FMT: Step = Step {
    name: "fmt",
    args: &["fmt", "--all", "--", "--check"],
};
const CLIPPY: Step = Step {
    name: "clippy",
    args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
};
const TEST: Step = Step {
    name: "test",
    args: &["test", "--workspace"],
};
const DOC: Step = Step {
    name: "doc",
    args: &["doc", "--workspace", "--no-deps"],
};
const BUILD: Step = Step {
    name: "build",
    args: &["build", "--workspace"],
};
const RUN: Step = Step {
    name: "run",
    args: &["run", "-p", "spincube-desktop", "--", "--verbose"],
};

fn steps(command: Commands) -> &'static [Step] {
    match command {
        Commands::Check => &[FMT, CLIPPY, TEST, DOC],
        Commands::Fmt => &[FMT],
        Commands::Clippy => &[CLIPPY],
        Commands::Test => &[TEST],
        Commands::Doc => &[DOC],
        Commands::Build => &[BUILD],
        Commands::Run => &[RUN],
    }
}

fn run(step: &Step) -> Result<()> {
    println!("==> cargo {}", step.args.join(" "));
    let status = Command::new("cargo").args(step.args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed", step.name);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    for step in steps(cli.command) {
        run(step)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_runs_lint_before_tests() {
        let names: Vec<_> = steps(Commands::Check).iter().map(|s| s.name).collect();
        assert_eq!(names, ["fmt", "clippy", "test", "doc"]);
    }

    #[test]
    fn every_step_invokes_a_cargo_subcommand() {
        let single = [
            Commands::Fmt,
            Commands::Clippy,
            Commands::Test,
            Commands::Doc,
            Commands::Build,
            Commands::Run,
        ];
        for command in single {
            let plan = steps(command);
            assert_eq!(plan.len(), 1);
            assert_eq!(plan[0].args[0], plan[0].name);
        }
    }
}
