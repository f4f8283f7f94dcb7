use std::env;
use std::path::{Path, PathBuf};

use argh::FromArgs;

type DynError = Box<dyn std::error::Error>;

#[derive(FromArgs, PartialEq, Debug)]
/// Developer tasks for the jex workspace.
struct XtaskArgs {
    #[argh(subcommand)]
    task: Task,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum Task {
    Coverage(CoverageTask),
    Checks(ChecksTask),
}

#[derive(FromArgs, PartialEq, Debug)]
/// Measure lexer test coverage with grcov.
#[argh(subcommand, name = "cov")]
struct CoverageTask {
    #[argh(switch)]
    /// render an html report instead of the default lcov file.
    report: bool,
}

#[derive(FromArgs, PartialEq, Debug)]
/// Run the format, lint, and test gauntlet expected of every change.
#[argh(subcommand, name = "ci")]
struct ChecksTask {
    #[argh(switch)]
    /// rewrite formatting and clippy findings in place instead of just checking.
    fix: bool,
}

fn main() -> Result<(), DynError> {
    match argh::from_env::<XtaskArgs>().task {
        Task::Coverage(task) => coverage(task.report),
        Task::Checks(task) => checks(task.fix),
    }
}

fn coverage(report: bool) -> Result<(), DynError> {
    let out_dir = workspace_root().join("target").join("coverage");
    fs_extra::dir::create_all(&out_dir, true)?;

    println!("xtask: running instrumented tests.");
    duct::cmd!(cargo(), "test", "--tests")
        .env("CARGO_INCREMENTAL", "0")
        .env("RUSTFLAGS", "-C instrument-coverage")
        .env("LLVM_PROFILE_FILE", "jex-test-%p-%m.profraw")
        .run()?;

    println!("xtask: reducing profiles with grcov.");
    let (format, out_path) = if report {
        ("html", out_dir.join("html"))
    } else {
        ("lcov", out_dir.join("lexer.lcov"))
    };
    duct::cmd!(
        "grcov",
        ".",
        "--binary-path",
        workspace_root().join("target").join("debug").join("deps"),
        "-s",
        ".",
        "-t",
        format,
        "--branch",
        "--ignore-not-existing",
        "--ignore", // system and registry sources contribute nothing to jex coverage
        "/*",
        "--ignore", // nor does this task runner
        "xtask/*",
        "--ignore", // jexc is driven by hand, not by the test suite
        "lang/src/bin/*",
        "--ignore", // integration drivers execute unconditionally in a test build
        "lang/tests/*",
        "--ignore", // so does the unit test code itself
        "*_unittests.rs",
        "-o",
        out_path,
    )
    .run()?;

    println!("xtask: removing *.profraw litter.");
    for profile in glob::glob("**/*.profraw")? {
        fs_extra::file::remove(profile?)?;
    }

    if report {
        println!("xtask: coverage report written to target/coverage/html/index.html.");
    } else {
        println!("xtask: lcov data written to target/coverage/lexer.lcov.");
    }
    Ok(())
}

fn checks(fix: bool) -> Result<(), DynError> {
    let cargo = cargo();

    println!("xtask: rustfmt.");
    if fix {
        duct::cmd!(&cargo, "fmt", "--all").run()?;
    } else {
        duct::cmd!(&cargo, "fmt", "--all", "--", "--check").run()?;
    }

    println!("xtask: clippy.");
    if fix {
        duct::cmd!(&cargo, "clippy", "--workspace", "--fix", "--allow-dirty").run()?;
    } else {
        duct::cmd!(&cargo, "clippy", "--workspace", "--", "--deny", "clippy::all").run()?;
    }

    println!("xtask: tests, with warnings denied.");
    duct::cmd!(&cargo, "test", "--workspace").env("RUSTFLAGS", "-D warnings").run()?;

    println!("xtask: clean.");
    Ok(())
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(1).unwrap().to_path_buf()
}

fn cargo() -> String {
    env::var("CARGO").unwrap_or_else(|_| String::from("cargo"))
}
