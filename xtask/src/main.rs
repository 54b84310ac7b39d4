// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the taxi ledger workspace.
//!
//! Most commands are thin wrappers over cargo and the usual lint tools.
//! `verify-schema` is the exception: it applies the embedded migrations to
//! a scratch `SQLite` database and checks that the constraints the ledger
//! relies on are actually declared.
//!
//! ```bash
//! cargo xtask ci
//! cargo xtask verify-schema
//! ```

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use duct::cmd;
use taxi_ledger_persistence::{ForeignKeyInfo, Persistence};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    // RUST_LOG overrides -v/-q
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level().into()),
        )
        .without_time()
        .init();

    if let Err(err) = args.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, deny, build, test, schema)
    CI,

    /// Build the workspace
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate an lcov coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependency licenses and advisories
    #[command(visible_alias = "cd")]
    Deny,

    /// Check for unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the workspace
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Check for typos
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run lib and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Apply migrations to a scratch database and check ledger constraints
    #[command(visible_alias = "vs")]
    VerifySchema,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(&["build", "--all-targets", "--all-features"]),
            Self::Check => run_cargo(&["check", "--all-targets", "--all-features"]),
            Self::Coverage => coverage(),
            Self::Deny => run_cargo(&["deny", "check"]),
            Self::Machete => run_tool(&["cargo-machete"]),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => run_cargo_nightly(&["fmt", "--all", "--check"]),
            Self::LintMarkdown => lint_markdown(),
            Self::LintTypos => run_tool(&["typos"]),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => run_cargo_nightly(&["fmt", "--all"]),
            Self::FixTypos => run_tool(&["typos", "-w"]),
            Self::Test => test(),
            Self::TestDocs => run_cargo(&["test", "--doc", "--all-features"]),
            Self::TestLibs => run_cargo(&["test", "--all-targets", "--all-features"]),
            Self::VerifySchema => verify_schema(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    run_cargo(&["deny", "check"])?;
    run_tool(&["cargo-machete"])?;
    run_cargo(&["build", "--all-targets", "--all-features"])?;
    test()?;
    verify_schema()
}

fn coverage() -> Result<()> {
    run_cargo(&[
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint everything; markdownlint failures only warn.
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    run_cargo_nightly(&["fmt", "--all", "--check"])?;
    run_tool(&["typos"])?;
    if let Err(err) = lint_markdown() {
        tracing::warn!("markdownlint reported issues: {err}");
    }
    Ok(())
}

fn lint_clippy() -> Result<()> {
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

fn fix_clippy() -> Result<()> {
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Build docs for each default member with docs.rs flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

fn lint_markdown() -> Result<()> {
    run_tool(&["markdownlint-cli2", "**/*.md", "!target", "!**/target"])
}

fn test() -> Result<()> {
    run_cargo(&["test", "--all-targets", "--all-features"])?;
    // slowest, so last
    run_cargo(&["test", "--doc", "--all-features"])
}

fn run_cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // we run inside a cargo subcommand, so CARGO is already set
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

fn run_tool(argv: &[&str]) -> Result<()> {
    let Some((program, args)) = argv.split_first() else {
        bail!("no program given");
    };
    cmd(*program, args).run_with_trace()?;
    Ok(())
}

/// A foreign key the schema must declare.
struct ExpectedForeignKey {
    table: &'static str,
    column: &'static str,
    references: &'static str,
    on_delete: &'static str,
}

/// Column sets that must be covered by a unique index.
const EXPECTED_UNIQUE: &[(&str, &[&str])] = &[
    ("accounts", &["login_name"]),
    ("checkins", &["driver_id", "shift_date"]),
    ("checkouts", &["driver_id", "shift_date"]),
    ("assignment_edges", &["driver_id", "supervisor_account_id"]),
];

const EXPECTED_FOREIGN_KEYS: &[ExpectedForeignKey] = &[
    ExpectedForeignKey {
        table: "accounts",
        column: "driver_id",
        references: "drivers",
        on_delete: "SET NULL",
    },
    ExpectedForeignKey {
        table: "checkins",
        column: "driver_id",
        references: "drivers",
        on_delete: "CASCADE",
    },
    ExpectedForeignKey {
        table: "checkouts",
        column: "driver_id",
        references: "drivers",
        on_delete: "CASCADE",
    },
    ExpectedForeignKey {
        table: "checkouts",
        column: "shift_date",
        references: "checkins",
        on_delete: "CASCADE",
    },
    ExpectedForeignKey {
        table: "assignment_edges",
        column: "driver_id",
        references: "drivers",
        on_delete: "CASCADE",
    },
    ExpectedForeignKey {
        table: "assignment_edges",
        column: "supervisor_account_id",
        references: "accounts",
        on_delete: "CASCADE",
    },
    ExpectedForeignKey {
        table: "modification_requests",
        column: "driver_id",
        references: "drivers",
        on_delete: "CASCADE",
    },
    ExpectedForeignKey {
        table: "modification_requests",
        column: "reviewer_account_id",
        references: "accounts",
        on_delete: "SET NULL",
    },
    ExpectedForeignKey {
        table: "breakdown_reports",
        column: "driver_id",
        references: "drivers",
        on_delete: "CASCADE",
    },
];

/// Apply the embedded migrations to a scratch database and check that the
/// uniqueness and cascade rules the ledger depends on are declared.
///
/// The audit log must carry no foreign keys so that it outlives the
/// records it describes.
fn verify_schema() -> Result<()> {
    let mut persistence: Persistence =
        Persistence::new_in_memory().wrap_err("failed to initialize scratch database")?;
    tracing::info!("migrations applied to scratch database");

    let mut problems: Vec<String> = Vec::new();

    for (table, columns) in EXPECTED_UNIQUE {
        let sets: Vec<Vec<String>> = persistence
            .unique_column_sets(table)
            .wrap_err_with(|| format!("failed to list unique indexes on {table}"))?;
        if !sets.iter().any(|set| set.iter().eq(columns.iter())) {
            problems.push(format!("{table}: missing UNIQUE({})", columns.join(", ")));
        }
    }

    for expected in EXPECTED_FOREIGN_KEYS {
        let keys: Vec<ForeignKeyInfo> = persistence
            .foreign_keys(expected.table)
            .wrap_err_with(|| format!("failed to list foreign keys on {}", expected.table))?;
        let found: bool = keys.iter().any(|key| {
            key.column == expected.column
                && key.references == expected.references
                && key.on_delete.eq_ignore_ascii_case(expected.on_delete)
        });
        if !found {
            problems.push(format!(
                "{}.{}: missing REFERENCES {} ON DELETE {}",
                expected.table, expected.column, expected.references, expected.on_delete
            ));
        }
    }

    let audit_keys: Vec<ForeignKeyInfo> = persistence
        .foreign_keys("audit_events")
        .wrap_err("failed to list foreign keys on audit_events")?;
    for key in &audit_keys {
        problems.push(format!(
            "audit_events.{}: unexpected reference to {}",
            key.column, key.references
        ));
    }

    if problems.is_empty() {
        tracing::info!("schema verified");
        return Ok(());
    }

    for problem in &problems {
        tracing::error!("{problem}");
    }
    bail!("schema verification found {} problem(s)", problems.len())
}

/// Logs a `duct::Expression` before running it.
trait ExpressionExt {
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // the command line may have scrolled away by now
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
