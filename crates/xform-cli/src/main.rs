//! xform - backend report and equivalence audit for xform-rs
//!
//! Shows which SIMD levels the host runs natively and checks that every
//! backend reproduces the scalar kernels.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "xform")]
#[command(author, version, about = "Backend report and equivalence audit for xform-rs")]
#[command(long_about = "
Inspect and verify the SIMD backends of xform-rs.

Examples:
  xform levels                      # Host capability and compiled default
  xform levels --strict             # Fail if the default exceeds the host
  xform audit                       # Every backend against scalar
  xform audit --level sse4 -n 4096  # One backend, larger sample set
  RUST_LOG=trace xform audit        # Kernel-level events
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Report SIMD levels available on this host
    #[command(visible_alias = "l")]
    Levels(LevelsArgs),

    /// Compare every backend against the scalar reference
    #[command(visible_alias = "a")]
    Audit(AuditArgs),
}

#[derive(Args)]
struct LevelsArgs {
    /// Exit with an error if the compiled default is not native on this host
    #[arg(long)]
    strict: bool,
}

#[derive(Args)]
struct AuditArgs {
    /// Audit only this level (scalar, sse2, sse4, avx)
    #[arg(short, long)]
    level: Option<String>,

    /// Number of sample vectors
    #[arg(short = 'n', long, default_value = "1024")]
    samples: usize,

    /// Largest accepted relative deviation for reduction kernels
    #[arg(short, long, default_value = "1e-5")]
    tolerance: f32,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Levels(args) => commands::levels::run(args, cli.verbose),
        Commands::Audit(args) => commands::audit::run(args, cli.verbose),
    }
}
