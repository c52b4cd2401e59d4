//! SIMD level report

use crate::LevelsArgs;
use anyhow::{Context, Result};
use tracing::warn;
use xform_core::{DEFAULT_LEVEL, describe_levels, host_level, verify_host};

pub fn run(args: LevelsArgs, verbose: u8) -> Result<()> {
    println!("Compiled default: {DEFAULT_LEVEL}");
    println!("Host best:        {}", host_level());
    println!();
    print!("{}", describe_levels());

    if verbose > 0 {
        println!();
        println!("Kernels are selected at compile time; enable the sse2/sse4/avx");
        println!("features or matching target features to raise the default.");
    }

    match verify_host() {
        Ok(_) => Ok(()),
        Err(e) if args.strict => Err(e).context("Host check failed"),
        Err(e) => {
            warn!("{e}");
            Ok(())
        }
    }
}
