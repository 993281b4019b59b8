//! `modrules flags` command

use anyhow::Result;

use modrules::util::Config;

use super::Request;
use crate::cli::FlagsArgs;

pub fn execute(args: FlagsArgs, config: &Config) -> Result<()> {
    let request = Request::from_inputs(&args.inputs, config)?;
    let resolved = request.resolve()?;

    if !args.link {
        println!(
            "# Compile flags for `{}` ({} {}):",
            resolved.module, resolved.platform, resolved.target
        );
        for flag in resolved.compile_flags() {
            println!("  {}", flag);
        }
    }

    if !args.compile && !args.link {
        println!();
    }

    if !args.compile {
        println!(
            "# Link flags for `{}` ({} {}):",
            resolved.module, resolved.platform, resolved.target
        );
        for flag in resolved.link_flags() {
            println!("  {}", flag);
        }
        for package in resolved.engine_packages() {
            println!("  # engine package: {}", package);
        }
    }

    Ok(())
}
