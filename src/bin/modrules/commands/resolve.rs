//! `modrules resolve` command

use anyhow::Result;

use modrules::util::config::{Config, OutputFormat};
use modrules::ResolvedConfig;

use super::Request;
use crate::cli::ResolveArgs;

pub fn execute(args: ResolveArgs, config: &Config) -> Result<()> {
    let request = Request::from_inputs(&args.inputs, config)?;
    let resolved = request.resolve()?;

    let format = args.format.or(config.defaults.format).unwrap_or_default();
    let fingerprint = resolved.fingerprint()?;

    tracing::info!(
        "resolved {} for {} {} ({})",
        resolved.module,
        resolved.platform,
        resolved.target,
        fingerprint
    );

    match format {
        OutputFormat::Json => println!("{}", resolved.to_json()?),
        OutputFormat::Flags => {
            for flag in resolved.compile_flags().iter().chain(&resolved.link_flags()) {
                println!("{}", flag);
            }
        }
        OutputFormat::Summary => print_summary(&resolved, &fingerprint),
    }

    Ok(())
}

fn print_summary(resolved: &ResolvedConfig, fingerprint: &str) {
    println!(
        "{} for {} ({}) on toolchain {}",
        resolved.module, resolved.platform, resolved.target, resolved.toolchain
    );
    println!("  fingerprint: {}", fingerprint);

    println!(
        "  {} ({}):",
        resolved.toolchain.definitions_field(),
        resolved.definitions.len()
    );
    for define in &resolved.definitions {
        println!("    {}", define);
    }

    print_list("public includes", resolved.public_include_dirs.iter().map(|p| p.display().to_string()));
    print_list("private includes", resolved.private_include_dirs.iter().map(|p| p.display().to_string()));
    print_list("library dirs", resolved.library_dirs.iter().map(|p| p.display().to_string()));
    print_list("libraries", resolved.libraries.iter().map(|l| l.to_string()));
    print_list("public modules", resolved.public_dependencies.iter().cloned());
    print_list("private modules", resolved.private_dependencies.iter().cloned());

    match &resolved.private_pch {
        Some(pch) => println!("  private pch: {}", pch.display()),
        None => println!("  private pch: (unsupported by toolchain)"),
    }
}

fn print_list(label: &str, items: impl Iterator<Item = String>) {
    let items: Vec<String> = items.collect();
    if items.is_empty() {
        return;
    }
    println!("  {}:", label);
    for item in items {
        println!("    {}", item);
    }
}
