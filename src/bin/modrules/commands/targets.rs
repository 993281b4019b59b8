//! `modrules targets` command

use anyhow::Result;

use modrules::rules::{ModuleId, TargetRules};

pub fn execute() -> Result<()> {
    for rules in TargetRules::all() {
        println!(
            "{:<28} {:<7} modules: {}",
            rules.name,
            rules.kind,
            rules.extra_modules.join(", ")
        );
    }

    println!();
    for module in ModuleId::ALL {
        let targets: Vec<String> = module
            .rules()
            .targets
            .iter()
            .map(|t| t.to_string())
            .collect();
        println!("{:<28} builds for: {}", module.name(), targets.join(", "));
    }

    Ok(())
}
