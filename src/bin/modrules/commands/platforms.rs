//! `modrules platforms` command

use anyhow::Result;

use modrules::rules::{table, FeatureSet};
use modrules::PlatformId;

pub fn execute() -> Result<()> {
    for platform in PlatformId::ALL {
        if !table::has_rules(platform) {
            println!("{:<8} no rules", platform);
            continue;
        }

        let enabled: Vec<&str> = FeatureSet::for_platform(platform)
            .switches()
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| name.trim_start_matches("FUNAPI_HAVE_"))
            .collect();

        println!("{:<8} {}", platform, enabled.join(" "));
    }

    Ok(())
}
