//! Target rules of the sample project.

use serde::Serialize;

use crate::core::target::TargetKind;
use crate::rules::errors::ResolveError;
use crate::rules::module::ModuleId;

/// Name of the sample project; targets are named after it.
pub const PROJECT_NAME: &str = "funapi_plugin_ue4";

/// A buildable target and the modules it adds to the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRules {
    pub name: String,
    pub kind: TargetKind,
    pub extra_modules: Vec<String>,
}

impl TargetRules {
    /// Target rules for a target kind.
    pub fn for_kind(kind: TargetKind) -> Result<Self, ResolveError> {
        match kind {
            TargetKind::Game | TargetKind::Editor | TargetKind::Server => Ok(TargetRules {
                name: format!("{}{}", PROJECT_NAME, kind.target_suffix()),
                kind,
                extra_modules: vec![ModuleId::SampleGame.name().to_string()],
            }),
            TargetKind::Client | TargetKind::Program => Err(ResolveError::InvalidTarget {
                target: kind.to_string(),
                module: None,
            }),
        }
    }

    /// Every target the project defines.
    pub fn all() -> Vec<TargetRules> {
        TargetKind::ALL
            .into_iter()
            .filter_map(|kind| TargetRules::for_kind(kind).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_names() {
        assert_eq!(TargetRules::for_kind(TargetKind::Game).unwrap().name, "funapi_plugin_ue4");
        assert_eq!(
            TargetRules::for_kind(TargetKind::Editor).unwrap().name,
            "funapi_plugin_ue4Editor"
        );
        assert_eq!(
            TargetRules::for_kind(TargetKind::Server).unwrap().name,
            "funapi_plugin_ue4Server"
        );
    }

    #[test]
    fn test_targets_build_sample_module() {
        for rules in TargetRules::all() {
            assert_eq!(rules.extra_modules, vec!["funapi_plugin_ue4"]);
        }
        assert_eq!(TargetRules::all().len(), 3);
    }

    #[test]
    fn test_program_target_rejected() {
        assert!(matches!(
            TargetRules::for_kind(TargetKind::Program),
            Err(ResolveError::InvalidTarget { .. })
        ));
    }
}
