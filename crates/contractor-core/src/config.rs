use crate::record::RecordWritePolicy;
use crate::template::PlaceholderStyle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration, read from `config.toml`.
///
/// Relative paths are resolved against the directory the configuration was
/// loaded from.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ContractorConfig {
    /// Directory holding `{type}_template.{ext}` files.
    pub templates_dir: PathBuf,
    /// Directory where generated documents are written.
    pub output_dir: PathBuf,
    /// TOML file holding contract records.
    pub records_file: PathBuf,
    /// Extension of template and generated files, without the dot.
    pub template_extension: String,
    pub placeholder_style: PlaceholderStyle,
    pub record_write_policy: RecordWritePolicy,
    /// User allowed to run admin commands; 0 disables admin access.
    pub admin_user_id: i64,
}

impl Default for ContractorConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("output"),
            records_file: PathBuf::from("db/contracts.toml"),
            template_extension: "txt".to_string(),
            placeholder_style: PlaceholderStyle::default(),
            record_write_policy: RecordWritePolicy::default(),
            admin_user_id: 0,
        }
    }
}

impl ContractorConfig {
    /// Whether `user_id` carries the admin flag.
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_user_id != 0 && self.admin_user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ContractorConfig = toml::from_str(
            r#"
admin_user_id = 42
placeholder_style = "single_brace"
"#,
        )
        .unwrap();
        assert_eq!(config.admin_user_id, 42);
        assert_eq!(config.placeholder_style, PlaceholderStyle::SingleBrace);
        assert_eq!(config.template_extension, "txt");
        assert_eq!(config.record_write_policy, RecordWritePolicy::Append);
    }

    #[test]
    fn test_zero_admin_id_grants_nothing() {
        let config = ContractorConfig::default();
        assert!(!config.is_admin(0));
        let config = ContractorConfig {
            admin_user_id: 7,
            ..Default::default()
        };
        assert!(config.is_admin(7));
        assert!(!config.is_admin(8));
    }
}
