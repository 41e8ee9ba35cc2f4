//! Generator configuration

use crate::backend::BeanOptions;

/// Default location of the module manifest resource.
pub const DEFAULT_MANIFEST_PATH: &str = "META-INF/ebean-generated-info.mf";
/// Default location of the module-info loader services registration.
pub const DEFAULT_SERVICES_PATH: &str = "META-INF/services/io.ebean.config.ModuleInfoLoader";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Stamp generated sources with `@Generated`
    pub generated_annotation: bool,
    /// Path depth handed to associations of root query beans
    pub max_path_depth: u32,
    /// Package of the module-info loader; derived from the entities when unset
    pub module_package: Option<String>,
    /// Resource path of the manifest
    pub manifest_path: String,
    /// Resource path of the services registration
    pub services_path: String,
    /// Ignore the prior manifest instead of merging it
    pub full_rescan: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generated_annotation: true,
            max_path_depth: 1,
            module_package: None,
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            services_path: DEFAULT_SERVICES_PATH.to_string(),
            full_rescan: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generated_annotation(mut self, enabled: bool) -> Self {
        self.generated_annotation = enabled;
        self
    }

    /// Set the association path depth (clamped to at least 1)
    pub fn with_max_path_depth(mut self, depth: u32) -> Self {
        self.max_path_depth = depth.max(1);
        self
    }

    pub fn with_module_package(mut self, package: impl Into<String>) -> Self {
        self.module_package = Some(package.into());
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<String>) -> Self {
        self.manifest_path = path.into();
        self
    }

    pub fn with_services_path(mut self, path: impl Into<String>) -> Self {
        self.services_path = path.into();
        self
    }

    pub fn with_full_rescan(mut self, full: bool) -> Self {
        self.full_rescan = full;
        self
    }

    /// Rendering options for query beans
    pub fn bean_options(&self) -> BeanOptions {
        BeanOptions {
            generated_annotation: self.generated_annotation,
            max_path_depth: self.max_path_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Default config tests
    // ========================================

    #[test]
    fn test_default_config_generated_annotation() {
        let config = GeneratorConfig::default();
        assert!(config.generated_annotation);
    }

    #[test]
    fn test_default_config_max_path_depth() {
        let config = GeneratorConfig::default();
        assert_eq!(config.max_path_depth, 1);
    }

    #[test]
    fn test_default_config_paths() {
        let config = GeneratorConfig::default();
        assert_eq!(config.manifest_path, "META-INF/ebean-generated-info.mf");
        assert_eq!(config.services_path, "META-INF/services/io.ebean.config.ModuleInfoLoader");
    }

    #[test]
    fn test_default_config_module_package_unset() {
        let config = GeneratorConfig::default();
        assert_eq!(config.module_package, None);
        assert!(!config.full_rescan);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(GeneratorConfig::new(), GeneratorConfig::default());
    }

    // ========================================
    // Builder tests
    // ========================================

    #[test]
    fn test_builder_chaining() {
        let config = GeneratorConfig::new()
            .with_generated_annotation(false)
            .with_max_path_depth(3)
            .with_module_package("org.example")
            .with_manifest_path("custom.mf")
            .with_services_path("services.txt")
            .with_full_rescan(true);
        assert!(!config.generated_annotation);
        assert_eq!(config.max_path_depth, 3);
        assert_eq!(config.module_package.as_deref(), Some("org.example"));
        assert_eq!(config.manifest_path, "custom.mf");
        assert_eq!(config.services_path, "services.txt");
        assert!(config.full_rescan);
    }

    #[test]
    fn test_zero_depth_is_clamped() {
        let config = GeneratorConfig::new().with_max_path_depth(0);
        assert_eq!(config.max_path_depth, 1);
    }

    #[test]
    fn test_bean_options_follow_config() {
        let options = GeneratorConfig::new()
            .with_generated_annotation(false)
            .with_max_path_depth(2)
            .bean_options();
        assert_eq!(
            options,
            BeanOptions {
                generated_annotation: false,
                max_path_depth: 2,
            }
        );
    }
}
