//! Rendering of the client package artifacts
//!
//! Every function here is pure: it turns a service name and a version into
//! text and never touches the filesystem.

use semver::Version;
use tera::{Context, Tera};

use crate::core::config::GeneratorConfig;
use crate::core::error::{Error, Result};
use crate::generation::manifest::{PackageManifest, TsConfig};
use crate::generation::{ClientArtifactSet, ServiceName};

const README_TEMPLATE: &str = "README.md";
const ENTRY_POINT_TEMPLATE: &str = "index.ts";

/// Tera-based renderer for the client package
pub struct ArtifactTemplater {
    tera: Tera,
    config: GeneratorConfig,
}

impl ArtifactTemplater {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                README_TEMPLATE,
                include_str!("../../templates/client/README.md.tera"),
            ),
            (
                ENTRY_POINT_TEMPLATE,
                include_str!("../../templates/client/index.ts.tera"),
            ),
        ])?;

        Ok(Self {
            tera,
            config: config.clone(),
        })
    }

    /// Scoped package name, e.g. `@events-project/grpc-account`
    pub fn package_name(&self, service: &ServiceName) -> String {
        self.config.package_name(service.as_str())
    }

    /// Render all four text artifacts
    pub fn render(&self, service: &ServiceName, version: &Version) -> Result<ClientArtifactSet> {
        Ok(ClientArtifactSet {
            manifest: self.render_manifest(service, version)?,
            build_config: render_build_config()?,
            readme: self.render_readme(service)?,
            entry_point: self.render_entry_point(service)?,
        })
    }

    pub fn render_manifest(&self, service: &ServiceName, version: &Version) -> Result<String> {
        let manifest = PackageManifest::new(
            &self.package_name(service),
            service.as_str(),
            &version.to_string(),
            self.config.registry_base(),
            &self.config.repository_url,
        );
        Ok(serde_json::to_string_pretty(&manifest)?)
    }

    pub fn render_readme(&self, service: &ServiceName) -> Result<String> {
        self.render_template(README_TEMPLATE, service)
    }

    pub fn render_entry_point(&self, service: &ServiceName) -> Result<String> {
        self.render_template(ENTRY_POINT_TEMPLATE, service)
    }

    fn render_template(&self, template: &str, service: &ServiceName) -> Result<String> {
        let context = self.context(service);
        self.tera
            .render(template, &context)
            .map_err(|e| Error::template(format!("Failed to render {template}: {e}")))
    }

    /// Readme and entry point share one context, so the derived names agree
    fn context(&self, service: &ServiceName) -> Context {
        let mut context = Context::new();
        context.insert("service_name", service.as_str());
        context.insert("package_name", &self.package_name(service));
        context.insert("env_var", &service.env_var_name());
        context.insert("type_name", &service.type_name());
        context.insert("binding_name", &service.binding_name());
        context
    }
}

/// `tsconfig.json` content; independent of the service
pub fn render_build_config() -> Result<String> {
    Ok(serde_json::to_string_pretty(&TsConfig::default())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templater() -> ArtifactTemplater {
        ArtifactTemplater::new(&GeneratorConfig::default()).unwrap()
    }

    fn account() -> ServiceName {
        ServiceName::new("account").unwrap()
    }

    #[test]
    fn test_manifest_identity_and_version() {
        let version = Version::new(1, 4, 8);
        let manifest = templater().render_manifest(&account(), &version).unwrap();
        let parsed: PackageManifest = serde_json::from_str(&manifest).unwrap();

        assert_eq!(parsed.name, "@events-project/grpc-account");
        assert_eq!(parsed.version, "1.4.8");
        assert_eq!(parsed.description, "gRPC client for account service");
        assert_eq!(parsed.publish_config.registry, "https://npm.pkg.github.com");
        assert_eq!(
            parsed.repository.url,
            "git+https://github.com/events-project/grpc-clients.git"
        );
        assert_eq!(parsed.scripts["build"], "tsc");
        assert!(parsed.dependencies.contains_key("nice-grpc"));
    }

    #[test]
    fn test_manifest_uses_two_space_indent() {
        let manifest = templater()
            .render_manifest(&account(), &Version::new(1, 0, 0))
            .unwrap();
        assert!(manifest.starts_with("{\n  \"name\": \"@events-project/grpc-account\""));
    }

    #[test]
    fn test_build_config_is_input_independent() {
        let first = render_build_config().unwrap();
        let second = render_build_config().unwrap();
        assert_eq!(first, second);

        let parsed: TsConfig = serde_json::from_str(&first).unwrap();
        assert_eq!(parsed, TsConfig::default());
        assert!(parsed.compiler_options.strict);
        assert!(parsed.compiler_options.declaration);
    }

    #[test]
    fn test_env_var_consistent_between_readme_and_entry_point() {
        let templater = templater();
        let service = account();
        let readme = templater.render_readme(&service).unwrap();
        let entry_point = templater.render_entry_point(&service).unwrap();

        assert!(readme.contains("GRPC_ACCOUNT_URL"));
        assert!(entry_point.contains("process.env.GRPC_ACCOUNT_URL"));
        assert!(entry_point.contains(
            "throw new Error('GRPC_ACCOUNT_URL environment variable is not set and no URL was provided');"
        ));
    }

    #[test]
    fn test_env_var_consistent_for_hyphenated_names() {
        let templater = templater();
        let service = ServiceName::new("user-profile").unwrap();
        let env_var = service.env_var_name();
        let readme = templater.render_readme(&service).unwrap();
        let entry_point = templater.render_entry_point(&service).unwrap();

        assert_eq!(env_var, "GRPC_USER_PROFILE_URL");
        assert!(readme.contains(&env_var));
        assert!(entry_point.contains(&format!("process.env.{env_var}")));
    }

    #[test]
    fn test_readme_content() {
        let readme = templater().render_readme(&account()).unwrap();
        assert!(readme.starts_with("# @events-project/grpc-account\n"));
        assert!(readme.contains("npm install @events-project/grpc-account"));
        assert!(readme.contains("import { accountRpcClient } from '@events-project/grpc-account';"));
        assert!(readme.contains("createClient('your-custom-url')"));
    }

    #[test]
    fn test_entry_point_content() {
        let entry_point = templater().render_entry_point(&account()).unwrap();
        assert!(entry_point.contains("export function createClient(url?: string): AccountServiceClient"));
        assert!(entry_point.contains("AccountServiceDefinition,"));
        assert!(entry_point.contains("export * from './service';"));
        assert!(entry_point.contains("export const accountRpcClient = createClient();"));
    }

    #[test]
    fn test_render_all_artifacts() {
        let set = templater()
            .render(&account(), &Version::new(2, 0, 1))
            .unwrap();
        assert!(set.manifest.contains("\"version\": \"2.0.1\""));
        assert!(set.build_config.contains("\"compilerOptions\""));
        assert!(set.readme.contains("GRPC_ACCOUNT_URL"));
        assert!(set.entry_point.contains("GRPC_ACCOUNT_URL"));
    }

    #[test]
    fn test_custom_scope() {
        let config = GeneratorConfig {
            package_scope: "@acme".to_string(),
            ..GeneratorConfig::default()
        };
        let templater = ArtifactTemplater::new(&config).unwrap();
        assert_eq!(templater.package_name(&account()), "@acme/grpc-account");
    }
}
