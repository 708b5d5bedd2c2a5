//! Typed package manifest and compiler configuration of the client package

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `package.json` of the generated client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub main: String,
    pub types: String,
    pub files: Vec<String>,
    pub scripts: BTreeMap<String, String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub publish_config: PublishConfig,
    pub repository: Repository,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishConfig {
    pub registry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

const DEPENDENCIES: &[(&str, &str)] = &[
    ("nice-grpc", "^2.1.0"),
    ("nice-grpc-common", "^2.0.2"),
    ("protobufjs", "^7.2.3"),
    ("dotenv", "^16.4.7"),
    ("long", "^5.2.3"),
];

const DEV_DEPENDENCIES: &[(&str, &str)] = &[("@types/node", "^20.10.0"), ("typescript", "^5.2.2")];

fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl PackageManifest {
    pub fn new(
        package_name: &str,
        service_name: &str,
        version: &str,
        registry: &str,
        repository_url: &str,
    ) -> Self {
        Self {
            name: package_name.to_string(),
            version: version.to_string(),
            description: format!("gRPC client for {service_name} service"),
            main: "dist/index.js".to_string(),
            types: "dist/index.d.ts".to_string(),
            files: vec!["dist".to_string()],
            scripts: pairs(&[("build", "tsc")]),
            dependencies: pairs(DEPENDENCIES),
            dev_dependencies: pairs(DEV_DEPENDENCIES),
            publish_config: PublishConfig {
                registry: registry.to_string(),
            },
            repository: Repository {
                kind: "git".to_string(),
                url: repository_url.to_string(),
            },
        }
    }
}

/// `tsconfig.json` of the generated client; identical for every service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    pub compiler_options: CompilerOptions,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub target: String,
    pub module: String,
    pub declaration: bool,
    pub out_dir: String,
    pub strict: bool,
    pub es_module_interop: bool,
    pub skip_lib_check: bool,
    pub force_consistent_casing_in_file_names: bool,
}

impl Default for TsConfig {
    fn default() -> Self {
        Self {
            compiler_options: CompilerOptions {
                target: "es2020".to_string(),
                module: "commonjs".to_string(),
                declaration: true,
                out_dir: "./dist".to_string(),
                strict: true,
                es_module_interop: true,
                skip_lib_check: true,
                force_consistent_casing_in_file_names: true,
            },
            include: vec!["src/**/*".to_string()],
            exclude: vec!["node_modules".to_string(), "dist".to_string()],
        }
    }
}
