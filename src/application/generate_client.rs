//! Use case for generating a publishable client package

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::{
    ClientEmitter, GenerateClientRequest, GenerateClientResponse, OutputService, VersionPlan,
};
use crate::core::config::CredentialSource;
use crate::core::error::{Error, Result};
use crate::generation::{ArtifactTemplater, ServiceName, resolve_service_name};
use crate::infrastructure::shell::{CommandExecutor, shell_invocation};
use crate::versioning::{RegistryClient, ResolvedVersion, VersionResolver};

/// Use case for generating client packages
pub struct GenerateClientUseCase {
    credentials: Arc<dyn CredentialSource>,
    registry: Arc<dyn RegistryClient>,
    executor: Arc<dyn CommandExecutor>,
    output_service: Arc<dyn OutputService>,
}

impl GenerateClientUseCase {
    pub fn new(
        credentials: Arc<dyn CredentialSource>,
        registry: Arc<dyn RegistryClient>,
        executor: Arc<dyn CommandExecutor>,
        output_service: Arc<dyn OutputService>,
    ) -> Self {
        Self {
            credentials,
            registry,
            executor,
            output_service,
        }
    }

    /// Resolve the service name and the version its next package gets
    pub async fn plan(&self, request: &GenerateClientRequest) -> Result<VersionPlan> {
        request.validate()?;
        let service = resolve_service_name(&request.service_dir, &request.config.dir_prefix)?;
        let resolved = self.resolve_version(request, &service).await;
        Ok(plan_for(request, &service, &resolved))
    }

    pub async fn execute(&self, request: GenerateClientRequest) -> Result<GenerateClientResponse> {
        // 1. Validate request
        request.validate()?;

        // 2. Resolve the service name
        let service = resolve_service_name(&request.service_dir, &request.config.dir_prefix)?;
        info!(service = %service, "Generating client");

        // 3. Run the upstream generation step, if configured
        self.run_proto_command(&request).await?;

        // 4. Resolve the version
        let resolved = self.resolve_version(&request, &service).await;

        // 5. Render artifacts
        let templater = ArtifactTemplater::new(&request.config)?;
        let artifacts = templater.render(&service, &resolved.version)?;

        // 6. Write them
        let emitter = ClientEmitter::new(self.output_service.clone());
        let output_path = emitter.emit(&request.service_dir, &artifacts).await?;

        Ok(GenerateClientResponse {
            plan: plan_for(&request, &service, &resolved),
            output_path,
            artifacts_count: artifacts.artifacts().len() + 1,
        })
    }

    async fn resolve_version(
        &self,
        request: &GenerateClientRequest,
        service: &ServiceName,
    ) -> ResolvedVersion {
        let resolver = VersionResolver::new(
            request.config.clone(),
            request.service_dir.clone(),
            self.credentials.clone(),
            self.registry.clone(),
        );
        let resolved = resolver.resolve(service).await;
        info!(
            version = %resolved.version,
            provenance = %resolved.provenance,
            "Resolved client version"
        );
        resolved
    }

    async fn run_proto_command(&self, request: &GenerateClientRequest) -> Result<()> {
        let Some(command) = request.config.proto_command.as_deref() else {
            return Ok(());
        };

        info!(command, "Running proto generation command");
        let (program, args) = shell_invocation(command);
        // Output streams straight to the terminal
        let result = self
            .executor
            .execute_inherited(program, &args, &request.service_dir)
            .await?;

        if !result.is_success() {
            warn!(exit_code = result.exit_code, "Proto generation command failed");
            return Err(Error::command(format!(
                "'{command}' exited with status {}",
                result.exit_code
            )));
        }
        Ok(())
    }
}

fn plan_for(
    request: &GenerateClientRequest,
    service: &ServiceName,
    resolved: &ResolvedVersion,
) -> VersionPlan {
    VersionPlan {
        service_name: service.to_string(),
        package_name: request.config.package_name(service.as_str()),
        version: resolved.version.to_string(),
        provenance: resolved.provenance.to_string(),
    }
}
