pub mod agent;
pub mod chat;
pub mod models;
pub mod session;

use std::path::Path;
use std::sync::Arc;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use corechat_config::{AppConfig, ConfigError, MemoryBackendKind};
use corechat_core::error::MemoryError;
use corechat_core::memory::EventStore;
use corechat_memory::{AgentCoreEventStore, ConversationMemory, InMemoryEventStore};
use tracing::debug;

/// Memory id used by the process-local store when no resource is configured.
const LOCAL_MEMORY_ID: &str = "local";

/// Load config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => AppConfig::load_with_env(path),
        None => AppConfig::load(),
    }
}

/// Shared AWS SDK configuration; every service client is built from it.
pub async fn sdk_config(config: &AppConfig) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws.region.clone()))
        .load()
        .await
}

/// Build the conversation memory selected by the config.
pub fn build_memory(
    config: &AppConfig,
    sdk: &SdkConfig,
) -> Result<ConversationMemory, Box<dyn std::error::Error>> {
    let memory = select_memory(config, || {
        Arc::new(AgentCoreEventStore::new(aws_sdk_bedrockagentcore::Client::new(sdk)))
    })?;

    debug!(backend = memory.backend_name(), "Conversation memory ready");
    Ok(memory)
}

/// Pick the memory backend; `remote` is only called for AgentCore.
fn select_memory<F>(config: &AppConfig, remote: F) -> Result<ConversationMemory, MemoryError>
where
    F: FnOnce() -> Arc<dyn EventStore>,
{
    match (config.effective_memory_backend(), config.memory_arn.as_deref()) {
        (MemoryBackendKind::Agentcore, Some(arn)) => ConversationMemory::from_arn(remote(), arn),
        (MemoryBackendKind::InMemory, Some(arn)) => {
            ConversationMemory::from_arn(Arc::new(InMemoryEventStore::new()), arn)
        }
        (MemoryBackendKind::InMemory, None) => Ok(ConversationMemory::new(
            Arc::new(InMemoryEventStore::new()),
            LOCAL_MEMORY_ID,
        )),
        _ => Ok(ConversationMemory::disabled()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const MEMORY_ARN: &str = "arn:aws:bedrock-agentcore:us-west-2:123456789012:memory/mem-1";

    fn config(backend: MemoryBackendKind, arn: Option<&str>) -> AppConfig {
        let mut config = AppConfig::default();
        config.memory.backend = backend;
        config.memory_arn = arn.map(String::from);
        config
    }

    fn unused_remote() -> Arc<dyn EventStore> {
        panic!("remote store must not be built for this backend")
    }

    #[test]
    fn agentcore_with_arn_uses_remote_store() {
        let called = Cell::new(false);
        let memory = select_memory(&config(MemoryBackendKind::Agentcore, Some(MEMORY_ARN)), || {
            called.set(true);
            Arc::new(InMemoryEventStore::new())
        })
        .unwrap();
        assert!(called.get());
        assert!(memory.is_enabled());
    }

    #[test]
    fn agentcore_without_arn_is_disabled() {
        let memory = select_memory(&config(MemoryBackendKind::Agentcore, None), unused_remote).unwrap();
        assert!(!memory.is_enabled());
        assert_eq!(memory.backend_name(), "none");
    }

    #[test]
    fn in_memory_works_with_or_without_arn() {
        for arn in [Some(MEMORY_ARN), None] {
            let memory = select_memory(&config(MemoryBackendKind::InMemory, arn), unused_remote).unwrap();
            assert_eq!(memory.backend_name(), "in_memory");
        }
    }

    #[test]
    fn none_ignores_a_configured_arn() {
        let memory = select_memory(&config(MemoryBackendKind::None, Some(MEMORY_ARN)), unused_remote).unwrap();
        assert!(!memory.is_enabled());
    }

    #[test]
    fn malformed_arn_is_rejected() {
        let result = select_memory(
            &config(MemoryBackendKind::Agentcore, Some("arn:aws:bedrock-agentcore:memory/")),
            || Arc::new(InMemoryEventStore::new()),
        );
        assert!(matches!(result, Err(MemoryError::InvalidResource(_))));
    }
}
