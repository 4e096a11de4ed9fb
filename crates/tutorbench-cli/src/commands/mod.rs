//! CLI subcommand implementations.

use std::sync::Arc;

use anyhow::Result;

use tutorbench_core::traits::EmbeddingProvider;
use tutorbench_embeddings::{create_provider, TutorbenchConfig};

pub mod assess;
pub mod init;
pub mod study;
pub mod validate;

/// Build the configured default embedding provider.
pub(crate) fn default_provider(config: &TutorbenchConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let name = &config.default_provider;
    let provider_config = config.providers.get(name).ok_or_else(|| {
        anyhow::anyhow!(
            "provider '{}' not found in config. Available: {:?}. Run `tutorbench init` to create one.",
            name,
            config.providers.keys().collect::<Vec<_>>()
        )
    })?;
    let provider = create_provider(name, provider_config, &config.default_model)?;
    Ok(Arc::from(provider))
}
