//! Shared helpers for CLI command tests

use crate::common::test_config;
use copacetic::cli::commands::PipelineArgs;
use copacetic::core::config::Config;

/// Config the CLI tests run commands with
pub fn cli_test_config() -> Config {
    let mut config = test_config();
    config.pool.size = 2;
    config
}

/// Pipeline flags with every override left unset
pub fn no_overrides() -> PipelineArgs {
    PipelineArgs::default()
}
