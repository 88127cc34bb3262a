// ABOUTME: Command module aggregator for the gcf-deploy CLI.
// ABOUTME: Re-exports deploy and package handlers plus shared config loading.

mod deploy;
mod package;

pub use deploy::deploy;
pub use package::package;

use gcf_deploy::config::Config;
use gcf_deploy::error::Result;
use gcf_deploy::package::PackageRequest;
use std::path::Path;

/// Load the config from `path`, or discover it in `cwd`.
pub fn load_config(cwd: &Path, path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&cwd.join(path)),
        None => Config::discover(cwd),
    }
}

fn package_request(config: &Config, cwd: &Path) -> PackageRequest {
    PackageRequest {
        source_root: config.working_dir(cwd),
        dist_directory: config.dist_directory.clone(),
        globs: config.globs.clone(),
    }
}
