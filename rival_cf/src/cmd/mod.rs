pub mod compare;
pub mod server;

use anyhow::{Context, Result};
use rival_cf_libs::{codeforces::DEFAULT_API_URL, CodeforcesClient, ProblemCatalog};
use std::{env, ffi::OsString, path::PathBuf};

/// Load the problem catalog from `path`, falling back to `RIVAL_CF_CATALOG`.
pub fn load_catalog(path: Option<OsString>) -> Result<ProblemCatalog> {
    let path: PathBuf = match path {
        Some(path) => PathBuf::from(path),
        None => match env::var("RIVAL_CF_CATALOG") {
            Ok(path) => PathBuf::from(path),
            Err(e) => {
                let message = format!(
                    "couldn't determine catalog path. pass --catalog or set RIVAL_CF_CATALOG: {:?}",
                    e
                );
                tracing::error!(message);
                anyhow::bail!(message)
            }
        },
    };

    ProblemCatalog::load(&path).with_context(|| {
        let message = format!("failed to load problem catalog from {}", path.display());
        tracing::error!(message);
        message
    })
}

/// Build the Codeforces client from `api_url`, falling back to `CODEFORCES_API_URL`.
pub fn codeforces_client(api_url: Option<String>) -> Result<CodeforcesClient> {
    let api_url = match api_url.or_else(|| env::var("CODEFORCES_API_URL").ok()) {
        Some(api_url) => api_url,
        None => {
            tracing::warn!(
                "CODEFORCES_API_URL environment variable is not set. Default value `{}` will be used.",
                DEFAULT_API_URL
            );
            String::from(DEFAULT_API_URL)
        }
    };

    CodeforcesClient::new(&api_url).with_context(|| {
        let message = format!("couldn't create Codeforces client for {}", api_url);
        tracing::error!(message);
        message
    })
}
