use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::debug;
use rusoto_core::{HttpClient, Region};
use rusoto_credential::ProfileProvider;
use rusoto_s3::S3Client;

use crate::security::scrub_credentials;

/// Region pointing at a custom S3-compatible endpoint
pub fn custom_region(host: &str, region_name: &str) -> Result<Region> {
    let host = host.trim().trim_end_matches('/');
    if !(host.starts_with("http://") || host.starts_with("https://")) {
        bail!(
            "Object store host must start with http:// or https://: {}",
            scrub_credentials(host)
        );
    }

    Ok(Region::Custom {
        name: region_name.to_string(),
        endpoint: host.to_string(),
    })
}

/// Create an S3 client for `host`, signing with the named credentials
/// profile when one is given and the default provider chain otherwise.
pub fn create_s3_client(
    host: &str,
    region_name: &str,
    profile: Option<&str>,
) -> Result<(Arc<S3Client>, Region)> {
    let region = custom_region(host, region_name)?;
    debug!("Connecting to {} (region {})", scrub_credentials(host), region_name);

    let s3_client = match profile.map(str::trim).filter(|p| !p.is_empty()) {
        Some(profile_name) => {
            let mut provider = ProfileProvider::new()
                .context("Failed to create credentials profile provider")?;
            provider.set_profile(profile_name);

            let http_client = HttpClient::new().context("Failed to create HTTP client")?;
            Arc::new(S3Client::new_with(http_client, provider, region.clone()))
        }
        None => Arc::new(S3Client::new(region.clone())),
    };

    Ok((s3_client, region))
}
