//! CLI command implementations.

pub mod listings;

use secrecy::SecretString;

use bramble_storefront::config::WooConfig;
use bramble_storefront::woo::WooClient;

/// Build a WooCommerce client from the flag or environment endpoint.
pub fn client(endpoint: Option<String>) -> Result<WooClient, Box<dyn std::error::Error>> {
    let endpoint = match endpoint {
        Some(e) => e,
        None => std::env::var("WOO_GRAPHQL_ENDPOINT")
            .map_err(|_| "set WOO_GRAPHQL_ENDPOINT or pass --endpoint")?,
    };

    let auth_token = std::env::var("WOO_AUTH_TOKEN").ok().map(SecretString::from);

    Ok(WooClient::new(&WooConfig {
        endpoint,
        auth_token,
    }))
}
