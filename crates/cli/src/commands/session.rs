//! `corechat session` — Show the session id for the current caller.

use corechat_agent::resolve_session_id;
use corechat_config::AppConfig;
use corechat_providers::StsIdentity;

pub async fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let sdk = super::sdk_config(config).await;
    let identity = StsIdentity::new(aws_sdk_sts::Client::new(&sdk));
    let session = resolve_session_id(&identity, config.session.min_id_length).await;
    println!("{session}");
    Ok(())
}
