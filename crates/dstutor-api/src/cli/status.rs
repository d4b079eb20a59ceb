//! Configuration and credential status command.

use std::path::Path;

use anyhow::Result;
use console::style;

use dstutor_core::service::secret::SecretService;
use dstutor_types::config::TutorConfig;

/// Display where config lives, which model is configured, and whether the
/// credential resolves. The credential itself is only ever shown masked.
pub async fn status(
    data_dir: &Path,
    config: &TutorConfig,
    secrets: &SecretService,
    json: bool,
) -> Result<()> {
    let secret_name = config.model.secret_name();
    let credential = secrets
        .get_secret(secret_name)
        .await
        .filter(|v| !v.trim().is_empty())
        .map(|v| SecretService::mask_secret(&v));
    let config_path = data_dir.join("config.toml");
    let config_exists = tokio::fs::try_exists(&config_path).await.unwrap_or(false);

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": data_dir.display().to_string(),
            "config_file": config_exists,
            "model": {
                "provider": config.model.provider.to_string(),
                "name": config.model.model,
                "temperature": config.model.temperature,
                "max_tokens": config.model.max_tokens,
                "request_timeout_secs": config.model.request_timeout_secs,
            },
            "server": {
                "host": config.server.host,
                "port": config.server.port,
            },
            "credential": {
                "name": secret_name,
                "present": credential.is_some(),
                "masked": credential,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Data Science Tutor v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Model ──").dim());
    println!("  Provider:    {}", style(&config.model.provider).bold());
    println!("  Model:       {}", style(&config.model.model).cyan());
    println!("  Temperature: {}", config.model.temperature);
    println!("  Max tokens:  {}", config.model.max_tokens);
    println!("  Timeout:     {}s", config.model.request_timeout_secs);
    println!();

    println!("  {}", style("── Credential ──").dim());
    match &credential {
        Some(masked) => println!(
            "  {} {} ({})",
            style("✓").green(),
            secret_name,
            style(masked).dim()
        ),
        None => {
            println!("  {} {} not set", style("✗").red(), secret_name);
            println!(
                "    Set it with: {}",
                style(format!("dstutor set secret {secret_name}")).yellow()
            );
        }
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(data_dir.display()).dim());
    println!(
        "  Config:   {}",
        if config_exists {
            style(config_path.display().to_string()).dim()
        } else {
            style("defaults (no config.toml)".to_string()).dim()
        }
    );
    println!(
        "  Listen:   {}",
        style(format!("{}:{}", config.server.host, config.server.port)).dim()
    );
    println!();

    Ok(())
}
