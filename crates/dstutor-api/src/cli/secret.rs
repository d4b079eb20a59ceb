//! Secret management CLI command: set.

use anyhow::Result;
use console::style;
use dialoguer::Password;

use dstutor_core::service::secret::SecretService;

/// Set a secret value with hidden input prompt.
///
/// # Examples
///
/// ```bash
/// # Secure prompt (recommended)
/// dstutor set secret GOOGLE_API_KEY
///
/// # Script/automation mode
/// dstutor set secret GOOGLE_API_KEY --value AIza...
/// ```
pub async fn set_secret(
    secrets: &SecretService,
    key: &str,
    value: Option<&str>,
    json: bool,
) -> Result<()> {
    let secret_value = match value {
        Some(v) => v.to_string(),
        None => Password::new()
            .with_prompt(format!("Enter value for {}", style(key).bold()))
            .interact()?,
    };

    if secret_value.trim().is_empty() {
        anyhow::bail!("secret value for '{key}' must not be empty");
    }

    secrets.set_secret(key, &secret_value).await?;

    let masked = SecretService::mask_secret(&secret_value);
    if json {
        println!(
            "{}",
            serde_json::json!({"set": true, "key": key, "masked": masked})
        );
    } else {
        println!(
            "  {} Secret '{}' set ({})",
            style("✓").green().bold(),
            style(key).bold(),
            masked
        );
    }

    Ok(())
}
