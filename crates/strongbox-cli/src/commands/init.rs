use strongbox_core::MAX_PASSWORD_LENGTH;

use crate::app::AppContext;
use crate::config::{write_config, StrongboxConfig};
use crate::errors::CliError;
use crate::output;

pub fn handle_init(ctx: &AppContext, length: Option<usize>, force: bool) -> anyhow::Result<()> {
    let settings = ctx.settings();
    if settings.config_path.exists() && !force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {} (use --force to overwrite)",
            settings.config_path.display()
        ))
        .into());
    }

    let default_length = length.unwrap_or(settings.default_length);
    if default_length > MAX_PASSWORD_LENGTH {
        return Err(CliError::invalid_input(format!(
            "Password length {} exceeds the maximum of {}",
            default_length, MAX_PASSWORD_LENGTH
        ))
        .into());
    }

    let store = ctx.store()?;
    let already_bound = store.is_initialized();
    let passphrase = ctx.passphrase(&store)?;
    if !store.verify_passphrase(&passphrase)? {
        return Err(strongbox_core::VaultError::AuthenticationFailed.into());
    }

    let config = StrongboxConfig::new(
        &settings.directory,
        settings.work_factor,
        default_length,
    );
    write_config(&settings.config_path, &config)?;

    if !ctx.quiet() {
        if already_bound {
            output::success(&format!(
                "Using existing password directory at {}",
                settings.directory.display()
            ));
        } else {
            output::success(&format!(
                "Initialized password directory at {}",
                settings.directory.display()
            ));
        }
        eprintln!("Config written to {}", settings.config_path.display());
    }
    Ok(())
}
