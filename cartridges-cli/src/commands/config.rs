use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cartridges_catalog::SortMode;
use cartridges_lib::{Settings, SettingsStore, keys, settings_path};

use crate::CliError;

/// Show the settings file location and the effective values.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let settings = Settings::load()?;
    let path = settings_path();

    log::info!(
        "{}",
        "Cartridges Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");
    for line in settings.to_display_string().lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Validate and persist one setting.
pub(crate) fn run_config_set(key: &str, value: &str) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    apply_setting(&mut settings, key, value)?;
    settings.save()?;
    log::info!(
        "Set {} = {}",
        key.if_supports_color(Stdout, |t| t.bold()),
        value
    );
    Ok(())
}

fn apply_setting(settings: &mut impl SettingsStore, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        keys::DB_LOCATION | keys::CACHE_LOCATION => settings.set_string(key, value),
        keys::IMPORT_SECONDARY_RUNNER => {
            let flag = value.parse::<bool>().map_err(|_| {
                CliError::config(format!("'{}' expects true or false, got '{}'", key, value))
            })?;
            settings.set_boolean(key, flag);
        }
        keys::SORT_MODE => {
            let mode = value
                .parse::<SortMode>()
                .map_err(|e| CliError::config(e.to_string()))?;
            settings.set_string(key, mode.as_str());
        }
        _ => {
            return Err(CliError::config(format!(
                "Unknown setting '{}' (expected {}, {}, {} or {})",
                key,
                keys::DB_LOCATION,
                keys::CACHE_LOCATION,
                keys::IMPORT_SECONDARY_RUNNER,
                keys::SORT_MODE,
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steam_flag_is_stored_as_boolean() {
        let mut settings = Settings::in_memory();
        apply_setting(&mut settings, keys::IMPORT_SECONDARY_RUNNER, "true").unwrap();
        assert!(settings.get_boolean(keys::IMPORT_SECONDARY_RUNNER));
        assert!(apply_setting(&mut settings, keys::IMPORT_SECONDARY_RUNNER, "maybe").is_err());
    }

    #[test]
    fn sort_mode_is_validated() {
        let mut settings = Settings::in_memory();
        apply_setting(&mut settings, keys::SORT_MODE, "newest").unwrap();
        assert_eq!(settings.get_string(keys::SORT_MODE), "newest");
        assert!(apply_setting(&mut settings, keys::SORT_MODE, "random").is_err());
        assert_eq!(settings.get_string(keys::SORT_MODE), "newest");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut settings = Settings::in_memory();
        let err = apply_setting(&mut settings, "colour", "blue").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(!settings.is_dirty());
    }
}
