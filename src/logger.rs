//! Session log.
//!
//! The log file is truncated at each game start, so it only holds output from
//! the current session. It opens with a header naming the plugin version; the
//! rest is whatever the crate logs through the `log` facade, piped into the
//! file by `env_logger`.

use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{config::LogConfig, Result};

/// First line of every session log.
#[must_use]
pub fn header() -> String {
    format!("SC4BulldozeExtensions v{}", env!("CARGO_PKG_VERSION"))
}

/// Path of the log file for `config`, falling back to `default_directory`.
#[must_use]
pub fn log_file_path(config: &LogConfig, default_directory: &Path) -> PathBuf {
    config
        .directory
        .as_deref()
        .unwrap_or(default_directory)
        .join(&config.file_name)
}

/// Creates or truncates the log file and writes the header.
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] if the directory or file cannot be
/// created or written.
pub fn open_log_file(config: &LogConfig, default_directory: &Path) -> Result<(File, PathBuf)> {
    let path = log_file_path(config, default_directory);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    writeln!(file, "{}", header())?;

    Ok((file, path))
}

/// Opens the session log and installs it as the global logger.
///
/// Returns the path of the log file.
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] if the file cannot be opened, and
/// [`crate::Error::Error`] if a global logger is already installed.
pub fn init(config: &LogConfig, default_directory: &Path) -> Result<PathBuf> {
    let (file, path) = open_log_file(config, default_directory)?;

    env_logger::Builder::new()
        .filter_level(config.level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .try_init()
        .map_err(|error| crate::Error::Error(error.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn header_names_version() {
        assert!(header().starts_with("SC4BulldozeExtensions v"));
        assert!(header().ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn configured_directory_wins() {
        let config = LogConfig::default().with_directory("/logs");
        assert_eq!(
            log_file_path(&config, Path::new("/plugins")),
            Path::new("/logs").join("SC4BulldozeExtensions.log")
        );
        assert_eq!(
            log_file_path(&LogConfig::default(), Path::new("/plugins")),
            Path::new("/plugins").join("SC4BulldozeExtensions.log")
        );
    }

    #[test]
    fn log_file_is_truncated_each_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig::default().with_file_name("session.log");

        let (mut file, path) = open_log_file(&config, dir.path()).unwrap();
        writeln!(file, "INFO: Installed the bulldozer extensions.").unwrap();
        drop(file);

        open_log_file(&config, dir.path()).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, format!("{}\n", header()));
    }

    #[test]
    fn missing_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig::default().with_directory(dir.path().join("nested").join("logs"));

        let (_, path) = open_log_file(&config, Path::new("/nonexistent")).unwrap();
        assert!(path.exists());
    }
}
