use std::path::{Path, PathBuf};

use tower_http::services::{ServeDir, ServeFile};

use tracing::{debug, error};

use crate::{Config, Error};

fn get_fallback_file(config: &Config) -> Result<PathBuf, Error> {
    let web_root_path = Path::new(&config.web_root);
    if !web_root_path.exists() {
        error!(path = %web_root_path.display(), "Web root path does not exist.");
        return Err(Error::PathError(format!(
            "Web root path '{}' does not exist.",
            web_root_path.display()
        )));
    }

    let fallback_file_path = web_root_path.join(&config.index_page);
    if !fallback_file_path.exists() {
        error!(path = %fallback_file_path.display(), "Fallback file does not exist.");
        return Err(Error::PathError(format!(
            "Fallback file '{}' does not exist.",
            fallback_file_path.display()
        )));
    }

    debug!(fallback_file_path = %fallback_file_path.display(), "Successfully found fallback file");
    Ok(fallback_file_path)
}

pub fn create_file_service(config: &Config) -> Result<ServeDir<ServeFile>, Error> {
    let fallback_file_path = get_fallback_file(config)?;
    Ok(ServeDir::new(&config.web_root).fallback(ServeFile::new(fallback_file_path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_web_root_is_an_error() {
        let config = Config {
            web_root: "does-not-exist".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            get_fallback_file(&config),
            Err(Error::PathError(_))
        ));
    }

    #[test]
    fn fallback_file_resolves_under_web_root() {
        let temp_dir = tempfile::tempdir().expect("Failed to create a temporary directory");
        std::fs::write(temp_dir.path().join("index.html"), "<html></html>")
            .expect("Failed to write index file");

        let config = Config {
            web_root: temp_dir.path().to_string_lossy().into_owned(),
            ..Config::default()
        };

        let path = get_fallback_file(&config).expect("fallback file should resolve");
        assert!(path.ends_with("index.html"));
    }
}
