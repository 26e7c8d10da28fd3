use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::{error::Error, types::ChangeRequest};

pub const QUALIFIER: &str = "com";
pub const ORGANIZATION: &str = "retext";
pub const APPLICATION: &str = "retext";

pub const DEFAULT_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_USER_AGENT: &str = concat!("retext/", env!("CARGO_PKG_VERSION"));

pub fn config_root() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|p| p.config_dir().to_path_buf())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub fetch: FetchSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, Error> {
        match config_root().map(|dir| dir.join("config.toml")) {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let data = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&data)?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}

pub fn load_request(path: &Path) -> Result<ChangeRequest, Error> {
    let data = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let request: ChangeRequest = if is_json {
        serde_json::from_str(&data)?
    } else {
        toml::from_str(&data)?
    };
    if request.url.trim().is_empty() {
        return Err(Error::Config(format!(
            "{}: request has an empty url",
            path.display()
        )));
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn settings_fill_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "config.toml", "[fetch]\ntimeout_secs = 15\n");
        let settings = Settings::from_path(&path).unwrap();
        assert_eq!(settings.fetch.timeout_secs, 15);
        assert_eq!(settings.fetch.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn empty_settings_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "config.toml", "");
        assert_eq!(Settings::from_path(&path).unwrap(), Settings::default());
    }

    #[test]
    fn loads_toml_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "request.toml",
            r#"
url = "https://example.com"

[[suggestions]]
current_val = "Hello world"
new_val = "Hi there"

[[suggestions]]
current_val = "Talk to us"
new_val = "Get in touch"
"#,
        );
        let request = load_request(&path).unwrap();
        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.suggestions.len(), 2);
        assert_eq!(request.suggestions[1].new_val, "Get in touch");
    }

    #[test]
    fn loads_json_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "request.json",
            r#"{"url": "page.html", "suggestions": [{"current_val": "a", "new_val": "b"}]}"#,
        );
        let request = load_request(&path).unwrap();
        assert_eq!(request.url, "page.html");
        assert_eq!(request.suggestions[0].current_val, "a");
    }

    #[test]
    fn rejects_empty_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "request.toml", "url = \"  \"\n");
        assert!(matches!(load_request(&path), Err(Error::Config(_))));
    }

    #[test]
    fn malformed_request_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "request.json", "{not json");
        assert!(matches!(load_request(&path), Err(Error::Json(_))));
    }
}
