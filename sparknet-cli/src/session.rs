//! Saved session

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use sparknet_lib::backend::Session;

use crate::error::CliError;

pub fn load(path: &Path) -> Result<Option<Session>, CliError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CliError::ReadFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn save(path: &Path, session: &Session) -> Result<(), CliError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, serde_json::to_string_pretty(session)?)?;
    log::debug!("Saved session to {}", path.display());
    Ok(())
}

pub fn clear(path: &Path) -> Result<(), CliError> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let session = Session {
            id: "s1".to_string(),
            account_id: "a1".to_string(),
            secret: Some("secret".to_string()),
            expires_at: None,
        };

        assert_eq!(load(&path).unwrap(), None);
        save(&path, &session).unwrap();
        assert_eq!(load(&path).unwrap(), Some(session));
        clear(&path).unwrap();
        clear(&path).unwrap();
        assert_eq!(load(&path).unwrap(), None);
    }
}
