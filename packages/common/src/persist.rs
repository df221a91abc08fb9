use crate::result::CommonResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read and deserialize a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CommonResult<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write `value` as pretty JSON with a trailing newline
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> CommonResult<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommonError;
    use std::collections::BTreeMap;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let value = BTreeMap::from([("minSections".to_string(), 5)]);

        save_json(&path, &value).unwrap();
        let loaded: BTreeMap<String, i32> = load_json(&path).unwrap();

        assert_eq!(loaded, value);
        assert!(std::fs::read_to_string(&path).unwrap().ends_with('\n'));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: CommonResult<serde_json::Value> = load_json(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(CommonError::Io(_))));
    }
}
