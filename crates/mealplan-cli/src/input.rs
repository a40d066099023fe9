use std::io::Read;
use std::path::Path;

/// Reads response text from `path`, or stdin when the path is absent or `-`.
pub fn read_response(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_response_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"meal_plan\": {{}}}}").unwrap();
        let text = read_response(Some(file.path())).unwrap();
        assert_eq!(text, "{\"meal_plan\": {}}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_response(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
