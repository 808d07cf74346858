use std::{fs, path::PathBuf};

use crate::gemini::GenerateError;

const KNOWN_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Writes the image bytes to `path`, appending an extension derived from
/// the mime type if the path doesn't already carry a known one. Returns
/// the path that was actually written. Parent directories are taken as
/// given and not created.
pub fn write_image(path: PathBuf, mime_type: &str, data: &[u8]) -> Result<PathBuf, GenerateError> {
    let path = resolve_extension(path, mime_type);
    fs::write(&path, data).map_err(|source| GenerateError::WriteOutput {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn resolve_extension(path: PathBuf, mime_type: &str) -> PathBuf {
    let name = path.as_os_str().to_string_lossy();
    if KNOWN_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        return path;
    }

    let ext = if mime_type.contains("png") { ".png" } else { ".jpg" };
    let mut with_ext = path.into_os_string();
    with_ext.push(ext);
    PathBuf::from(with_ext)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_extensions_are_kept() {
        for name in ["out.png", "out.jpg", "out.jpeg"] {
            let resolved = resolve_extension(PathBuf::from(name), "image/png");
            assert_eq!(resolved, PathBuf::from(name));
        }
    }

    #[test]
    fn missing_extension_follows_the_mime_type() {
        assert_eq!(
            resolve_extension(PathBuf::from("out"), "image/jpeg"),
            PathBuf::from("out.jpg")
        );
        assert_eq!(
            resolve_extension(PathBuf::from("out"), "image/png"),
            PathBuf::from("out.png")
        );
        // anything that isn't png-ish falls back to .jpg
        assert_eq!(
            resolve_extension(PathBuf::from("out"), "image/webp"),
            PathBuf::from("out.jpg")
        );
    }

    #[test]
    fn unknown_extension_gets_a_suffix_appended() {
        assert_eq!(
            resolve_extension(PathBuf::from("picture.webp"), "image/png"),
            PathBuf::from("picture.webp.png")
        );
    }

    #[test]
    fn write_creates_the_file_with_the_payload() -> color_eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("generated");

        let written = write_image(target, "image/jpeg", &[9, 8, 7])?;
        assert_eq!(written.extension().unwrap(), "jpg");
        assert_eq!(fs::read(&written)?, vec![9, 8, 7]);
        Ok(())
    }

    #[test]
    fn write_overwrites_existing_files() -> color_eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("out.png");
        fs::write(&target, b"old")?;

        let written = write_image(target.clone(), "image/png", b"new")?;
        assert_eq!(written, target);
        assert_eq!(fs::read(&written)?, b"new");
        Ok(())
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let err = write_image(
            PathBuf::from("/no/such/dir/out.png"),
            "image/png",
            &[1, 2, 3],
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::WriteOutput { .. }));
    }
}
