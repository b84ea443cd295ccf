use std::path::Path;

use crate::error::Error;


/// Extensions `load_image` accepts, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];


/// Checks that `path` carries one of the `allowed` extensions.
///
/// Comparison ignores ASCII case on both sides, and a leading dot on the allow-list entries
/// is optional. The rejected extension is reported with its dot, or empty if the path has none.
pub fn validate_filetype<P: AsRef<Path>>(path: P, allowed: &[&str]) -> Result<(), Error> {
	let extension = path.as_ref().extension().and_then(|ext| ext.to_str()).unwrap_or_default();

	if !extension.is_empty() && allowed.iter().any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(extension)) {
		return Ok(());
	}

	let extension = match path.as_ref().extension() {
		Some(ext) => format!(".{}", ext.to_string_lossy()),
		None => String::new(),
	};
	log::debug!("rejecting {} with extension {:?}", path.as_ref().display(), extension);

	Err(Error::UnsupportedType {
		extension,
		allowed: allowed.iter().map(|a| a.to_string()).collect(),
	})
}


/// Checks that `path` names an existing regular file.
pub fn validate_filepath<P: AsRef<Path>>(path: P) -> Result<(), Error> {
	let path = path.as_ref();
	if path.as_os_str().is_empty() {
		return Err(Error::EmptyPath);
	}

	let metadata = std::fs::metadata(path).map_err(|source| Error::NotFound { path: path.to_path_buf(), source })?;
	if metadata.is_dir() {
		return Err(Error::IsDirectory(path.to_path_buf()));
	}

	Ok(())
}


#[cfg(test)]
mod tests {
	use super::*;

	const ALLOWED_UPPER: &[&str] = &[".JPG", ".JPEG", ".PNG"];

	#[test]
	fn accepts_supported_extensions_in_any_case() {
		let paths = ["a.jpg", "a.JPG", "a.jpeg", "a.JPEG", "a.png", "a.PNG", "./some/dir/a.jpg", "./some/dir/a.JPG"];
		for path in paths {
			assert!(validate_filetype(path, SUPPORTED_EXTENSIONS).is_ok(), "{path} should be accepted");
			assert!(validate_filetype(path, ALLOWED_UPPER).is_ok(), "{path} should be accepted by upper-case list");
		}
	}

	#[test]
	fn allow_list_dot_is_optional() {
		assert!(validate_filetype("photo.Png", &["png"]).is_ok());
	}

	#[test]
	fn rejects_other_extensions_by_name() {
		for (path, expected) in [("a.txt", ".txt"), ("a.TXT", ".TXT"), ("dir/a.gif", ".gif")] {
			match validate_filetype(path, SUPPORTED_EXTENSIONS) {
				Err(Error::UnsupportedType { extension, allowed }) => {
					assert_eq!(extension, expected);
					assert_eq!(allowed, vec![".jpg", ".jpeg", ".png"]);
				},
				other => panic!("expected UnsupportedType for {path}, got {other:?}"),
			}
		}
	}

	#[test]
	fn rejects_missing_extension() {
		match validate_filetype("testdata", SUPPORTED_EXTENSIONS) {
			Err(Error::UnsupportedType { extension, .. }) => assert_eq!(extension, ""),
			other => panic!("expected UnsupportedType, got {other:?}"),
		}
		assert!(validate_filetype(".png", SUPPORTED_EXTENSIONS).is_err());
	}

	#[test]
	fn rejection_message_names_extension_and_allowed_set() {
		let err = validate_filetype("a.txt", SUPPORTED_EXTENSIONS).unwrap_err();
		assert_eq!(err.to_string(), "file type .txt is not one of the supported types: [.jpg, .jpeg, .png]");
	}

	#[test]
	fn filepath_checks() {
		let dir = std::env::temp_dir().join(format!("pixelprobe-validate-{}", std::process::id()));
		std::fs::create_dir_all(&dir).unwrap();
		let file = dir.join("plain.txt");
		std::fs::write(&file, b"hello").unwrap();

		assert!(matches!(validate_filepath(""), Err(Error::EmptyPath)));
		assert!(matches!(validate_filepath(&dir), Err(Error::IsDirectory(p)) if p == dir));
		match validate_filepath(dir.join("nonexistent_file_path")) {
			Err(Error::NotFound { source, .. }) => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
			other => panic!("expected NotFound, got {other:?}"),
		}
		assert!(validate_filepath(&file).is_ok());

		std::fs::remove_dir_all(&dir).unwrap();
	}
}
