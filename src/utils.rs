//! Utility functions for download file names and paths

use crate::config::FileCollisionAction;
use crate::error::{Error, Result};
use crate::types::Format;
use std::path::{Path, PathBuf};

/// Maximum number of rename attempts when resolving file collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// File name for a download in `format`, e.g. `j1939_dataset.csv`
pub fn download_filename(stem: &str, format: Format) -> String {
    format!("{}.{}", stem.trim(), format.extension())
}

/// Get a unique path for a file, handling collisions according to the specified action
///
/// * `Rename` returns `path` if free, otherwise the first free `stem (n).ext`
/// * `Overwrite` always returns `path`
/// * `Skip` fails with [`Error::FileCollision`] if `path` exists
///
/// # Examples
///
/// ```
/// use j1939_dl::utils::get_unique_path;
/// use j1939_dl::config::FileCollisionAction;
/// use std::path::Path;
///
/// let path = Path::new("/tmp/j1939-dl-doc/j1939_dataset.csv");
/// let unique = get_unique_path(path, FileCollisionAction::Rename).unwrap();
/// // If j1939_dataset.csv exists, returns j1939_dataset (1).csv
/// ```
pub fn get_unique_path(path: &Path, action: FileCollisionAction) -> Result<PathBuf> {
    match action {
        FileCollisionAction::Overwrite => Ok(path.to_path_buf()),
        FileCollisionAction::Skip => {
            if path.exists() {
                return Err(Error::FileCollision {
                    path: path.to_path_buf(),
                });
            }
            Ok(path.to_path_buf())
        }
        FileCollisionAction::Rename => {
            if !path.exists() {
                return Ok(path.to_path_buf());
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| Error::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "Cannot extract file stem".to_string(),
                })?;

            let extension = path.extension().and_then(|e| e.to_str());

            let parent = path.parent().ok_or_else(|| Error::InvalidPath {
                path: path.to_path_buf(),
                reason: "Cannot extract parent directory".to_string(),
            })?;

            for i in 1..=MAX_RENAME_ATTEMPTS {
                let new_name = match extension {
                    Some(ext) => format!("{} ({}).{}", stem, i, ext),
                    None => format!("{} ({})", stem, i),
                };
                let new_path = parent.join(new_name);
                if !new_path.exists() {
                    return Ok(new_path);
                }
            }

            Err(Error::FileCollision {
                path: path.to_path_buf(),
            })
        }
    }
}

/// Extract the file name from a `Content-Disposition` header value
///
/// Handles both `filename="x.csv"` and RFC 5987 `filename*=UTF-8''x.csv`.
/// The result is reduced to its final path component; `None` if nothing
/// usable remains.
///
/// ```
/// use j1939_dl::utils::filename_from_content_disposition;
///
/// assert_eq!(
///     filename_from_content_disposition("attachment; filename=\"j1939_data.csv\""),
///     Some("j1939_data.csv".to_string())
/// );
/// ```
pub fn filename_from_content_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    for part in value.split(';') {
        // Parameter names are case-insensitive (RFC 6266)
        let Some((name, param)) = part.split_once('=') else {
            continue;
        };
        let name = name.trim();
        let param = param.trim();
        if name.eq_ignore_ascii_case("filename*") {
            // charset'lang'encoded-filename
            if let Some(idx) = param.rfind('\'')
                && let Ok(decoded) = urlencoding::decode(&param[idx + 1..])
                && let Some(name) = sanitize_filename(&decoded)
            {
                return Some(name);
            }
        } else if name.eq_ignore_ascii_case("filename") {
            plain = sanitize_filename(param.trim_matches('"'));
        }
    }
    plain
}

/// Reduce a server-provided name to a bare file name
fn sanitize_filename(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    if last.is_empty() || last == "." || last == ".." {
        return None;
    }
    Some(last.to_string())
}
