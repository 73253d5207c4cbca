//! Virtual path classification.
//!
//! The hierarchy is flat: the root directory, hidden probe files
//! (always empty, so tooling probes for `._*`, `.gitignore` and the
//! like resolve harmlessly), and one `#<channel>.txt` file per channel.

use std::path::Path;

use crate::error::{FsError, FsResult};

/// Channel file name prefix.
pub const CHANNEL_PREFIX: &str = "#";
/// Channel file name suffix.
pub const CHANNEL_SUFFIX: &str = ".txt";

/// Classification of a virtual path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    /// The root directory.
    Root,
    /// A hidden-marker path, served as an always-empty regular file.
    HiddenProbe,
    /// A channel file; carries the channel name.
    Channel(String),
}

/// Classify a virtual path.
///
/// Channel names are extracted by matching the full `#<name>.txt`
/// shape at the root. Names that would make the shape ambiguous
/// (empty, containing `#`, or containing a further `.txt`) are
/// rejected with [`FsError::InvalidPath`]; anything that matches no
/// shape at all is [`FsError::UnknownPath`].
pub fn resolve(path: &Path) -> FsResult<ResolvedPath> {
    let display = path.display().to_string();

    let mut segments = Vec::new();
    for component in path.components() {
        match component {
            std::path::Component::RootDir | std::path::Component::CurDir => {}
            std::path::Component::Normal(s) => {
                let s = s
                    .to_str()
                    .ok_or_else(|| FsError::invalid_path(display.clone()))?;
                segments.push(s);
            }
            _ => return Err(FsError::unknown_path(display)),
        }
    }

    if segments.is_empty() {
        return Ok(ResolvedPath::Root);
    }

    if segments.iter().any(|s| s.starts_with('.')) {
        return Ok(ResolvedPath::HiddenProbe);
    }

    let [name] = segments[..] else {
        // No nested directories exist besides the root.
        return Err(FsError::unknown_path(display));
    };

    let Some(channel) = name
        .strip_prefix(CHANNEL_PREFIX)
        .and_then(|s| s.strip_suffix(CHANNEL_SUFFIX))
    else {
        return Err(FsError::unknown_path(display));
    };

    if channel.is_empty() || channel.contains('#') || channel.contains(CHANNEL_SUFFIX) {
        return Err(FsError::invalid_path(display));
    }

    Ok(ResolvedPath::Channel(channel.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root() {
        assert_eq!(resolve(Path::new("/")).unwrap(), ResolvedPath::Root);
        assert_eq!(resolve(Path::new("")).unwrap(), ResolvedPath::Root);
    }

    #[test]
    fn channel_file() {
        assert_eq!(
            resolve(Path::new("/#general.txt")).unwrap(),
            ResolvedPath::Channel("general".to_string())
        );
        assert_eq!(
            resolve(Path::new("#random.txt")).unwrap(),
            ResolvedPath::Channel("random".to_string())
        );
    }

    #[test]
    fn hidden_probes() {
        assert_eq!(
            resolve(Path::new("/.hidden")).unwrap(),
            ResolvedPath::HiddenProbe
        );
        assert_eq!(
            resolve(Path::new("/._.")).unwrap(),
            ResolvedPath::HiddenProbe
        );
        assert_eq!(
            resolve(Path::new("/.gitignore")).unwrap(),
            ResolvedPath::HiddenProbe
        );
        // Hidden markers anywhere in the path count.
        assert_eq!(
            resolve(Path::new("/sub/._probe")).unwrap(),
            ResolvedPath::HiddenProbe
        );
    }

    #[test]
    fn unknown_paths_rejected() {
        assert!(matches!(
            resolve(Path::new("/foo")),
            Err(FsError::UnknownPath(_))
        ));
        assert!(matches!(
            resolve(Path::new("/general.txt")),
            Err(FsError::UnknownPath(_))
        ));
        assert!(matches!(
            resolve(Path::new("/#general")),
            Err(FsError::UnknownPath(_))
        ));
        // Nested directories do not exist.
        assert!(matches!(
            resolve(Path::new("/a/#general.txt")),
            Err(FsError::UnknownPath(_))
        ));
    }

    #[test]
    fn ambiguous_names_rejected() {
        assert!(matches!(
            resolve(Path::new("/#.txt")),
            Err(FsError::InvalidPath(_))
        ));
        assert!(matches!(
            resolve(Path::new("/#a#b.txt")),
            Err(FsError::InvalidPath(_))
        ));
        assert!(matches!(
            resolve(Path::new("/#a.txt.txt")),
            Err(FsError::InvalidPath(_))
        ));
    }
}
