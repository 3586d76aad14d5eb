use std::io;

/// The error type for port inspection operations.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O error occurred while reading a socket table
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Feature not supported on this platform
    #[error("Feature '{feature}' not supported on {platform}")]
    UnsupportedPlatform { feature: String, platform: String },

    /// Failed to access system file or resource
    #[error("Failed to access {resource}: {reason}")]
    ResourceAccess { resource: String, reason: String },

    /// Permission denied accessing system resource
    #[error("Permission denied accessing {resource}. Try running with elevated privileges.")]
    PermissionDenied { resource: String },

    /// Error raised by the procfs reader
    #[cfg(all(target_os = "linux", feature = "linux-procfs"))]
    #[error("procfs error: {0}")]
    Procfs(#[source] procfs::ProcError),
}

impl Error {
    /// Create a new unsupported platform error
    pub fn unsupported_platform(feature: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            feature: feature.into(),
            platform: std::env::consts::OS.to_string(),
        }
    }

    /// Create a new resource access error
    pub fn resource_access(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ResourceAccess {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Create a new permission denied error
    pub fn permission_denied(resource: impl Into<String>) -> Self {
        Self::PermissionDenied {
            resource: resource.into(),
        }
    }

    /// Map an I/O failure on `resource` to the most specific variant.
    #[cfg_attr(
        not(any(target_os = "linux", target_os = "windows", target_os = "macos")),
        allow(dead_code)
    )]
    pub(crate) fn from_io(resource: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::permission_denied(resource),
            _ => Self::Io(err),
        }
    }
}

#[cfg(all(target_os = "linux", feature = "linux-procfs"))]
impl From<procfs::ProcError> for Error {
    fn from(err: procfs::ProcError) -> Self {
        use procfs::ProcError;

        let resource = |path: Option<std::path::PathBuf>| {
            path.map_or_else(|| "procfs".to_string(), |p| p.display().to_string())
        };
        match err {
            ProcError::PermissionDenied(path) => Self::permission_denied(resource(path)),
            ProcError::Io(err, path) => Self::from_io(&resource(path), err),
            other => Self::Procfs(other),
        }
    }
}

/// A specialized `Result` type for port inspection operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_is_mapped() {
        let err = Error::from_io(
            "/proc/net/tcp",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(
            matches!(err, Error::PermissionDenied { ref resource } if resource == "/proc/net/tcp")
        );
        assert!(err.to_string().contains("elevated privileges"));
    }

    #[test]
    fn test_other_io_errors_pass_through() {
        let err = Error::from_io("/proc/net/udp", io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(matches!(err, Error::Io(_)));
    }

    #[cfg(all(target_os = "linux", feature = "linux-procfs"))]
    #[test]
    fn test_procfs_permission_denied_is_mapped() {
        let path = std::path::PathBuf::from("/proc/net/tcp");
        let err = Error::from(procfs::ProcError::PermissionDenied(Some(path.clone())));
        assert!(
            matches!(err, Error::PermissionDenied { ref resource } if resource == "/proc/net/tcp")
        );

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(procfs::ProcError::Io(io_err, Some(path)));
        assert!(matches!(err, Error::PermissionDenied { .. }));
    }

    #[test]
    fn test_unsupported_platform_names_current_os() {
        let err = Error::unsupported_platform("socket enumeration");
        assert_eq!(
            err.to_string(),
            format!(
                "Feature 'socket enumeration' not supported on {}",
                std::env::consts::OS
            )
        );
    }
}
