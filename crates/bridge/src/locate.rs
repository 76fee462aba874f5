//! Companion binary path resolution.
//!
//! The companion is always located relative to the running executable's own
//! directory. Neither `PATH` nor the caller's working directory is consulted.

use std::path::{Path, PathBuf};

use crate::error::BridgeResult;

/// Platform file name for an executable called `name`.
pub fn executable_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

/// Join the install directory, the relative offset and the platform file name.
pub fn resolve_binary_path(install_dir: &Path, relative_dir: &Path, name: &str) -> PathBuf {
    install_dir.join(relative_dir).join(executable_name(name))
}

/// Directory containing the running executable.
pub fn install_dir() -> BridgeResult<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("executable path has no parent: {}", exe.display()),
            )
        })?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_name_suffix() {
        let name = executable_name("agents-core");
        if cfg!(windows) {
            assert_eq!(name, "agents-core.exe");
        } else {
            assert_eq!(name, "agents-core");
        }
    }

    #[test]
    fn test_resolution_is_anchored_to_install_dir() {
        let install = Path::new("/opt/agent/bin");
        let path = resolve_binary_path(install, Path::new("../libexec"), "agents-core");

        assert!(path.starts_with(install));
        assert!(path.ends_with(executable_name("agents-core")));
        assert_eq!(
            path,
            install.join("../libexec").join(executable_name("agents-core"))
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let install = Path::new("/opt/agent/bin");
        let a = resolve_binary_path(install, Path::new("."), "agents-core");
        let b = resolve_binary_path(install, Path::new("."), "agents-core");
        assert_eq!(a, b);
    }

    #[test]
    fn test_install_dir_contains_current_exe() {
        let dir = install_dir().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(exe.parent(), Some(dir.as_path()));
    }
}
