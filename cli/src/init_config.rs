use crate::error::{Result, ResultExt};
use crate::ui::{self, Tone};
use colored::Colorize;
use renderflow::config::ensure_config_file_exists;
use std::path::Path;

pub fn execute(path: &Path, force: bool) -> Result<()> {
    ui::print(Tone::Pending, &format!("Writing {}", path.display()));
    let written = ensure_config_file_exists(path, force)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    if written {
        ui::print(Tone::Success, &format!("Configuration written to {}", path.display()));
        eprintln!(
            "   {}",
            "Edit the file to set report titles, figure formats and the charting library".dimmed()
        );
    } else {
        ui::print(
            Tone::Warning,
            &format!("{} already exists; pass --force to overwrite it", path.display()),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_existing_file_kept_without_force() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("renderflow.toml");
        fs::write(&path, "# mine\n").unwrap();

        execute(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

        execute(&path, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[figures]"));
    }
}
