use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use digicase_core::config::Settings;
use digicase_core::store::{self, CaseFile, StoreError};
use digicase_core::Case;

/// Load settings (explicit file, implicit `digicase.json`, or defaults) and
/// apply a `--templates-dir` override.
pub fn load_settings(config: Option<&str>, templates_dir: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load_or_default(config.map(Path::new))?;
    if let Some(dir) = templates_dir {
        settings.templates_dir = dir.into();
    }
    Ok(settings)
}

fn describe_open_error(path: &Path, err: StoreError) -> anyhow::Error {
    if err.is_corrupt() {
        anyhow!("Corrupt case file or invalid file type: {} ({})", path.display(), err)
    } else {
        anyhow::Error::new(err)
            .context(format!("Failed to open case file at {}", path.display()))
    }
}

/// Open a case file; corrupt files are reported and no case is returned.
pub fn open_case_file(path: &Path) -> Result<Case> {
    Case::open_from_disk(path).map_err(|err| describe_open_error(path, err))
}

/// Like [`open_case_file`], keeping the envelope metadata.
pub fn read_case_file(path: &Path) -> Result<CaseFile> {
    store::read_case_file(path).map_err(|err| describe_open_error(path, err))
}

/// Write a case back to the file it is bound to.
pub fn save_case_file(case: &Case) -> Result<()> {
    let location = case
        .save_location()
        .map(|p| p.display().to_string())
        .ok_or_else(|| anyhow!("Case '{}' has no save location", case.case_reference()))?;
    case.save_to_disk().with_context(|| format!("Failed to save case file at {location}"))?;
    Ok(())
}

/// Write rendered HTML to `out`, or to stdout when no file is given.
pub fn write_output(out: Option<&Path>, html: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}
