//! Config generation command

use crate::GenerateArgs;
use agx_ocio::{formation, validate, Severity};
use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};

pub fn run(args: GenerateArgs, verbose: u8) -> Result<()> {
    let settings = args.formation.resolve()?;
    let config = formation::build_config(&settings).context("Failed to build config")?;

    let mut issues = validate::check(&config);
    if !args.stdout {
        issues.extend(validate::check_files(&config, &args.output));
    }
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
            Severity::Info => info!("{}", issue.message),
        }
    }
    if validate::has_errors(&issues) {
        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
        bail!("Config has {errors} validation error(s)");
    }

    if args.stdout {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create: {}", args.output.display()))?;
    let path = args.output.join(&args.name);
    config
        .write(&path)
        .with_context(|| format!("Failed to write: {}", path.display()))?;

    if verbose > 0 {
        println!("Wrote config \"{}\"", path.display());
        for display in config.displays() {
            for view in display.views() {
                println!(
                    "  Display: {}, View: {}, Colorspace: {}",
                    display.name(),
                    view.name(),
                    view.colorspace()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormationArgs;
    use std::path::PathBuf;

    fn args(output: PathBuf) -> GenerateArgs {
        GenerateArgs {
            formation: FormationArgs::default(),
            output,
            name: "config.ocio".into(),
            stdout: false,
        }
    }

    #[test]
    fn test_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/config");
        run(args(out.clone()), 0).unwrap();

        let text = std::fs::read_to_string(out.join("config.ocio")).unwrap();
        assert!(text.starts_with("ocio_profile_version: 2"));
        assert!(text.contains("search_path: LUTs"));
    }

    #[test]
    fn test_bad_parameters_fail() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path().to_path_buf());
        a.formation.fulcrum_slope = Some(0.0);
        assert!(run(a, 0).is_err());
        assert!(!dir.path().join("config.ocio").exists());
    }
}
