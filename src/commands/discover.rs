//! Discover command implementation
//!
//! Merges command-line arguments over the configuration file, runs
//! discovery, and prints the resolved applications.

use std::path::{Path, PathBuf};

use crate::cli::{DiscoverArgs, OutputFormat};
use crate::config::{self, ReleaseConfig};
use crate::discovery::{self, DiscoveryOptions};
use crate::error::{Result, fs};
use crate::ui;

/// Run discover command
pub fn run(config_path: Option<PathBuf>, args: DiscoverArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| fs::current_dir_failed(&e))?;
    let output = discover_output(config_path.as_deref(), &cwd, args)?;
    print!("{output}");
    Ok(())
}

/// Run discovery and render the result in the requested format
pub fn discover_output(config_path: Option<&Path>, cwd: &Path, args: DiscoverArgs) -> Result<String> {
    let config = config::load_config(config_path, cwd)?;
    let format = args.format;
    let options = build_options(config, args, cwd);

    let records = discovery::discover(&options)?;

    match format {
        OutputFormat::Text => Ok(ui::render_text(&records)),
        OutputFormat::Json => ui::render_json(&records).map(|json| format!("{json}\n")),
    }
}

/// Merge command-line arguments over the configuration file
///
/// Library directories and skip names are appended, `--shallow` forces a
/// shallow scan, and `--override` replaces a configured override of the same
/// name. Relative command-line paths resolve against `cwd`.
pub fn build_options(config: ReleaseConfig, args: DiscoverArgs, cwd: &Path) -> DiscoveryOptions {
    let mut config = config;
    config.lib_dirs.extend(args.lib_dirs.iter().map(|dir| cwd.join(dir)));
    config.shallow |= args.shallow;
    config.skip.extend(args.skip);
    config.overrides.extend(
        args.overrides
            .into_iter()
            .map(|(name, dir)| (name, cwd.join(dir))),
    );
    config.into_options()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::error::RelasmError;
    use crate::test_fixtures::{AppFixture, create_temp_dir};

    fn args(lib_dirs: &[&str]) -> DiscoverArgs {
        DiscoverArgs {
            lib_dirs: lib_dirs.iter().map(PathBuf::from).collect(),
            shallow: false,
            skip: vec![],
            overrides: vec![],
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_build_options_merges_config_and_args() {
        let cwd = Path::new("/work");
        let config = ReleaseConfig {
            lib_dirs: vec![PathBuf::from("/opt/lib")],
            shallow: false,
            skip: vec!["observer".to_string()],
            overrides: BTreeMap::from([
                ("a".to_string(), PathBuf::from("/cfg/a")),
                ("b".to_string(), PathBuf::from("/cfg/b")),
            ]),
        };
        let mut cli = args(&["lib"]);
        cli.shallow = true;
        cli.skip = vec!["wx".to_string()];
        cli.overrides = vec![("a".to_string(), PathBuf::from("src/a"))];

        let options = build_options(config, cli, cwd);
        assert_eq!(
            options.lib_dirs,
            [PathBuf::from("/opt/lib"), PathBuf::from("/work/lib")]
        );
        assert!(options.shallow);
        assert!(options.skip.contains("observer"));
        assert!(options.skip.contains("wx"));
        assert_eq!(options.overrides["a"], PathBuf::from("/work/src/a"));
        assert_eq!(options.overrides["b"], PathBuf::from("/cfg/b"));
    }

    #[test]
    fn test_discover_output_text() {
        let temp = create_temp_dir();
        AppFixture::new("cowboy", "2.10.0").write_to(&temp.path().join("lib"));

        let output = discover_output(None, temp.path(), args(&["lib"])).unwrap();
        assert!(output.contains("cowboy-2.10.0"));
    }

    #[test]
    fn test_discover_output_json() {
        let temp = create_temp_dir();
        AppFixture::new("cowboy", "2.10.0").write_to(&temp.path().join("lib"));

        let mut cli = args(&["lib"]);
        cli.format = OutputFormat::Json;
        let output = discover_output(None, temp.path(), cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["vsn"], "2.10.0");
    }

    #[test]
    fn test_discover_output_uses_config_file() {
        let temp = create_temp_dir();
        AppFixture::new("ranch", "1.8.0").write_to(&temp.path().join("deps"));
        std::fs::write(
            temp.path().join(config::CONFIG_FILE_NAME),
            "lib_dirs: [deps]\n",
        )
        .unwrap();

        let output = discover_output(None, temp.path(), args(&[])).unwrap();
        assert!(output.contains("ranch-1.8.0"));
    }

    #[test]
    fn test_discover_output_fails_with_all_errors() {
        let temp = create_temp_dir();
        AppFixture::unversioned("a").write_to(&temp.path().join("lib"));
        AppFixture::unversioned("b").write_to(&temp.path().join("lib"));

        let err = discover_output(None, temp.path(), args(&["lib"])).unwrap_err();
        let RelasmError::DiscoveryFailed { errors } = err else {
            panic!("expected discovery failure");
        };
        assert_eq!(errors.len(), 2);
    }
}
