//! Turns the configuration plus the current template context into the path
//! a screenshot is written to.

use std::path::{Path, PathBuf};

use super::template::{self, TemplateContext};
use crate::config::CaptureConfig;
use crate::output::{ImageFormat, has_image_extension};

/// Used when neither a template nor an output path is configured.
pub const FALLBACK_OUTPUT: &str = "screenshot.png";

/// Final output path for the iteration described by `context`.
///
/// 1. A template, when configured, produces the base name.
/// 2. Otherwise the output path is used as is, and in batch mode gets a
///    `_NNN` suffix so iterations never overwrite each other.
/// 3. A configured directory replaces whatever directory the name carried.
pub fn resolve_output_path(config: &CaptureConfig, context: &TemplateContext) -> PathBuf {
    let resolved = match config.template.as_deref() {
        Some(pattern) => PathBuf::from(template::resolve(
            pattern,
            context,
            &config.output_path,
            config.format.name(),
            &config.prefix,
        )),
        None => {
            let base = if config.output_path.is_empty() {
                PathBuf::from(FALLBACK_OUTPUT)
            } else {
                PathBuf::from(&config.output_path)
            };
            let base = if config.is_batch() {
                with_sequence_suffix(&base, context.counter(), config.format)
            } else {
                base
            };
            ensure_image_extension(base, config.format)
        }
    };

    if config.overrides_directory() {
        place_in_directory(&resolved, &config.directory)
    } else {
        resolved
    }
}

/// `shot.png` -> `shot_007.png`; the extension defaults to the format's name.
pub fn with_sequence_suffix(path: &Path, counter: u32, format: ImageFormat) -> PathBuf {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| format.name().to_string());
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    path.with_file_name(format!("{stem}_{counter:03}.{extension}"))
}

fn ensure_image_extension(path: PathBuf, format: ImageFormat) -> PathBuf {
    if has_image_extension(&path.to_string_lossy()) {
        return path;
    }
    let mut name = path.into_os_string();
    name.push(".");
    name.push(format.name());
    PathBuf::from(name)
}

/// Keep only the file name of `path` and put it under `directory`.
pub fn place_in_directory(path: &Path, directory: &Path) -> PathBuf {
    match path.file_name() {
        Some(name) => directory.join(name),
        None => directory.join(FALLBACK_OUTPUT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_config(count: u32) -> CaptureConfig {
        CaptureConfig {
            output_path: "shot.png".to_string(),
            count,
            ..CaptureConfig::default()
        }
    }

    fn at(counter: u32) -> TemplateContext {
        let mut context = TemplateContext::new();
        context.set_counter(counter);
        context
    }

    #[test]
    fn batch_without_template_gets_sequential_names() {
        let config = batch_config(3);
        let paths: Vec<PathBuf> = (1..=3)
            .map(|i| resolve_output_path(&config, &at(i)))
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("shot_001.png"),
                PathBuf::from("shot_002.png"),
                PathBuf::from("shot_003.png"),
            ]
        );
    }

    #[test]
    fn single_shot_never_renames() {
        let config = batch_config(1);
        assert_eq!(
            resolve_output_path(&config, &at(1)),
            PathBuf::from("shot.png")
        );
    }

    #[test]
    fn sequence_suffix_keeps_parent_and_defaults_extension() {
        assert_eq!(
            with_sequence_suffix(Path::new("caps/shot"), 12, ImageFormat::Jpg),
            PathBuf::from("caps/shot_012.jpg")
        );
        assert_eq!(
            with_sequence_suffix(Path::new("caps/shot.bmp"), 1000, ImageFormat::Png),
            PathBuf::from("caps/shot_1000.bmp")
        );
    }

    #[test]
    fn template_is_used_verbatim_without_suffix() {
        let config = CaptureConfig {
            template: Some("{prefix}_{counter}".to_string()),
            prefix: "batch".to_string(),
            count: 5,
            ..CaptureConfig::default()
        };
        assert_eq!(
            resolve_output_path(&config, &at(4)),
            PathBuf::from("batch_004.png")
        );
    }

    #[test]
    fn directory_flag_drops_template_directory() {
        let config = CaptureConfig {
            template: Some("sub/name.png".to_string()),
            directory: PathBuf::from("./out"),
            ..CaptureConfig::default()
        };
        assert_eq!(
            resolve_output_path(&config, &at(1)),
            PathBuf::from("./out/name.png")
        );
    }

    #[test]
    fn directory_flag_applies_after_sequence_suffix() {
        let config = CaptureConfig {
            output_path: "elsewhere/shot.png".to_string(),
            directory: PathBuf::from("caps"),
            count: 2,
            ..CaptureConfig::default()
        };
        assert_eq!(
            resolve_output_path(&config, &at(2)),
            PathBuf::from("caps/shot_002.png")
        );
    }

    #[test]
    fn current_directory_sentinel_keeps_output_directory() {
        let config = CaptureConfig {
            output_path: "elsewhere/shot.png".to_string(),
            directory: PathBuf::from("."),
            ..CaptureConfig::default()
        };
        assert_eq!(
            resolve_output_path(&config, &at(1)),
            PathBuf::from("elsewhere/shot.png")
        );
    }

    #[test]
    fn output_without_extension_gets_format() {
        let config = CaptureConfig {
            output_path: "capture".to_string(),
            format: ImageFormat::Gif,
            ..CaptureConfig::default()
        };
        assert_eq!(
            resolve_output_path(&config, &at(1)),
            PathBuf::from("capture.gif")
        );
    }

    #[test]
    fn empty_output_falls_back_to_default_name() {
        let config = CaptureConfig {
            output_path: String::new(),
            count: 2,
            ..CaptureConfig::default()
        };
        assert_eq!(
            resolve_output_path(&config, &at(1)),
            PathBuf::from("screenshot_001.png")
        );
    }
}
