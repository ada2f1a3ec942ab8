//! Command-line surface and translation of flags into a [`CaptureConfig`].

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};

use crate::capture::{CaptureTarget, Region};
use crate::config::{CaptureConfig, Config};
use crate::error::ConfigError;
use crate::output::{ImageFormat, file::expand_tilde};

const DEFAULT_OUTPUT: &str = "screenshot.png";

const AFTER_HELP: &str = "\
TEMPLATE VARIABLES:
  {timestamp}  Unix timestamp
  {datetime}   Date and time (YYYYMMDD_HHMMSS)
  {date}       Date only (YYYYMMDD)
  {time}       Time only (HHMMSS)
  {counter}    Sequence number (001, 002, ...)
  {random}     Random 6-character string
  {prefix}     Filename prefix

EXAMPLES:
  sshot                                     Full screen screenshot
  sshot -r \"100,100,800,600\" -o region.png  Region screenshot
  sshot -f jpg -q 80 -o screen.jpg          JPEG with quality control
  sshot -c                                  Copy to clipboard only
  sshot -n 10 -i 3 -p batch                 10 screenshots every 3 seconds
  sshot -n 60 -i 60 -t \"monitor_{time}.png\" Batch monitoring

EXIT CODES:
  0 success, 1 argument error, 2 file error, 3 capture error,
  4 format error, 5 clipboard error";

#[derive(Parser, Debug)]
#[command(name = "sshot")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SSHOT_GIT_HASH"), ", ", env!("SSHOT_BUILD_TARGET"), ")"),
    about = "A lightweight screenshot CLI tool",
    long_about = "A lightweight, cross-platform command line screenshot tool that supports full \
                  screen and region screenshots with flexible output control and batch processing.",
    after_help = AFTER_HELP,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Capture specific region "x,y,width,height" (e.g. "100,100,800,600")
    #[arg(long, short = 'r', value_name = "X,Y,W,H")]
    pub region: Option<String>,

    /// Output file path (use "" for clipboard only)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<String>,

    /// Display index to capture (0=primary, 1=secondary, etc.)
    #[arg(long, short = 'd', value_name = "N", default_value_t = 0, allow_negative_numbers = true)]
    pub display: i64,

    /// Output format: png, jpg, jpeg, bmp or gif
    #[arg(long, short = 'f', value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG compression quality (1-100, higher=better quality)
    #[arg(long, short = 'q', value_name = "1-100", allow_negative_numbers = true)]
    pub quality: Option<i64>,

    /// Copy screenshot to clipboard
    #[arg(long, short = 'c', action = ArgAction::SetTrue)]
    pub clipboard: bool,

    /// Filename template with variables (e.g. "{datetime}_{counter}.png")
    #[arg(long, short = 't', value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Number of screenshots to capture (use >1 for batch mode)
    #[arg(long, short = 'n', value_name = "N", default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,

    /// Interval between screenshots in seconds
    #[arg(long, short = 'i', value_name = "SECONDS", allow_negative_numbers = true)]
    pub interval: Option<i64>,

    /// Filename prefix substituted for {prefix}
    #[arg(long, short = 'p', value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Output directory for screenshots
    #[arg(long, value_name = "PATH")]
    pub directory: Option<String>,

    /// Enable verbose output mode for debugging
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Output file (overrides -o)
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show display information and platform support
    Info,
}

impl Cli {
    /// Validate flags, filling anything not given on the command line from `file`.
    pub fn into_config(self, file: &Config) -> Result<CaptureConfig, ConfigError> {
        let region = self
            .region
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(str::parse::<Region>)
            .transpose()?;

        let display =
            usize::try_from(self.display).map_err(|_| ConfigError::InvalidDisplay(self.display))?;

        let format: ImageFormat = self
            .format
            .as_deref()
            .unwrap_or(&file.output.format)
            .parse()?;

        let quality = self.quality.unwrap_or(file.output.quality);
        if !(1..=100).contains(&quality) {
            return Err(ConfigError::InvalidQuality(quality));
        }

        if self.count < 1 {
            return Err(ConfigError::InvalidCount(self.count));
        }
        let count = u32::try_from(self.count).map_err(|_| ConfigError::InvalidCount(self.count))?;

        let interval = self.interval.unwrap_or(file.batch.interval);
        if interval < 1 {
            return Err(ConfigError::InvalidInterval(interval));
        }

        let template = self
            .template
            .or_else(|| Some(file.output.template.clone()))
            .filter(|t| !t.is_empty());

        let clipboard = self.clipboard || file.output.clipboard;

        // `-c` on its own means "clipboard only"; an explicit path or a
        // template brings file output back.
        let output_path = match self.output_file.or(self.output) {
            Some(explicit) => explicit,
            None if self.clipboard && template.is_none() => String::new(),
            None => DEFAULT_OUTPUT.to_string(),
        };

        let target = match region {
            Some(region) => CaptureTarget::Region { display, region },
            None => CaptureTarget::Display(display),
        };

        Ok(CaptureConfig {
            output_path,
            target,
            format,
            quality: quality as u8,
            clipboard,
            template,
            count,
            interval: Duration::from_secs(interval as u64),
            prefix: self.prefix.unwrap_or_else(|| file.output.prefix.clone()),
            directory: expand_tilde(self.directory.as_deref().unwrap_or(&file.output.directory)),
            verbose: self.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["sshot"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("arguments parse")
    }

    fn config(args: &[&str]) -> Result<CaptureConfig, ConfigError> {
        parse(args).into_config(&Config::default())
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = config(&[]).unwrap();
        assert_eq!(config.output_path, "screenshot.png");
        assert_eq!(config.target, CaptureTarget::Display(0));
        assert_eq!(config.format, ImageFormat::Png);
        assert_eq!(config.quality, 90);
        assert_eq!(config.count, 1);
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.prefix, "shot");
        assert_eq!(config.directory, PathBuf::from("."));
        assert_eq!(config.template, None);
        assert!(!config.clipboard);
    }

    #[test]
    fn parses_full_flag_set() {
        let config = config(&[
            "-r", "100,200,800,600", "-f", "jpg", "-q", "85", "-d", "1", "-n", "4", "-i", "3",
            "-p", "run", "--directory", "caps", "-t", "{prefix}_{counter}", "test.png",
        ])
        .unwrap();

        assert_eq!(config.output_path, "test.png");
        assert_eq!(
            config.target,
            CaptureTarget::Region {
                display: 1,
                region: Region {
                    x: 100,
                    y: 200,
                    width: 800,
                    height: 600
                }
            }
        );
        assert_eq!(config.format, ImageFormat::Jpg);
        assert_eq!(config.quality, 85);
        assert_eq!(config.count, 4);
        assert_eq!(config.interval, Duration::from_secs(3));
        assert_eq!(config.prefix, "run");
        assert_eq!(config.directory, PathBuf::from("caps"));
        assert_eq!(config.template.as_deref(), Some("{prefix}_{counter}"));
    }

    #[test]
    fn positional_overrides_output_flag() {
        let config = config(&["-o", "flag.png", "positional.png"]).unwrap();
        assert_eq!(config.output_path, "positional.png");
    }

    #[test]
    fn rejects_out_of_range_values_before_capture() {
        assert_eq!(config(&["-q", "0"]), Err(ConfigError::InvalidQuality(0)));
        assert_eq!(config(&["-q", "101"]), Err(ConfigError::InvalidQuality(101)));
        assert_eq!(
            config(&["-f", "tiff"]),
            Err(ConfigError::UnsupportedFormat("tiff".into()))
        );
        assert_eq!(config(&["-n", "0"]), Err(ConfigError::InvalidCount(0)));
        assert_eq!(config(&["-i", "0"]), Err(ConfigError::InvalidInterval(0)));
        assert_eq!(config(&["-d", "-1"]), Err(ConfigError::InvalidDisplay(-1)));
        assert!(matches!(
            config(&["-r", "1,2,3"]),
            Err(ConfigError::InvalidRegion(_))
        ));
    }

    #[test]
    fn uppercase_format_is_accepted() {
        let config = config(&["-f", "JPEG"]).unwrap();
        assert_eq!(config.format, ImageFormat::Jpeg);
    }

    #[test]
    fn clipboard_flag_alone_skips_file_output() {
        let clip_only = config(&["-c"]).unwrap();
        assert!(clip_only.clipboard);
        assert!(!clip_only.saves_to_file());

        let clip_and_file = config(&["-c", "-o", "keep.png"]).unwrap();
        assert!(clip_and_file.saves_to_file());

        let clip_and_template = config(&["-c", "-t", "{date}"]).unwrap();
        assert!(clip_and_template.saves_to_file());
    }

    #[test]
    fn empty_output_flag_means_clipboard_only() {
        let config = config(&["-c", "-o", ""]).unwrap();
        assert_eq!(config.output_path, "");
        assert!(!config.saves_to_file());
    }

    #[test]
    fn config_file_supplies_defaults_but_flags_win() {
        let mut file = Config::default();
        file.output.format = "bmp".into();
        file.output.quality = 70;
        file.output.template = "{date}_{counter}".into();
        file.batch.interval = 10;

        let from_file = parse(&[]).into_config(&file).unwrap();
        assert_eq!(from_file.format, ImageFormat::Bmp);
        assert_eq!(from_file.quality, 70);
        assert_eq!(from_file.template.as_deref(), Some("{date}_{counter}"));
        assert_eq!(from_file.interval, Duration::from_secs(10));

        let overridden = parse(&["-f", "gif", "-q", "20", "-i", "2", "-t", ""])
            .into_config(&file)
            .unwrap();
        assert_eq!(overridden.format, ImageFormat::Gif);
        assert_eq!(overridden.quality, 20);
        assert_eq!(overridden.interval, Duration::from_secs(2));
        assert_eq!(overridden.template, None);
    }

    #[test]
    fn info_subcommand_parses() {
        let cli = parse(&["info", "--verbose"]);
        assert_eq!(cli.command, Some(Command::Info));
        assert!(cli.verbose);
    }
}
