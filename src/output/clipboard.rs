//! Clipboard integration for copying screenshots.
//!
//! Every platform gets an ordered chain of strategies: native image copy
//! first, then a `data:` URL as text, then the path of a temporary file as
//! text. The first strategy that succeeds wins.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use super::OutputError;

/// One way of getting PNG bytes onto the clipboard.
pub trait ClipboardStrategy: Send + Sync {
    fn name(&self) -> &str;
    fn copy(&self, png_data: &[u8]) -> Result<(), OutputError>;
}

/// Ordered list of strategies, tried until one succeeds.
pub struct ClipboardChain {
    strategies: Vec<Box<dyn ClipboardStrategy>>,
}

impl ClipboardChain {
    pub fn new(strategies: Vec<Box<dyn ClipboardStrategy>>) -> Self {
        Self { strategies }
    }

    /// Build the chain for the platform this binary runs on.
    pub fn for_current_platform() -> Self {
        Self::new(platform_strategies())
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Copy PNG data to the clipboard.
    pub fn copy(&self, png_data: &[u8]) -> Result<(), OutputError> {
        log::debug!(
            "Attempting to copy screenshot to clipboard ({} bytes)",
            png_data.len()
        );

        if self.strategies.is_empty() {
            return Err(OutputError::Clipboard(format!(
                "image clipboard is not supported on {}",
                env::consts::OS
            )));
        }

        let mut failures = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            match strategy.copy(png_data) {
                Ok(()) => {
                    log::info!("Copied to clipboard via {}", strategy.name());
                    return Ok(());
                }
                Err(err) => {
                    log::debug!("Clipboard strategy {} failed: {}", strategy.name(), err);
                    failures.push(format!("{}: {}", strategy.name(), err));
                }
            }
        }

        Err(OutputError::Clipboard(failures.join("; ")))
    }
}

/// Pipe the image into a command that reads PNG data on stdin
/// (`wl-copy --type image/png`, `xclip -t image/png`).
pub struct PipeImageCommand {
    program: &'static str,
    args: &'static [&'static str],
}

impl PipeImageCommand {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

impl ClipboardStrategy for PipeImageCommand {
    fn name(&self) -> &str {
        self.program
    }

    fn copy(&self, png_data: &[u8]) -> Result<(), OutputError> {
        pipe_to_command(self.program, self.args, png_data)
    }
}

/// Writes the image to a temporary file and hands the path to a script.
/// Used for `osascript` on macOS and PowerShell on Windows, neither of which
/// accept image data on stdin.
pub struct ScriptImage {
    label: &'static str,
    program: &'static str,
    build_args: fn(&Path) -> Vec<String>,
}

impl ClipboardStrategy for ScriptImage {
    fn name(&self) -> &str {
        self.label
    }

    fn copy(&self, png_data: &[u8]) -> Result<(), OutputError> {
        let temp = write_temp_png(png_data)?;
        let output = Command::new(self.program)
            .args((self.build_args)(temp.path()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                OutputError::Clipboard(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OutputError::Clipboard(format!(
                "{} failed: {}",
                self.program,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Encodes the image as a `data:image/png;base64,...` URL and copies it as text.
pub struct DataUrlText {
    text: TextCommand,
}

impl ClipboardStrategy for DataUrlText {
    fn name(&self) -> &str {
        "data-url"
    }

    fn copy(&self, png_data: &[u8]) -> Result<(), OutputError> {
        self.text.copy_text(&data_url(png_data))
    }
}

/// Keeps the image in a temporary file and copies a pointer to it as text.
pub struct TempFilePathText {
    text: TextCommand,
}

impl ClipboardStrategy for TempFilePathText {
    fn name(&self) -> &str {
        "temp-file-path"
    }

    fn copy(&self, png_data: &[u8]) -> Result<(), OutputError> {
        let temp = write_temp_png(png_data)?;
        // The file must outlive this process for the copied path to be useful.
        let (_, path) = temp
            .keep()
            .map_err(|e| OutputError::Clipboard(format!("failed to keep temp file: {}", e)))?;
        log::debug!("Kept clipboard fallback image at {}", path.display());
        self.text
            .copy_text(&format!("Screenshot saved to: {}", path.display()))
    }
}

/// Wayland clipboard through the wl-clipboard-rs library.
#[cfg(target_os = "linux")]
pub struct WaylandLibrary;

#[cfg(target_os = "linux")]
impl ClipboardStrategy for WaylandLibrary {
    fn name(&self) -> &str {
        "wl-clipboard-rs"
    }

    fn copy(&self, png_data: &[u8]) -> Result<(), OutputError> {
        use wl_clipboard_rs::copy::{MimeType, Options, ServeRequests, Source};

        let mut opts = Options::new();
        // Serve one paste then exit, so the data outlives our process briefly.
        opts.serve_requests(ServeRequests::Only(1));
        opts.copy(
            Source::Bytes(png_data.into()),
            MimeType::Specific("image/png".to_string()),
        )
        .map_err(|e| OutputError::Clipboard(format!("wl-clipboard-rs error: {}", e)))
    }
}

/// A command that takes plain text on stdin (`pbcopy`, `clip`, `wl-copy`, `xclip`).
#[derive(Clone, Copy)]
pub struct TextCommand {
    program: &'static str,
    args: &'static [&'static str],
}

impl TextCommand {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    fn copy_text(&self, text: &str) -> Result<(), OutputError> {
        pipe_to_command(self.program, self.args, text.as_bytes())
    }
}

pub fn data_url(png_data: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png_data))
}

fn pipe_to_command(program: &str, args: &[&str], data: &[u8]) -> Result<(), OutputError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            OutputError::Clipboard(format!(
                "failed to spawn {} (is it installed?): {}",
                program, e
            ))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(data).map_err(|e| {
            OutputError::Clipboard(format!("failed to write to {} stdin: {}", program, e))
        })?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| OutputError::Clipboard(format!("failed to wait for {}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OutputError::Clipboard(format!(
            "{} failed: {}",
            program,
            stderr.trim()
        )));
    }

    log::debug!("{} completed successfully", program);
    Ok(())
}

fn write_temp_png(png_data: &[u8]) -> Result<tempfile::NamedTempFile, OutputError> {
    let mut temp = tempfile::Builder::new()
        .prefix("screenshot-")
        .suffix(".png")
        .tempfile()
        .map_err(|e| OutputError::Clipboard(format!("failed to create temp file: {}", e)))?;
    temp.write_all(png_data)
        .and_then(|()| temp.flush())
        .map_err(|e| OutputError::Clipboard(format!("failed to write temp file: {}", e)))?;
    Ok(temp)
}

#[cfg(target_os = "macos")]
fn platform_strategies() -> Vec<Box<dyn ClipboardStrategy>> {
    const PBCOPY: TextCommand = TextCommand::new("pbcopy", &[]);
    vec![
        Box::new(ScriptImage {
            label: "osascript",
            program: "osascript",
            build_args: |path| {
                vec![
                    "-e".to_string(),
                    format!(
                        "set the clipboard to (read (POSIX file \"{}\") as «class PNGf»)",
                        path.display()
                    ),
                ]
            },
        }),
        Box::new(DataUrlText { text: PBCOPY }),
        Box::new(TempFilePathText { text: PBCOPY }),
    ]
}

#[cfg(target_os = "windows")]
fn platform_strategies() -> Vec<Box<dyn ClipboardStrategy>> {
    const CLIP: TextCommand = TextCommand::new("clip", &[]);
    vec![
        Box::new(ScriptImage {
            label: "powershell",
            program: "powershell",
            build_args: |path| {
                let script = format!(
                    "Add-Type -AssemblyName System.Windows.Forms; \
                     Add-Type -AssemblyName System.Drawing; \
                     $image = [System.Drawing.Image]::FromFile('{}'); \
                     [System.Windows.Forms.Clipboard]::SetImage($image); \
                     $image.Dispose()",
                    path.display().to_string().replace('\'', "''")
                );
                vec![
                    "-NoProfile".to_string(),
                    "-STA".to_string(),
                    "-Command".to_string(),
                    script,
                ]
            },
        }),
        Box::new(DataUrlText { text: CLIP }),
        Box::new(TempFilePathText { text: CLIP }),
    ]
}

#[cfg(target_os = "linux")]
fn platform_strategies() -> Vec<Box<dyn ClipboardStrategy>> {
    const WL_COPY_TEXT: TextCommand = TextCommand::new("wl-copy", &[]);
    const XCLIP_TEXT: TextCommand = TextCommand::new("xclip", &["-selection", "clipboard"]);

    let text = if env::var_os("WAYLAND_DISPLAY").is_some() {
        WL_COPY_TEXT
    } else {
        XCLIP_TEXT
    };

    let mut strategies: Vec<Box<dyn ClipboardStrategy>> = Vec::new();
    if env::var_os("WAYLAND_DISPLAY").is_some() {
        strategies.push(Box::new(PipeImageCommand::new(
            "wl-copy",
            &["--type", "image/png"],
        )));
        strategies.push(Box::new(WaylandLibrary));
    }
    strategies.push(Box::new(PipeImageCommand::new(
        "xclip",
        &["-selection", "clipboard", "-t", "image/png", "-i"],
    )));
    strategies.push(Box::new(DataUrlText { text }));
    strategies.push(Box::new(TempFilePathText { text }));
    strategies
}

#[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
fn platform_strategies() -> Vec<Box<dyn ClipboardStrategy>> {
    Vec::new()
}

/// Program whose presence decides whether image clipboard support is likely.
fn primary_clipboard_program() -> Option<&'static str> {
    if cfg!(target_os = "macos") {
        Some("osascript")
    } else if cfg!(target_os = "windows") {
        Some("powershell")
    } else if cfg!(target_os = "linux") {
        if env::var_os("WAYLAND_DISPLAY").is_some() {
            Some("wl-copy")
        } else {
            Some("xclip")
        }
    } else {
        None
    }
}

/// Check if image clipboard functionality is available on this machine.
pub fn is_clipboard_available() -> bool {
    primary_clipboard_program().is_some_and(|program| find_on_path(program).is_some())
}

fn find_on_path(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        let with_exe = dir.join(format!("{program}{}", env::consts::EXE_SUFFIX));
        with_exe.is_file().then_some(with_exe)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recording {
        label: &'static str,
        fail: bool,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl ClipboardStrategy for Recording {
        fn name(&self) -> &str {
            self.label
        }

        fn copy(&self, _png_data: &[u8]) -> Result<(), OutputError> {
            self.calls.lock().unwrap().push(self.label);
            if self.fail {
                Err(OutputError::Clipboard(format!("{} unavailable", self.label)))
            } else {
                Ok(())
            }
        }
    }

    fn chain(setup: &[(&'static str, bool)]) -> (ClipboardChain, Arc<Mutex<Vec<&'static str>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let strategies = setup
            .iter()
            .map(|&(label, fail)| {
                Box::new(Recording {
                    label,
                    fail,
                    calls: calls.clone(),
                }) as Box<dyn ClipboardStrategy>
            })
            .collect();
        (ClipboardChain::new(strategies), calls)
    }

    #[test]
    fn stops_at_first_successful_strategy() {
        let (chain, calls) = chain(&[("native", true), ("data-url", false), ("temp", false)]);
        chain.copy(b"png").expect("second strategy succeeds");
        assert_eq!(*calls.lock().unwrap(), vec!["native", "data-url"]);
    }

    #[test]
    fn reports_every_failure_when_all_fail() {
        let (chain, calls) = chain(&[("native", true), ("data-url", true)]);
        let err = chain.copy(b"png").unwrap_err();
        let OutputError::Clipboard(message) = err else {
            panic!("expected clipboard error");
        };
        assert!(message.contains("native unavailable"));
        assert!(message.contains("data-url unavailable"));
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn strategy_names_follow_chain_order() {
        let (chain, _) = chain(&[("native", false), ("data-url", false)]);
        assert_eq!(chain.strategy_names(), vec!["native", "data-url"]);
    }

    #[test]
    fn empty_chain_is_unsupported() {
        let chain = ClipboardChain::new(Vec::new());
        assert!(matches!(chain.copy(b"png"), Err(OutputError::Clipboard(_))));
    }

    #[test]
    fn data_url_has_png_prefix() {
        assert_eq!(data_url(b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn missing_program_is_reported_as_clipboard_error() {
        let strategy = PipeImageCommand::new("sshot-definitely-not-installed", &[]);
        let err = strategy.copy(b"png").unwrap_err();
        assert!(err.to_string().contains("is it installed"));
    }

    #[test]
    fn test_is_clipboard_available() {
        // Depends on the host; only make sure it does not panic.
        let _available = is_clipboard_available();
    }
}
