// TODO: Mac?

use std::env;
use std::io::Write;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::consts::PASSWORD_STORE_X_SELECTION;
use crate::util;
use crate::PasstuiError;

/// Read/write access to the platform clipboard.
///
/// The clipboard is shared with every other program on the machine, so
/// nothing here may assume it still holds what we last wrote. The clearer is
/// generic over this trait so its verify-before-clear decision can be driven
/// by a fake in tests.
pub trait Clipboard {
    fn read(&self) -> Result<String>;
    fn write(&self, contents: &str) -> Result<()>;
}

/// The real clipboard: `wl-copy`/`wl-paste` under Wayland, `xclip` under X.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn read(&self) -> Result<String> {
        let bytes = paste()?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write(&self, contents: &str) -> Result<()> {
        clip(contents)
    }
}

pub fn clip<S>(contents: S) -> Result<()>
where
    S: AsRef<[u8]>,
{
    let contents = contents.as_ref();
    if env::var("WAYLAND_DISPLAY").is_ok() {
        Command::new("wl-copy")
            .arg("--trim-newline")
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| "Failed to spawn wl-copy")?
            .stdin
            .with_context(|| "stdin wasn't captured")?
            .write_all(contents)?;
    } else if env::var("DISPLAY").is_ok() {
        Command::new("xclip")
            .args(&["-in", "-selection", &PASSWORD_STORE_X_SELECTION])
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| "Failed to spawn xclip")?
            .stdin
            .with_context(|| "stdin wasn't captured")?
            .write_all(contents)?;
    } else {
        return Err(PasstuiError::ClipFailed.into());
    }

    Ok(())
}

pub fn paste() -> Result<Vec<u8>> {
    let bytes = if env::var("WAYLAND_DISPLAY").is_ok() {
        Command::new("wl-paste")
            .arg("--no-newline")
            .output()
            .with_context(|| "Failed to spawn wl-paste")?
            .stdout
    } else if env::var("DISPLAY").is_ok() {
        Command::new("xclip")
            .args(&["-out", "-selection", &PASSWORD_STORE_X_SELECTION])
            .output()
            .with_context(|| "Failed to spawn xclip")?
            .stdout
    } else {
        return Err(PasstuiError::PasteFailed.into());
    };

    Ok(bytes)
}

/// Arrange for the clipboard to clear itself `timeout` seconds from now,
/// provided it still holds `contents` at that point.
///
/// The clearer is this same executable re-run as `unclip`, placed in its own
/// session so it survives our exit and the terminal closing. Only the
/// SHA-256 fingerprint crosses the process boundary; the secret itself never
/// appears in argv or the environment.
pub fn spawn_unclip<S>(contents: S, timeout: u64) -> Result<()>
where
    S: AsRef<[u8]>,
{
    let hash = util::fingerprint(contents);

    // otherwise, the process doesn't live long enough
    thread::sleep(Duration::from_millis(50));

    let mut unclip = Command::new(env::current_exe()?);
    unclip
        .arg("unclip")
        .arg(timeout.to_string())
        .env("PASSTUI_UNCLIP_HASH", hash)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    unsafe {
        unclip.pre_exec(|| {
            // the child must not die with our session
            if libc::setsid() == -1 {
                return Err(std::io::Error::last_os_error());
            }

            Ok(())
        });
    }

    unclip.spawn().map_err(|_| PasstuiError::UnclipSpawnFailed)?;

    Ok(())
}
