use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::clipboard::{Clipboard, SystemClipboard};
use crate::consts;
use crate::util;

/// What a clearer run did once its timeout expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The clipboard still held the copied password and was cleared.
    Cleared,
    /// Something else owned the clipboard by then; it was left untouched.
    Skipped,
}

/// Entry point for the detached clearer process. The expected fingerprint
/// comes in through `PASSTUI_UNCLIP_HASH`, set by the process that spawned
/// us and nobody else.
pub fn unclip(timeout: u64, force: bool) -> Result<()> {
    let expected = &*consts::PASSTUI_UNCLIP_HASH;

    if expected.is_empty() {
        eprintln!(
            "Unclip is spawned in the background when you copy to your clipboard. \
             This should not be called by a user."
        );
        return Ok(());
    }

    clear_after(
        &SystemClipboard,
        Duration::from_secs(timeout),
        expected,
        force,
    )
    .with_context(|| "Failed to clear the clipboard")?;

    Ok(())
}

/// Sleep out `timeout`, then clear the clipboard, but only if its contents
/// still fingerprint to `expected`. A mismatch means the user or some other
/// program owns the clipboard now, and its contents must not be destroyed.
///
/// Runs exactly once: no retries on failure, no second look after a skip.
pub fn clear_after<C>(
    clipboard: &C,
    timeout: Duration,
    expected: &str,
    force: bool,
) -> Result<Outcome>
where
    C: Clipboard,
{
    thread::sleep(timeout);

    let current = clipboard.read()?;

    if util::fingerprint(&current) != expected && !force {
        return Ok(Outcome::Skipped);
    }

    clipboard.write("")?;

    Ok(Outcome::Cleared)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::util::fingerprint;
    use crate::PasstuiError;

    #[derive(Clone, Default)]
    struct FakeClipboard {
        contents: Arc<Mutex<String>>,
    }

    impl FakeClipboard {
        fn with_contents(contents: &str) -> Self {
            FakeClipboard {
                contents: Arc::new(Mutex::new(contents.to_owned())),
            }
        }

        fn contents(&self) -> String {
            self.contents.lock().unwrap().clone()
        }
    }

    impl Clipboard for FakeClipboard {
        fn read(&self) -> Result<String> {
            Ok(self.contents())
        }

        fn write(&self, contents: &str) -> Result<()> {
            *self.contents.lock().unwrap() = contents.to_owned();

            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn read(&self) -> Result<String> {
            Err(PasstuiError::PasteFailed.into())
        }

        fn write(&self, _contents: &str) -> Result<()> {
            Err(PasstuiError::ClipFailed.into())
        }
    }

    #[test]
    fn clears_when_contents_still_match() {
        let clipboard = FakeClipboard::with_contents("hunter2");

        let outcome = clear_after(
            &clipboard,
            Duration::from_millis(0),
            &fingerprint("hunter2"),
            false,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Cleared);
        assert_eq!(clipboard.contents(), "");
    }

    #[test]
    fn skips_when_somebody_else_copied() {
        let clipboard = FakeClipboard::with_contents("hunter2");
        let expected = fingerprint("hunter2");

        clipboard.write("an address, say").unwrap();

        let outcome = clear_after(&clipboard, Duration::from_millis(0), &expected, false).unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(clipboard.contents(), "an address, say");
    }

    #[test]
    fn overwrite_during_the_wait_is_preserved() {
        let clipboard = FakeClipboard::with_contents("hunter2");
        let expected = fingerprint("hunter2");

        let racer = clipboard.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            racer.write("somethingElse").unwrap();
        });

        let outcome =
            clear_after(&clipboard, Duration::from_millis(150), &expected, false).unwrap();
        handle.join().unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(clipboard.contents(), "somethingElse");
    }

    #[test]
    fn concurrent_clearers_only_clear_their_own_secret() {
        // two copies in quick succession: the clipboard ends up holding the
        // second secret, so the earlier clearer must skip and the later one
        // must clear
        let clipboard = FakeClipboard::with_contents("secretB");

        let first = clipboard.clone();
        let a = thread::spawn(move || {
            clear_after(
                &first,
                Duration::from_millis(20),
                &fingerprint("secretA"),
                false,
            )
            .unwrap()
        });

        let second = clipboard.clone();
        let b = thread::spawn(move || {
            clear_after(
                &second,
                Duration::from_millis(200),
                &fingerprint("secretB"),
                false,
            )
            .unwrap()
        });

        assert_eq!(a.join().unwrap(), Outcome::Skipped);
        assert_eq!(b.join().unwrap(), Outcome::Cleared);
        assert_eq!(clipboard.contents(), "");
    }

    #[test]
    fn force_clears_mismatched_contents() {
        let clipboard = FakeClipboard::with_contents("an address, say");

        let outcome = clear_after(
            &clipboard,
            Duration::from_millis(0),
            &fingerprint("hunter2"),
            true,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Cleared);
        assert_eq!(clipboard.contents(), "");
    }

    #[test]
    fn read_failure_is_terminal() {
        let result = clear_after(
            &BrokenClipboard,
            Duration::from_millis(0),
            &fingerprint("hunter2"),
            false,
        );

        assert!(result.is_err());
    }
}
