use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use data_encoding::HEXLOWER;
use ring::digest;

use crate::consts::{GPG_ID_FILE, HOME, PASSWORD_STORE_DIR, STORE_STRING};
use crate::PasstuiError;

/// Lowercase hex SHA-256 of `data`.
///
/// Deterministic, so two processes can agree on "does the clipboard still
/// hold what we put there" by comparing digests, without either process
/// carrying the secret itself.
pub fn fingerprint<S>(data: S) -> String
where
    S: AsRef<[u8]>,
{
    HEXLOWER.encode(digest::digest(&digest::SHA256, data.as_ref()).as_ref())
}

/// Paths may be an absolute path to the entry, or relative to the store's
/// root.
pub fn canonicalize_path<S>(path: S) -> Result<PathBuf>
where
    S: AsRef<str>,
{
    let path = path.as_ref();
    let mut path = path.replace('~', &*HOME);

    if !path.contains(STORE_STRING.as_str()) {
        path = [STORE_STRING.as_str(), path.as_str()].concat();
    }

    if fs::metadata(&path).is_err() && !path.ends_with(".gpg") {
        path += ".gpg";
    }

    check_sneaky_paths(&path)?;

    Ok(PathBuf::from(path))
}

/// Refuse paths that try to escape the password store.
pub fn check_sneaky_paths<P>(path: P) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let strpath = path.to_string_lossy();

    if strpath.contains("../") || strpath.contains("/..") {
        return Err(PasstuiError::SneakyPath(path.display().to_string()).into());
    }
    if !strpath.contains(STORE_STRING.as_str()) {
        return Err(PasstuiError::SneakyPath(path.display().to_string()).into());
    }

    Ok(())
}

/// The store must have been initialized by pass(1): both the directory and
/// its `.gpg-id` have to be present.
pub fn verify_store_exists() -> Result<()> {
    if fs::metadata(&*PASSWORD_STORE_DIR).is_err() {
        return Err(PasstuiError::StoreDoesntExist.into());
    }

    if fs::metadata(&*GPG_ID_FILE).is_err() {
        return Err(PasstuiError::StoreDoesntExist.into());
    }

    Ok(())
}
