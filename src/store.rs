use anyhow::{Context, Result};
use gpgme::{Context as Gpg, Data, Protocol};
use walkdir::WalkDir;

use crate::consts::{PASSWORD_STORE_DIR, STORE_LEN};
use crate::util;
use crate::PasstuiError;

/// Every entry under the store whose name starts with `prefix`, relative to
/// the store root and without the `.gpg` suffix, sorted.
pub fn list<S>(prefix: S) -> Result<Vec<String>>
where
    S: AsRef<str>,
{
    let prefix = prefix.as_ref();
    let mut entries = Vec::new();

    for entry in WalkDir::new(&*PASSWORD_STORE_DIR)
        .into_iter()
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|s| entry.depth() == 0 || !s.starts_with('.'))
                .unwrap_or(false)
        })
    {
        let entry = entry?;

        if !entry.path().is_file() {
            continue;
        }

        if let Some(path) = entry.path().to_str() {
            if path.ends_with(".gpg") {
                let name = path[*STORE_LEN..path.len() - 4].to_owned();

                if name.starts_with(prefix) {
                    entries.push(name);
                }
            }
        }
    }

    entries.sort();

    Ok(entries)
}

/// Decrypt `name` and return its first line, the password proper (entries
/// may carry extra lines of notes below it).
pub fn get<S>(name: S) -> Result<String>
where
    S: AsRef<str>,
{
    let name = name.as_ref();
    let path = util::canonicalize_path(name)?;

    if !path.is_file() {
        return Err(PasstuiError::NotInStore(name.to_owned()).into());
    }

    let lines = decrypt_file_into_strings(path.display().to_string())?;
    let password = lines.into_iter().next().unwrap_or_default();

    Ok(password)
}

/// Decrypts the file into a `Vec` of `String`s. This will return an `Err` if
/// the plaintext is not validly UTF8 encoded.
fn decrypt_file_into_strings<S>(file: S) -> Result<Vec<String>>
where
    S: Into<String>,
{
    let file = file.into();

    let mut ctx = Gpg::from_protocol(Protocol::OpenPgp)?;
    let mut cipher = Data::load(file.clone())?;
    let mut plain = Vec::new();
    ctx.decrypt(&mut cipher, &mut plain)
        .with_context(|| format!("Failed to decrypt {}", file))?;

    let plain = std::str::from_utf8(&plain)?;
    let out = plain.lines().map(ToOwned::to_owned).collect();

    Ok(out)
}
