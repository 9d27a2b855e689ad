//! Runtime constants
//!
//! # consts
//!
//! This module houses constants used throughout the code. Many of these are
//! just lazily-evaluated environment variables.

use std::env;
use std::path::PathBuf;

use clap::crate_version;
use once_cell::sync::Lazy;

pub static VERSION: Lazy<String> = Lazy::new(|| {
    let ver = crate_version!().to_owned();
    let commit_hash = env!("GIT_HASH");

    if !commit_hash.is_empty() {
        format!("{} ({})", ver, commit_hash)
    } else {
        ver
    }
});
pub static HOME: Lazy<String> = Lazy::new(|| env::var("HOME").expect("HOME was not set"));
pub static GPG_ID_FILE: Lazy<PathBuf> = Lazy::new(|| PASSWORD_STORE_DIR.join(".gpg-id"));
pub static PASSTUI_UNCLIP_HASH: Lazy<String> =
    Lazy::new(|| env::var("PASSTUI_UNCLIP_HASH").unwrap_or_default());
pub static STORE_STRING: Lazy<String> = Lazy::new(|| PASSWORD_STORE_DIR.display().to_string());
// if the store_string doesn't end with a '/', account for that (subpaths *will* have the '/')
pub static STORE_LEN: Lazy<usize> = Lazy::new(|| {
    if STORE_STRING.ends_with('/') {
        STORE_STRING.len()
    } else {
        STORE_STRING.len() + 1
    }
});

// pass(1)
pub static PASSWORD_STORE_DIR: Lazy<PathBuf> = Lazy::new(|| match env::var("PASSWORD_STORE_DIR") {
    Ok(store) => PathBuf::from(store),
    Err(_) => PathBuf::from(format!("{}/.password-store/", *HOME)),
});
pub static PASSWORD_STORE_X_SELECTION: Lazy<String> =
    Lazy::new(|| match env::var("PASSWORD_STORE_X_SELECTION") {
        Ok(sel) => match sel.as_ref() {
            "p" | "primary" => sel.to_owned(),
            "sec" | "secondary" => sel.to_owned(),
            _ => "clipboard".to_owned(),
        },
        Err(_) => "clipboard".to_owned(),
    });
pub static PASSWORD_STORE_CLIP_TIME: Lazy<u64> = Lazy::new(|| {
    env::var("PASSWORD_STORE_CLIP_TIME")
        .unwrap_or_else(|_| "45".to_owned())
        .parse::<u64>()
        .expect("PASSWORD_STORE_CLIP_TIME was not a number")
});
