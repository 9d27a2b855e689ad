use std::path::PathBuf;

use passtui::consts;
use passtui::util;

#[test]
fn canonicalize_path() {
    let paths = [
        "Internet/amazon.com/password",
        &format!("{}/Internet/amazon.com/password", *consts::STORE_STRING),
    ];

    for path in &paths {
        assert_eq!(
            util::canonicalize_path(path).unwrap(),
            PathBuf::from(format!(
                "{}/Internet/amazon.com/password.gpg",
                *consts::STORE_STRING
            ))
        );
    }
}

#[test]
fn check_sneaky_paths() {
    assert!(util::check_sneaky_paths("../../password").is_err());
    assert!(util::check_sneaky_paths("..").is_err());
    assert!(util::check_sneaky_paths("/../password").is_err());
    assert!(util::check_sneaky_paths("amazon/../password").is_err());
}

#[test]
fn fingerprint_agrees_across_call_sites() {
    // the spawner and the clearer live in different processes; they only
    // ever compare digests computed by this one function
    assert_eq!(
        util::fingerprint("hunter2"),
        util::fingerprint(String::from("hunter2").as_bytes()),
    );
}
