// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::path::PathBuf;

/// Expands a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, home_dir())
}

fn expand_home_with(path: &str, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
