// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{io, path::PathBuf, str::Utf8Error};

use saphyr_parser::ScanError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read template file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{filename}: template is not valid UTF-8")]
    Encoding {
        filename: String,
        #[source]
        source: Utf8Error,
    },

    #[error("{filename}: invalid yaml")]
    Syntax {
        filename: String,
        #[source]
        source: ScanError,
    },

    #[error("failed to write parameter table")]
    Write(#[source] io::Error),
}
