// Copyright (C) 2024 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a bundling run, naming the offending script where there is
/// one. A run has no partial-success mode: the first error aborts it and
/// whatever was already written stays in the output file.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("error creating {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("error opening {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("error reading {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("error writing bundle: {source}")]
    Write { source: io::Error },

    #[error("malformed include directive in {}: {line}", .path.display())]
    MalformedDirective { path: PathBuf, line: String },

    #[error("cyclic include of {}", .path.display())]
    CyclicInclude { path: PathBuf },
}
