// Copyright (C) 2024 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::BundleError;

/// Extension appended to directive arguments that leave it out.
const SCRIPT_EXT: &str = ".nut";

/// Directory the game resolves script includes against; stripped from the
/// front of every path so prefixed and bare forms open the same file.
pub const SCRIPTS_DIR_PREFIX: &str = "scripts/vscripts/";

const INCLUDE_TOKEN: &str = "IncludeScript(";
const DO_INCLUDE_TOKEN: &str = "DoIncludeScript(";

lazy_static! {
    static ref INCLUDE_RE: Regex = directive_regex(INCLUDE_TOKEN, ")");
    static ref DO_INCLUDE_RE: Regex = directive_regex(DO_INCLUDE_TOKEN, ", rootScope)");
}

/// Defines the regex for one include-directive form: the opening token at
/// the start of the line, a single quoted script path, and the fixed
/// closing token at the end of the line.
fn directive_regex(open: &str, close: &str) -> Regex {
    Regex::new(
        format!(
            r#"^{}\s*"(?P<path>[^"]*)"\s*{}\s*$"#,
            regex::escape(open),
            regex::escape(close)
        )
        .as_str(),
    )
    .unwrap()
}

/// Directive arguments may leave out the script extension.
fn script_filename(script: &str) -> PathBuf {
    if script.ends_with(SCRIPT_EXT) {
        PathBuf::from(script)
    } else {
        PathBuf::from(format!("{}{}", script, SCRIPT_EXT))
    }
}

pub struct Bundler<'a> {
    root_filename: &'a Path,
    bundle_filename: Option<&'a Path>,
    bundle_fd: Option<Box<dyn Write + 'a>>,
    lib_prefix: &'a str,
    detect_cycles: bool,
}

impl<'a> Bundler<'a> {
    pub fn new(root_filename: &'a Path, bundle_filename: &'a Path) -> Bundler<'a> {
        Bundler {
            root_filename,
            bundle_filename: Some(bundle_filename),
            bundle_fd: None,
            lib_prefix: SCRIPTS_DIR_PREFIX,
            detect_cycles: false,
        }
    }

    /// Bundles into an already-open handle instead of a file; used to
    /// write the bundle to stdout.
    pub fn new_fd<W: Write + 'a>(root_filename: &'a Path, fd: W) -> Bundler<'a> {
        Bundler {
            root_filename,
            bundle_filename: None,
            bundle_fd: Some(Box::new(fd)),
            lib_prefix: SCRIPTS_DIR_PREFIX,
            detect_cycles: false,
        }
    }

    pub fn lib_prefix(&mut self, prefix: &'a str) {
        self.lib_prefix = prefix;
    }

    /// Fail with [`BundleError::CyclicInclude`] when a script is reached
    /// again while it is still being expanded, instead of recursing until
    /// the host runs out of resources.
    pub fn detect_cycles_set(&mut self, enable: bool) {
        self.detect_cycles = enable;
    }

    /// Expands the root script into the output, inlining every include
    /// directive recursively.
    pub fn run(mut self) -> Result<(), BundleError> {
        let root = self.root_filename;
        let mut open_scripts = HashSet::new();
        if let Some(filename) = self.bundle_filename {
            let mut fd = File::create(filename).map_err(|source| BundleError::Create {
                path: filename.to_path_buf(),
                source,
            })?;
            self.process(root, &mut fd, &mut open_scripts)
        } else {
            // new_fd() stored a handle instead of a filename
            let mut fd = self.bundle_fd.take().unwrap();
            self.process(root, &mut *fd, &mut open_scripts)
        }
    }

    /// Copies one script into the output, replacing each directive line
    /// with the processed contents of the script it references, and
    /// terminates the expansion with a blank separator line.
    fn process(
        &self,
        filename: &Path,
        o: &mut dyn Write,
        open_scripts: &mut HashSet<PathBuf>,
    ) -> Result<(), BundleError> {
        let filename = self.script_path(filename);
        if self.detect_cycles && !open_scripts.insert(filename.clone()) {
            return Err(BundleError::CyclicInclude { path: filename });
        }
        let fd = File::open(&filename).map_err(|source| BundleError::Open {
            path: filename.clone(),
            source,
        })?;
        let mut reader = BufReader::new(fd);
        let mut line = String::new();
        while reader
            .read_line(&mut line)
            .map_err(|source| BundleError::Read {
                path: filename.clone(),
                source,
            })?
            > 0
        {
            if let Some(script) = self.directive_path(&filename, &line)? {
                self.process(&script_filename(&script), o, open_scripts)?;
            } else {
                o.write_all(line.as_bytes())
                    .map_err(|source| BundleError::Write { source })?;
            }
            line.clear(); // clear to reuse the buffer
        }
        writeln!(o).map_err(|source| BundleError::Write { source })?;
        open_scripts.remove(&filename);
        Ok(())
    }

    /// Extracts the quoted script path if the line is one of the two
    /// include-directive forms. A line that opens a directive but does not
    /// close it properly is an error.
    fn directive_path(&self, filename: &Path, line: &str) -> Result<Option<String>, BundleError> {
        for (token, re) in [
            (INCLUDE_TOKEN, &*INCLUDE_RE),
            (DO_INCLUDE_TOKEN, &*DO_INCLUDE_RE),
        ] {
            if !line.starts_with(token) {
                continue;
            }
            let cap = re
                .captures(line)
                .ok_or_else(|| BundleError::MalformedDirective {
                    path: filename.to_path_buf(),
                    line: String::from(line.trim_end()),
                })?;
            return Ok(Some(String::from(cap.name("path").unwrap().as_str().trim())));
        }
        Ok(None)
    }

    /// Strips the library directory prefix when present, so that the
    /// prefixed and bare forms of a path resolve to the same file.
    fn script_path(&self, filename: &Path) -> PathBuf {
        match filename.to_str().and_then(|f| f.strip_prefix(self.lib_prefix)) {
            Some(stripped) => PathBuf::from(stripped),
            None => filename.to_path_buf(),
        }
    }
}
