// Copyright (C) 2024 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use clap::Parser;
use std::path::PathBuf;

use anyhow::Result;

use nutbundler::Bundler;

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    /// The entry script of the library to bundle.
    pub root: PathBuf,
    /// The output file, stdout by default.
    pub output: Option<PathBuf>,
    /// Directory prefix stripped from script paths before they are opened.
    #[clap(long, default_value = nutbundler::SCRIPTS_DIR_PREFIX)]
    pub lib_prefix: String,
    /// Fail on include cycles instead of recursing until resources run out.
    #[clap(long)]
    pub detect_cycles: bool,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut bundler = if let Some(ref output) = cli.output {
        Bundler::new(&cli.root, output)
    } else {
        Bundler::new_fd(&cli.root, std::io::stdout())
    };
    bundler.lib_prefix(&cli.lib_prefix);
    bundler.detect_cycles_set(cli.detect_cycles);
    bundler.run()?;
    Ok(())
}
