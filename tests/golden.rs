// Copyright (C) 2024 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::path::{Path, PathBuf};

use anyhow::Result;
use goldenfile::Mint;

use nutbundler::Bundler;

const INPUT_DIR: &'static str = "tests/testdata/input";
const OUTPUT_DIR: &'static str = "tests/testdata/output";

#[test]
fn passthrough() -> Result<()> {
    let mut mint = Mint::new(OUTPUT_DIR);
    golden(&mut mint, "passthrough")
}

#[test]
fn include() -> Result<()> {
    let mut mint = Mint::new(OUTPUT_DIR);
    golden(&mut mint, "include")
}

#[test]
fn nested() -> Result<()> {
    let mut mint = Mint::new(OUTPUT_DIR);
    golden(&mut mint, "nested")
}

#[test]
fn prefixed() -> Result<()> {
    let mut mint = Mint::new(OUTPUT_DIR);
    golden(&mut mint, "prefixed")
}

fn golden(mint: &mut Mint, testname: &str) -> Result<()> {
    let output_name = Path::new(testname).with_extension("nut");
    let input_path = {
        let mut p = PathBuf::from(INPUT_DIR);
        p.push(testname);
        p.push("root.nut");
        p
    };
    let golden = mint.new_goldenfile(&output_name)?;
    let bundler = Bundler::new_fd(&input_path, golden);
    bundler.run()?;
    Ok(())
}
