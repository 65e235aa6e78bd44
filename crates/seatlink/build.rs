use std::io::Error;
use std::path::Path;
use std::{env, fs};

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs is included directly; it only needs clap + clap_complete, both
// also build-dependencies, so the build script compiles without the rest
// of the crate.
#[path = "src/cli.rs"]
mod cli;

fn main() -> Result<(), Error> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = env::var_os("OUT_DIR").ok_or_else(|| Error::other("OUT_DIR not set"))?;
    let out_dir = Path::new(&out_dir);

    let mut cmd = cli::Cli::command();
    cmd.build();

    write_manpages(&cmd, &out_dir.join("man"))?;
    write_completions(&mut cmd, &out_dir.join("completions"))?;
    Ok(())
}

/// Render a man page for the top-level command and every visible
/// subcommand, flattened as `seatlink-<sub>.1`.
fn write_manpages(root: &clap::Command, dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dir)?;

    let mut pending = vec![root.clone()];
    while let Some(cmd) = pending.pop() {
        let name = cmd.get_name().to_owned();

        let mut page = Vec::new();
        clap_mangen::Man::new(cmd.clone()).render(&mut page)?;
        fs::write(dir.join(format!("{name}.1")), page)?;

        for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
            pending.push(sub.clone().name(format!("{name}-{}", sub.get_name())));
        }
    }
    Ok(())
}

/// Pre-render completion scripts for the shells distro packages ship.
fn write_completions(cmd: &mut clap::Command, dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dir)?;
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        clap_complete::generate_to(shell, cmd, "seatlink", dir)?;
    }
    Ok(())
}
