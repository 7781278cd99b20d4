//! QJSON command line driver.
//!
//! Decodes a QJSON file, or stdin when no file is given, and prints the
//! resulting JSON on stdout.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "qjson",
    about = "Convert QJSON configuration text to strict JSON",
    disable_version_flag = true
)]
struct Cli {
    /// QJSON file to decode; stdin is read to end of input when omitted
    file: Option<PathBuf>,

    /// Print the qjson version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,
}

fn read_file(path: &Path) -> Result<Vec<u8>, String> {
    let meta = std::fs::metadata(path).map_err(|e| e.to_string())?;
    if !meta.is_file() {
        return Err(format!("file '{}' is not a regular file", path.display()));
    }
    std::fs::read(path).map_err(|e| e.to_string())
}

fn read_stdin() -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .map_err(|e| e.to_string())?;
    Ok(buf)
}

fn main() -> ExitCode {
    // `-?` is accepted as a help alias.
    let args = std::env::args_os().map(|a| {
        if a == "-?" {
            OsString::from("--help")
        } else {
            a
        }
    });
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            let help = matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
            let _ = err.print();
            return if help {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    if cli.version {
        println!("{}", qjson::version());
        return ExitCode::SUCCESS;
    }

    let text = match &cli.file {
        Some(path) => read_file(path),
        None => read_stdin(),
    };
    let text = match text {
        Ok(text) => text,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };

    match qjson::decode(&text) {
        Ok(json) => {
            let mut stdout = std::io::stdout().lock();
            let ok = stdout
                .write_all(&json)
                .and_then(|()| stdout.write_all(b"\n"))
                .is_ok();
            if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("qjson: {err}");
            ExitCode::FAILURE
        }
    }
}
