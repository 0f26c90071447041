//! Thin command-line driver around the `oddl` library.

use std::fs;
use std::process::ExitCode;

use clap::Parser as _;
use oddl::export::Exporter;
use oddl::Parser;

#[derive(clap::Parser)]
#[command(name = "oddl", about = "Parse and optionally re-export an OpenDDL file")]
struct Args {
    /// Path to the OpenDDL file to parse.
    path: String,

    /// Print the re-exported tree to stdout on success.
    #[arg(long)]
    export: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let bytes = match fs::read(&args.path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("error: could not read {}: {err}", args.path);
            return ExitCode::FAILURE;
        }
    };

    let mut parser = Parser::with_buffer(bytes, true);
    parser.set_log_callback(move |severity, message| {
        eprintln!("[{severity}] {message}");
    });

    let ok = parser.parse();
    if ok && args.export {
        let text = Exporter::new().export(parser.tree());
        print!("{text}");
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
