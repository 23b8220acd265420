use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use simple_script::{logging, Script, ScriptExecutor};

const USAGE: &str = "usage: simple-run [--print] [SCRIPT.json | -]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    print_only: bool,
    /// `None` reads the script from stdin.
    input_path: Option<PathBuf>,
    show_help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();
    for arg in args {
        match arg.as_str() {
            "--print" => options.print_only = true,
            "-h" | "--help" => options.show_help = true,
            "-" => options.input_path = None,
            flag if flag.starts_with('-') => return Err(format!("unknown option: {flag}")),
            _ => options.input_path = Some(PathBuf::from(arg)),
        }
    }
    Ok(options)
}

fn main() -> io::Result<()> {
    logging::init_stderr();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            std::process::exit(2);
        }
    };
    if options.show_help {
        println!("{USAGE}");
        return Ok(());
    }
    let Options {
        print_only,
        input_path,
        ..
    } = options;

    let raw = match &input_path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };
    let script: Script = serde_json::from_str(&raw).map_err(io::Error::other)?;

    let mut stdout = io::stdout().lock();
    if print_only {
        writeln!(stdout, "{}", script.serialize())?;
        return Ok(());
    }

    let executor = ScriptExecutor::from_env();
    tracing::debug!(
        commands = script.len(),
        renderer = %executor.config().bin_path.display(),
        "running script"
    );
    let pending = executor.run(script.commands()).map_err(io::Error::other)?;

    #[cfg(unix)]
    let _signal_guard = simple_script::cancel_on_termination(pending.cancel_handle())?;

    match pending.wait().map_err(io::Error::other)? {
        Some(event) => {
            let line = serde_json::to_string(&event).map_err(io::Error::other)?;
            writeln!(stdout, "{line}")?;
        }
        None => tracing::debug!("renderer returned no event"),
    }

    Ok(())
}
