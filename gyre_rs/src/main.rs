use std::panic;
use std::path::PathBuf;

use gyre::analyzer::run_cycle_analyzer;
use gyre::args::parse_args;

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = payload
            .downcast_ref::<&str>()
            .is_some_and(|s| s.contains("Broken pipe"))
            || payload
                .downcast_ref::<String>()
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quiet exit when the reader closes the pipe (e.g. `gyre | head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn format_usage() -> &'static str {
    "gyre - Circular-import detector for TypeScript/JavaScript workspaces\n\n\
Usage: gyre [root ...] [options]\n\n\
Options:\n  \
  --ext <list>              Comma-separated extensions (default: ts,tsx,js,jsx)\n  \
  -I, --ignore <glob>       Exclude matching paths from the graph (repeatable)\n  \
  -g, --gitignore           Respect .gitignore rules\n  \
  --max-depth <n>           Search depth bound, at least 1 (default 32)\n  \
  --all-cycles              Keep exploring after the first cycle through a file\n  \
  --json                    JSON report on stdout\n  \
  --fail-on-cycles          Exit 1 if any cycle is found\n  \
  --color <mode>            Colorize output: auto|always|never (default auto)\n  \
  --verbose                 Show cache statistics and per-file warnings\n  \
  -h, --help                Show this message\n  \
  --version                 Show version\n\n\
Configuration:\n  \
  Each root may carry .gyre/config.toml with [resolve] aliases, extensions\n  \
  and barrels, and [scan] ignore, max_depth, report_all_cycles.\n  \
  Command-line flags win over config values.\n\n\
Examples:\n  \
  gyre                                      # Scan the current directory\n  \
  gyre web api                              # Multiple roots, one report\n  \
  gyre --json | jq '.[0].cycles'            # Machine-readable output\n  \
  gyre --fail-on-cycles                     # CI gate\n  \
  gyre -I '**/generated/**' --ext ts,tsx    # Trim the graph\n"
}

fn main() -> std::io::Result<()> {
    install_broken_pipe_handler();

    let parsed = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    if parsed.show_help {
        println!("{}", format_usage());
        return Ok(());
    }

    if parsed.show_version {
        println!("gyre {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    for root in parsed.root_list.iter() {
        if !root.is_dir() {
            let raw = if root.as_os_str().is_empty() {
                "<empty>".to_string()
            } else {
                root.display().to_string()
            };
            eprintln!(
                "Root \"{}\" (cwd: {}) is not a directory",
                raw,
                cwd.display()
            );
            std::process::exit(1);
        }
    }

    let found = run_cycle_analyzer(&parsed.root_list, &parsed)?;
    if parsed.fail_on_cycles && found > 0 {
        std::process::exit(1);
    }

    Ok(())
}
