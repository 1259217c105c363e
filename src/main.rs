use std::{ffi::OsString, io, process::exit};

use capambel::{launch::passthrough, sys::Kernel, LaunchError, LaunchRequest, Target};
use clap::Parser;
use env_logger::Env;

/// Grant this binary the capabilities to pass on, e.g. `setcap cap_net_raw+p capambel`,
/// and make it executable only by the users meant to have them.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "transfers permitted capabilities to the ambient set, then executes another program",
    override_usage = "capambel [-v] [-c cap,...,cap+p] -- <program> [<args>...]"
)]
struct Cli {
    /// Report the capabilities set on stderr
    #[arg(long, short)]
    verbose: bool,
    /// Take permitted capabilities from this text (see cap_from_text(3)) instead of our own
    #[arg(long, short, value_name = "CAPS")]
    capabilities: Option<String>,
    /// Program and its arguments, passed on unchanged
    #[arg(required = true, trailing_var_arg = true)]
    command: Vec<OsString>,
}

impl Cli {
    fn request(self) -> capambel::Result<LaunchRequest> {
        let mut command = self.command.into_iter();
        let program = command
            .next()
            .ok_or_else(|| LaunchError::Usage("no program given".to_owned()))?;
        let target = Target::from_args(program, command.collect())?;
        Ok(LaunchRequest::new(self.verbose, self.capabilities, target))
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let req = cli.request().unwrap_or_else(|e| fail(e));
    match passthrough(&mut Kernel, &req, io::stderr()) {
        Ok(never) => match never {},
        Err(e) => fail(e),
    }
}

fn fail(e: LaunchError) -> ! {
    eprintln!("{e}");
    exit(e.exit_code())
}
