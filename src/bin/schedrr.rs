//! Set a real-time scheduling policy, drop privileges, then exec a program.
//! This is meant to be a setuid binary. To keep the attack surface small it takes
//! no options, and always sets SCHED_RR with priority 1.

use std::{env::args_os, process::exit};

use capambel::{sched::elevate, sys::Kernel, LaunchError, Target};
use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let mut args = args_os().skip(1);
    let Some(program) = args.next() else {
        fail(LaunchError::Usage("Usage: schedrr program [args]".to_owned()))
    };
    let target = Target::from_args(program, args.collect()).unwrap_or_else(|e| fail(e));
    match elevate(&mut Kernel, &target) {
        Ok(never) => match never {},
        Err(e) => fail(e),
    }
}

fn fail(e: LaunchError) -> ! {
    eprintln!("{}", e.failed());
    exit(e.exit_code())
}
