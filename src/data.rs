use std::ffi::{CString, OsString};
use std::os::unix::ffi::OsStringExt;

use derive_new::new;
use nix::errno::Errno;

use super::*;

/// Program to exec. `argv[0]` is the program exactly as it was given.
#[public]
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    program: CString,
    argv: Vec<CString>,
}

impl Target {
    pub fn from_args(program: OsString, args: Vec<OsString>) -> Result<Self> {
        let program = c_arg(program)?;
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program.clone());
        for arg in args {
            argv.push(c_arg(arg)?);
        }
        Ok(Self { program, argv })
    }
}

/// execvp would reject an embedded NUL anyway
fn c_arg(arg: OsString) -> Result<CString> {
    CString::new(arg.into_vec()).map_err(|_| LaunchError::Exec(Errno::EINVAL))
}

/// What the capability launcher was asked to do. Built once from the command line.
#[public]
#[derive(Debug, new)]
struct LaunchRequest {
    verbose: bool,
    /// Capability text, decoded only once the pipeline starts
    caps: Option<String>,
    target: Target,
}

#[test]
fn argv_keeps_program() -> anyhow::Result<()> {
    let t = Target::from_args("ls".into(), vec!["-la".into(), "/tmp".into()])?;
    assert_eq!(t.program.as_bytes(), b"ls");
    assert_eq!(
        t.argv,
        [CString::new("ls")?, CString::new("-la")?, CString::new("/tmp")?]
    );
    Ok(())
}

#[test]
fn nul_in_arg() {
    let e = Target::from_args("ls".into(), vec![OsString::from_vec(b"a\0b".to_vec())]);
    assert!(matches!(e, Err(LaunchError::Exec(Errno::EINVAL))));
}
