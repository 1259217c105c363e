//! Handing the process over to the target program

use std::convert::Infallible;

use nix::unistd::execvp;

use crate::sys::Kernel;

use super::*;

pub trait Handoff {
    /// What a successful exec leaves behind. For the real kernel nothing does.
    type Done;
    /// Replace the process image, searching PATH like a shell.
    /// Environment and the inheritable/ambient capabilities carry over.
    fn exec(&mut self, target: &Target) -> Result<Self::Done>;
}

impl Handoff for Kernel {
    type Done = Infallible;
    fn exec(&mut self, target: &Target) -> Result<Infallible> {
        log::debug!("execvp {:?} {:?}", target.program, target.argv);
        execvp(&target.program, &target.argv).map_err(LaunchError::Exec)
    }
}

#[test]
fn missing_program() -> anyhow::Result<()> {
    let t = Target::from_args("/nonexistent/capambel-test".into(), vec![])?;
    let e = Kernel.exec(&t).unwrap_err();
    assert_eq!(e.to_string(), "execvp: No such file or directory");
    Ok(())
}
