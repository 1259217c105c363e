//! Misc low-level code. The kernel's side of capabilities and scheduling.

use std::fs;

use capctl::{Cap, CapState};
use libc::c_int;
use nix::{
    errno::Errno,
    unistd::{getuid, seteuid},
};

use super::*;

const LAST_CAP: &str = "/proc/sys/kernel/cap_last_cap";

/// Process capability state as the kernel holds it
pub trait CapOracle {
    /// Highest capability number the running kernel knows
    fn last_cap(&self) -> Result<u8>;
    fn get_proc(&self) -> Result<CapState>;
    /// Replace effective, permitted and inheritable in one go
    fn set_proc(&mut self, caps: &CapState) -> Result<()>;
    /// The kernel refuses unless `cap` is both permitted and inheritable right now.
    fn raise_ambient(&mut self, cap: Cap) -> Result<()>;
}

pub trait SchedOracle {
    fn set_scheduler(&mut self, policy: Policy, priority: i32) -> Result<()>;
    /// Effective uid back to the real uid
    fn drop_privilege(&mut self) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    RoundRobin,
}

impl Policy {
    fn raw(self) -> c_int {
        match self {
            Policy::RoundRobin => libc::SCHED_RR,
        }
    }
}

/// The calling process
#[derive(Debug, Clone, Copy, Default)]
pub struct Kernel;

impl CapOracle for Kernel {
    fn last_cap(&self) -> Result<u8> {
        let query = |errno| LaunchError::Query {
            call: "cap_last_cap",
            errno,
        };
        let text = fs::read_to_string(LAST_CAP)
            .map_err(|e| query(Errno::from_i32(e.raw_os_error().unwrap_or(libc::EIO))))?;
        text.trim().parse().map_err(|_| query(Errno::EINVAL))
    }
    fn get_proc(&self) -> Result<CapState> {
        CapState::get_current().map_err(|e| LaunchError::Query {
            call: "cap_get_proc",
            errno: errno_of(e),
        })
    }
    fn set_proc(&mut self, caps: &CapState) -> Result<()> {
        log::debug!("capset {}", caps);
        caps.set_current().map_err(|e| LaunchError::Commit {
            call: "cap_set_proc",
            errno: errno_of(e),
        })
    }
    fn raise_ambient(&mut self, cap: Cap) -> Result<()> {
        capctl::ambient::raise(cap).map_err(|e| LaunchError::AmbientRaise {
            cap,
            errno: errno_of(e),
        })
    }
}

impl SchedOracle for Kernel {
    fn set_scheduler(&mut self, policy: Policy, priority: i32) -> Result<()> {
        // SAFETY: sched_param is plain old data
        let mut param: libc::sched_param = unsafe { std::mem::zeroed() };
        param.sched_priority = priority;
        let res = unsafe { libc::sched_setscheduler(0, policy.raw(), &param) };
        if res != 0 {
            return Err(LaunchError::Scheduler(Errno::last()));
        }
        Ok(())
    }
    fn drop_privilege(&mut self) -> Result<()> {
        seteuid(getuid()).map_err(LaunchError::PrivilegeDrop)
    }
}

fn errno_of(e: capctl::Error) -> Errno {
    Errno::from_i32(e.code())
}

#[test]
fn last_cap_from_proc() -> anyhow::Result<()> {
    let last = Kernel.last_cap()?;
    // CAP_AUDIT_READ (37) has been around since Linux 3.16
    assert!(last >= Cap::AUDIT_READ as u8);
    Ok(())
}

#[test]
fn read_own_caps() -> anyhow::Result<()> {
    let live = Kernel.get_proc()?;
    dbg!(&live);
    assert!(live.effective.issubset(live.permitted));
    Ok(())
}
