//! In-memory kernel for tests. Enforces the capset and ambient rules Linux applies
//! to a caller without CAP_SETPCAP, and records every call in order.

use nix::errno::Errno;

use crate::{
    exec::Handoff,
    sys::{CapOracle, Policy, SchedOracle},
};

use super::*;

#[derive(Debug)]
pub struct FakeKernel {
    pub last: u8,
    pub state: CapState,
    pub ambient: CapSet,
    pub calls: Vec<&'static str>,
    /// Call name that fails with EPERM
    pub fail: Option<&'static str>,
    pub refuse_ambient: Option<Cap>,
    pub sched: Option<(Policy, i32)>,
    pub euid_dropped: bool,
    pub execd: Option<Target>,
}

impl FakeKernel {
    pub fn new(last: u8, permitted: CapSet) -> Self {
        Self {
            last,
            state: CapState {
                permitted,
                ..CapState::empty()
            },
            ambient: CapSet::empty(),
            calls: Vec::new(),
            fail: None,
            refuse_ambient: None,
            sched: None,
            euid_dropped: false,
            execd: None,
        }
    }
    /// Positions of `name` in the call log
    pub fn calls_of(&self, name: &str) -> Vec<usize> {
        self.calls
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == name)
            .map(|(i, _)| i)
            .collect()
    }
    fn enter(&mut self, call: &'static str) -> Result<(), Errno> {
        self.calls.push(call);
        if self.fail == Some(call) {
            return Err(Errno::EPERM);
        }
        Ok(())
    }
}

impl CapOracle for FakeKernel {
    fn last_cap(&self) -> Result<u8> {
        Ok(self.last)
    }
    fn get_proc(&self) -> Result<CapState> {
        Ok(self.state)
    }
    fn set_proc(&mut self, caps: &CapState) -> Result<()> {
        let commit = |errno| LaunchError::Commit {
            call: "cap_set_proc",
            errno,
        };
        self.enter("capset").map_err(commit)?;
        let old = self.state;
        if !caps.permitted.issubset(old.permitted)
            || !caps.inheritable.issubset(old.inheritable | old.permitted)
            || !caps.effective.issubset(caps.permitted)
        {
            return Err(commit(Errno::EPERM));
        }
        self.state = *caps;
        self.ambient &= caps.permitted & caps.inheritable;
        Ok(())
    }
    fn raise_ambient(&mut self, cap: Cap) -> Result<()> {
        let refuse = |errno| LaunchError::AmbientRaise { cap, errno };
        self.enter("prctl").map_err(refuse)?;
        if self.refuse_ambient == Some(cap)
            || !self.state.permitted.has(cap)
            || !self.state.inheritable.has(cap)
        {
            return Err(refuse(Errno::EPERM));
        }
        self.ambient.add(cap);
        Ok(())
    }
}

impl SchedOracle for FakeKernel {
    fn set_scheduler(&mut self, policy: Policy, priority: i32) -> Result<()> {
        self.enter("sched_setscheduler")
            .map_err(LaunchError::Scheduler)?;
        self.sched = Some((policy, priority));
        Ok(())
    }
    fn drop_privilege(&mut self) -> Result<()> {
        self.enter("seteuid").map_err(LaunchError::PrivilegeDrop)?;
        self.euid_dropped = true;
        Ok(())
    }
}

impl Handoff for FakeKernel {
    type Done = ();
    fn exec(&mut self, target: &Target) -> Result<()> {
        self.enter("execvp").map_err(|_| LaunchError::Exec(Errno::ENOENT))?;
        self.execd = Some(target.clone());
        Ok(())
    }
}
