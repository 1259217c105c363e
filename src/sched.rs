//! Real-time scheduling for an unprivileged program

use crate::{
    exec::Handoff,
    sys::{Policy, SchedOracle},
};

use super::*;

/// The only policy handed out. Not configurable.
pub const ELEVATION: (Policy, i32) = (Policy::RoundRobin, 1);

/// Set the policy while still privileged, give the privilege up, then exec.
pub fn elevate<K>(kernel: &mut K, target: &Target) -> Result<K::Done>
where
    K: SchedOracle + Handoff,
{
    let (policy, priority) = ELEVATION;
    kernel.set_scheduler(policy, priority)?;
    kernel.drop_privilege()?;
    log::debug!("{:?} priority {} set, euid dropped", policy, priority);
    kernel.exec(target)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fake::FakeKernel;

    fn echo() -> Target {
        Target::from_args("echo".into(), vec!["hello".into()]).unwrap()
    }

    fn kernel() -> FakeKernel {
        FakeKernel::new(40, CapSet::empty())
    }

    #[test]
    fn in_order() -> anyhow::Result<()> {
        let mut k = kernel();
        elevate(&mut k, &echo())?;
        assert_eq!(k.calls, ["sched_setscheduler", "seteuid", "execvp"]);
        assert_eq!(k.sched, Some((Policy::RoundRobin, 1)));
        assert!(k.euid_dropped);
        assert_eq!(k.execd, Some(echo()));
        Ok(())
    }

    #[test]
    fn scheduler_refused() {
        let mut k = kernel();
        k.fail = Some("sched_setscheduler");
        let e = elevate(&mut k, &echo()).unwrap_err();
        assert_eq!(e.failed(), "sched_setscheduler failed: Operation not permitted");
        assert_eq!(k.calls, ["sched_setscheduler"]);
        assert!(!k.euid_dropped);
        assert!(k.execd.is_none());
    }

    #[test]
    fn drop_refused() {
        let mut k = kernel();
        k.fail = Some("seteuid");
        let e = elevate(&mut k, &echo()).unwrap_err();
        assert_eq!(e.failed(), "seteuid failed: Operation not permitted");
        assert_eq!(e.exit_code(), 1);
        assert!(k.execd.is_none());
    }

    #[test]
    fn exec_refused() {
        let mut k = kernel();
        k.fail = Some("execvp");
        let e = elevate(&mut k, &echo()).unwrap_err();
        assert_eq!(e.failed(), "execvp failed: No such file or directory");
        assert!(k.euid_dropped);
    }
}
