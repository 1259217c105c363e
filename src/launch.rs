//! The capability launcher from start to exec

use std::io::Write;

use crate::{
    exec::Handoff,
    select::{select, source},
    sys::CapOracle,
    transfer::transfer,
};

use super::*;

/// Decode, select, transfer, exec. Returns only if something failed,
/// or with whatever a non-replacing [Handoff] yields.
pub fn passthrough<K, W>(kernel: &mut K, req: &LaunchRequest, diag: W) -> Result<K::Done>
where
    K: CapOracle + Handoff,
    W: Write,
{
    let last = kernel.last_cap()?;
    let requested = req
        .caps
        .as_deref()
        .map(str::parse::<CapState>)
        .transpose()?;
    let live = kernel.get_proc()?;
    let sel = select(source(requested.as_ref(), &live), last);
    log::debug!("last cap {}, passing on {:?}", last, sel);
    transfer(kernel, live, &sel, req.verbose.then_some(diag))?;
    kernel.exec(&req.target)
}
