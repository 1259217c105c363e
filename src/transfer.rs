//! Moving selected capabilities into the inheritable, then the ambient set.
//!
//! The kernel only lets a capability into the ambient set while it is permitted
//! and inheritable in the *committed* process state, so both passes are kept apart:
//! every permitted/inheritable flag is committed first, in a single capset, and only
//! then are ambient flags raised one by one. A failure anywhere stops the pass and
//! leaves whatever was already applied; the caller exits without exec.

use std::{fmt, io::Write};

use crate::{
    select::{cap_name, Selection},
    sys::CapOracle,
};

use super::*;

/// Raise permitted and inheritable for every selected capability
pub fn raise_inheritable(state: &mut CapState, sel: &Selection) {
    for cap in sel.iter() {
        state.permitted.add(cap);
        state.inheritable.add(cap);
    }
}

/// Apply `sel` on top of the `live` snapshot. Returns the state that was committed.
pub fn transfer<O: CapOracle, W: Write>(
    oracle: &mut O,
    live: CapState,
    sel: &Selection,
    mut diag: Option<W>,
) -> Result<CapState> {
    let mut state = live;
    raise_inheritable(&mut state, sel);
    oracle.set_proc(&state)?;
    report(&mut diag, format_args!("Set process capabilities to {}", state));
    for cap in sel.iter() {
        oracle.raise_ambient(cap)?;
        log::debug!("ambient += {}", cap);
        report(&mut diag, format_args!("Added {} to ambient set", cap_name(cap)));
    }
    Ok(state)
}

/// One line of verbose output. A diagnostic that cannot be written never stops the launch.
fn report<W: Write>(diag: &mut Option<W>, line: fmt::Arguments) {
    if let Some(out) = diag.as_mut() {
        if let Err(e) = writeln!(out, "{}", line) {
            log::warn!("verbose output lost: {}", e);
        }
    }
}
