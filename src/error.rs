use capctl::{Cap, ParseCapStateError};
use nix::errno::Errno;
use thiserror::Error;

pub type Result<T, E = LaunchError> = std::result::Result<T, E>;

/// Everything that stops a launch. None of these are recovered from:
/// the binaries print the error and exit without running the target.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("cap_from_text: {}: {}", Errno::EINVAL.desc(), .0)]
    Decode(#[from] ParseCapStateError),
    #[error("{call}: {}", .errno.desc())]
    Query { call: &'static str, errno: Errno },
    #[error("{call}: {}", .errno.desc())]
    Commit { call: &'static str, errno: Errno },
    #[error("prctl: {}", .errno.desc())]
    AmbientRaise { cap: Cap, errno: Errno },
    #[error("sched_setscheduler: {}", .0.desc())]
    Scheduler(Errno),
    #[error("seteuid: {}", .0.desc())]
    PrivilegeDrop(Errno),
    #[error("execvp: {}", .0.desc())]
    Exec(Errno),
    #[error("{0}")]
    Usage(String),
}

impl LaunchError {
    /// Name of the failing call, as perror(3) would be given it
    pub fn call(&self) -> &'static str {
        match self {
            LaunchError::Decode(_) => "cap_from_text",
            LaunchError::Query { call, .. } | LaunchError::Commit { call, .. } => *call,
            LaunchError::AmbientRaise { .. } => "prctl",
            LaunchError::Scheduler(_) => "sched_setscheduler",
            LaunchError::PrivilegeDrop(_) => "seteuid",
            LaunchError::Exec(_) => "execvp",
            LaunchError::Usage(_) => "usage",
        }
    }
    /// System error text, plus the decoder's complaint for bad capability text
    pub fn reason(&self) -> String {
        match self {
            LaunchError::Decode(e) => format!("{}: {e}", Errno::EINVAL.desc()),
            LaunchError::Query { errno, .. }
            | LaunchError::Commit { errno, .. }
            | LaunchError::AmbientRaise { errno, .. }
            | LaunchError::Scheduler(errno)
            | LaunchError::PrivilegeDrop(errno)
            | LaunchError::Exec(errno) => errno.desc().to_owned(),
            LaunchError::Usage(text) => text.clone(),
        }
    }
    /// `<call> failed: <reason>`, the way schedrr reports
    pub fn failed(&self) -> String {
        match self {
            LaunchError::Usage(text) => text.clone(),
            _ => format!("{} failed: {}", self.call(), self.reason()),
        }
    }
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Usage(_) => 2,
            _ => 1,
        }
    }
}

#[test]
fn messages() {
    let e = LaunchError::Commit {
        call: "cap_set_proc",
        errno: Errno::EPERM,
    };
    assert_eq!(e.to_string(), "cap_set_proc: Operation not permitted");
    assert_eq!(e.exit_code(), 1);

    let e = LaunchError::Scheduler(Errno::EPERM);
    assert_eq!(e.failed(), "sched_setscheduler failed: Operation not permitted");

    let e = LaunchError::from("cap_bogus+p".parse::<capctl::CapState>().unwrap_err());
    assert_eq!(e.to_string(), "cap_from_text: Invalid argument: Unknown capability");
    assert_eq!(e.reason(), "Invalid argument: Unknown capability");
    assert_eq!(e.failed(), "cap_from_text failed: Invalid argument: Unknown capability");

    let e = LaunchError::Usage("Usage: schedrr program [args]".to_owned());
    assert_eq!(e.exit_code(), 2);
    assert_eq!(e.failed(), "Usage: schedrr program [args]");
}
