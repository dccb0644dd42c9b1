//! Process exit codes, BSD sysexits.h values.

use crate::domain::DomainError;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Rejected graph change, malformed database or tree
pub const DATAERR: i32 = 65;

/// Named person or input file does not exist
pub const NOINPUT: i32 = 66;

pub const SOFTWARE: i32 = 70;

pub const IOERR: i32 = 74;

pub const CONFIG: i32 = 78;

/// Lookups that found nothing exit with [`NOINPUT`], every other rule
/// violation with [`DATAERR`].
pub fn for_domain(err: &DomainError) -> i32 {
    match err.code() {
        404 => NOINPUT,
        _ => DATAERR,
    }
}
