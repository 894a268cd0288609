extern crate log;
use log::{debug, warn};

use crate::compiler::lexer::*;

pub fn log_expected_token(msg: &str, found: &TokenKind) {
    debug!("Was expecting token of type {} found {:?}", msg, found);
}

pub fn log_expected_token_but_eof(msg: &str) {
    debug!(
        "Was expecting token of type {} found end of line instead",
        msg
    );
}

pub fn log_truncated_immediate(value: i64, truncated: i16) {
    warn!(
        "Immediate {} doesn't fit in 16 bits, encoded as {}",
        value, truncated
    );
}

pub fn log_uninitialised_read(name: &str) {
    warn!("Variable '{}' is read before it has a value, using 0", name);
}
