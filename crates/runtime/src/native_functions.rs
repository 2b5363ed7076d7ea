use std::time::{SystemTime, UNIX_EPOCH};

use super::values::RuntimeVal;

// Seconds since the Unix epoch, as a number with millisecond precision
pub fn native_clock(_args: &[RuntimeVal]) -> RuntimeVal {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    RuntimeVal::Number(millis as f64 / 1000.)
}
