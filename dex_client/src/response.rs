use crate::error::{PriceClientError, Result};

pub const SUCCESS_STATUS: u16 = 200;
pub const UNAUTHORIZED_STATUS: u16 = 401;

/// Anything other than 200 is an upstream failure.
pub fn ensure_success(status: u16) -> Result<()> {
    if status == SUCCESS_STATUS {
        Ok(())
    } else {
        Err(PriceClientError::Upstream { status })
    }
}

/// Same as [`ensure_success`], with 401 reported as `Unauthorized`.
pub fn ensure_authorized_success(status: u16) -> Result<()> {
    if status == UNAUTHORIZED_STATUS {
        return Err(PriceClientError::Unauthorized);
    }
    ensure_success(status)
}
