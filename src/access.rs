use ring::constant_time::verify_slices_are_equal;

use crate::errors::{AppError, AppResult};

/// Shared-secret gate for feed requests.
///
/// Fails closed: with no configured secret nothing gets through.
#[derive(Clone)]
pub struct AccessGuard {
    secret: Option<String>,
    denial_status: u16,
}

impl AccessGuard {
    pub fn new(secret: Option<String>, denial_status: u16) -> Self {
        Self {
            secret,
            denial_status,
        }
    }

    pub fn check(&self, supplied: Option<&str>) -> AppResult<()> {
        let allowed = match (self.secret.as_deref(), supplied) {
            (Some(expected), Some(given)) => {
                verify_slices_are_equal(expected.as_bytes(), given.as_bytes()).is_ok()
            }
            _ => false,
        };

        if allowed {
            Ok(())
        } else {
            Err(AppError::AccessDenied {
                status: self.denial_status,
            })
        }
    }
}
