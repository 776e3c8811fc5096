//! Code conversion and display for [`Response`].

use std::fmt;

use super::Response;

impl Response {
    /// Returns the numeric code as u16
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is an error response.
    #[inline]
    pub fn is_error(&self) -> bool {
        let code = self.code();
        (400..600).contains(&code) || code == 696
    }
}

impl fmt::Display for Response {
    /// Always three digits: `001`, `353`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}
