use super::Error;

/// Error when paging past the first or last page.
#[derive(Debug)]
pub(super) struct PageRangeError {
    direction: &'static str,
}

impl std::error::Error for PageRangeError {}

impl core::fmt::Display for PageRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "page out of range: there is no {} page", self.direction)
    }
}

impl Error {
    /// Creates a page range error. `direction` is `"next"` or `"previous"`.
    pub fn page_range(direction: &'static str) -> Error {
        Error::from(super::ErrorKind::PageRange(PageRangeError { direction }))
    }

    /// Returns `true` if this error is a page range error.
    pub fn is_page_range(&self) -> bool {
        self.class() == super::ErrorClass::PageRange
    }
}
