//! Page arithmetic
//!
//! Stateless translation of a 1-based page number into the skip/take window
//! the reader executes. The last page is never shortened here; the reader
//! stops at end of input.

use crate::error::ApiError;
use serde::Serialize;

/// Rows to discard and rows to collect for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub skip: u64,
    pub take: u64,
    pub total_pages: u64,
}

/// Number of pages needed to show `total_rows` rows.
pub fn total_pages(total_rows: u64, page_size: u64) -> Result<u64, ApiError> {
    check_page_size(page_size)?;
    Ok(total_rows.div_ceil(page_size))
}

/// Compute the window for `page_number` (1-based).
pub fn page_window(
    page_number: i64,
    page_size: u64,
    total_rows: u64,
) -> Result<PageWindow, ApiError> {
    let (skip, take) = skip_take(page_number, page_size)?;
    Ok(PageWindow {
        skip,
        take,
        total_pages: total_pages(total_rows, page_size)?,
    })
}

/// Window without a page count, for datasets whose row count is unknown.
pub fn skip_take(page_number: i64, page_size: u64) -> Result<(u64, u64), ApiError> {
    check_page_size(page_size)?;
    if page_number < 1 {
        return Err(ApiError::InvalidArgument(format!(
            "page number must be 1 or greater, got {}",
            page_number
        )));
    }
    let skip = (page_number as u64 - 1)
        .checked_mul(page_size)
        .ok_or_else(|| {
            ApiError::InvalidArgument(format!(
                "page {} with page size {} is out of addressable range",
                page_number, page_size
            ))
        })?;
    Ok((skip, page_size))
}

fn check_page_size(page_size: u64) -> Result<(), ApiError> {
    if page_size == 0 {
        return Err(ApiError::InvalidArgument(
            "page size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
