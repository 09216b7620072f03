//! Region module - maps addresses and postal codes to scheduling regions.

mod classifier;
#[allow(clippy::module_inception)]
mod region;

pub use classifier::{
    classify, classify_by_keyword, classify_postal_code, extract_postal_code,
    is_valid_postal_code, normalize_address, SECTOR_RANGES,
};
pub use region::Region;
