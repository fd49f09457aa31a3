//! Structured-data pass-through
//!
//! The payload is opaque: returned exactly as authored, never validated.

use crate::seo::model::{PageOverride, StructuredData};

pub fn structured_data(page: Option<&PageOverride>) -> Option<&StructuredData> {
    page.and_then(|p| p.schema.as_ref())
}
