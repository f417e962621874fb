//! SEO head generation.
//!
//! ```text
//! PageMetadata --HeadComposer--> HeadTags --HeadManager--> <head>
//! ```
//!
//! - `meta` - page fields (input)
//! - `tag` - head-tag descriptors and their identities
//! - `og` - Open Graph / Twitter card tags
//! - `compose` - derivation rules
//! - `manager` - the single active tag set

pub mod compose;
pub mod manager;
pub mod meta;
pub mod og;
pub mod tag;

pub use compose::HeadComposer;
pub use manager::{HeadDiff, HeadManager};
pub use meta::{FontPreload, PageMetadata};
pub use tag::{HeadTag, HeadTags, TagKey};
