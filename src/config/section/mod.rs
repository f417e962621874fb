//! Configuration section definitions.
//!
//! Each module corresponds to a section in `vitrine.toml`:
//!
//! | Module     | TOML Section   | Purpose                                  |
//! |------------|----------------|------------------------------------------|
//! | `site`     | `[site]`       | Origin, brand, default copy              |
//! | `seo`      | `[seo]`        | Fixed tag block, social card defaults    |
//! | `defaults` | `[defaults]`   | Preloads and structured data everywhere  |
//! | `lazy`     | `[lazy]`       | Deferred image loading                   |
//! | `build`    | `[build]`      | Output, public dir, template             |
//! | `page`     | `[[pages]]`    | Per-route metadata                       |

pub mod build;
pub mod defaults;
pub mod lazy;
pub mod page;
pub mod seo;
pub mod site;

pub use build::BuildSectionConfig;
pub use defaults::DefaultsConfig;
pub use lazy::LazyConfig;
pub use page::{PageConfig, validate_pages};
pub use seo::SeoSectionConfig;
pub use site::SiteSectionConfig;
