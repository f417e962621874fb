//! Route table: request path to page metadata.
//!
//! ```text
//! [[pages]] path = "/services"  ──►  Route {
//!                                       path:     "/services",
//!                                       metadata: page fields over [defaults],
//!                                                 canonical_path = "/services",
//!                                       images:   lazy-loaded assets,
//!                                    }
//! ```

use rustc_hash::FxHashMap;

use crate::config::{PageConfig, SiteConfig};
use crate::seo::PageMetadata;
use crate::utils::path::normalize_route;

/// One configured page.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Normalized route path (e.g., `/about`).
    pub path: String,
    /// Effective metadata, site defaults already merged in.
    pub metadata: PageMetadata,
    /// Images the page loads on demand.
    pub images: Vec<String>,
}

impl Route {
    fn from_config(page: &PageConfig, config: &SiteConfig, defaults: &PageMetadata) -> Self {
        let path = normalize_route(&page.path);
        let metadata = PageMetadata {
            title: page.title.clone(),
            description: page.description.clone(),
            keywords: page.keywords.clone(),
            social_image: page
                .social_image
                .clone()
                .unwrap_or_else(|| config.seo.social_image.clone()),
            social_type: page
                .social_type
                .clone()
                .unwrap_or_else(|| config.seo.social_type.clone()),
            canonical_path: Some(path.clone()),
            structured_data: page.structured_data.clone(),
            preload_fonts: page.preload_fonts.clone(),
            preload_images: page.preload_images.clone(),
        }
        .merged_over(defaults);

        Self {
            path,
            metadata,
            images: page.images.clone(),
        }
    }
}

/// Where a request path landed.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Page(&'a Route),
    /// Unknown path: site-wide defaults, no canonical override.
    NotFound(&'a PageMetadata),
}

impl<'a> Resolved<'a> {
    pub fn metadata(&self) -> &'a PageMetadata {
        match self {
            Self::Page(route) => &route.metadata,
            Self::NotFound(metadata) => metadata,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Routes in configuration order, indexed by normalized path.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    index: FxHashMap<String, usize>,
    not_found: PageMetadata,
}

impl Router {
    pub fn from_config(config: &SiteConfig) -> Self {
        let defaults = config.defaults.to_metadata();

        let mut routes = Vec::with_capacity(config.pages.len());
        let mut index = FxHashMap::default();
        for page in &config.pages {
            let route = Route::from_config(page, config, &defaults);
            // Validation rejects duplicates; the first entry wins otherwise.
            if index.contains_key(&route.path) {
                continue;
            }
            index.insert(route.path.clone(), routes.len());
            routes.push(route);
        }

        let not_found = PageMetadata {
            social_image: config.seo.social_image.clone(),
            social_type: config.seo.social_type.clone(),
            ..Default::default()
        }
        .merged_over(&defaults);

        Self {
            routes,
            index,
            not_found,
        }
    }

    /// Look up a request path. Query strings, fragments and trailing
    /// slashes are ignored.
    pub fn resolve(&self, path: &str) -> Resolved<'_> {
        match self.get(path) {
            Some(route) => Resolved::Page(route),
            None => Resolved::NotFound(&self.not_found),
        }
    }

    pub fn get(&self, path: &str) -> Option<&Route> {
        self.index
            .get(&normalize_route(path))
            .map(|&i| &self.routes[i])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn not_found(&self) -> &PageMetadata {
        &self.not_found
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
