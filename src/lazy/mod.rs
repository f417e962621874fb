//! Deferred image loading.
//!
//! # Module Structure
//!
//! ```text
//! lazy/
//! ├── observer.rs   # Viewport host, Rect, RootMargin, intersection entries
//! ├── request.rs    # ImageRequest and LoadState, <img> rendering
//! ├── source.rs     # ImageSource trait, FsImageSource, DecodeError
//! └── loader.rs     # LazyImage / MountedImage state machine
//! ```

mod loader;
mod observer;
mod request;
mod source;

pub use loader::{LazyImage, LoaderOptions, MountedImage};
pub use observer::{
    IntersectionEntry, MarginParseError, Observation, ObserverGuard, ObserverOptions, Rect,
    RootMargin, Viewport,
};
pub use request::{AttributeError, DEFAULT_ALT, DEFAULT_PLACEHOLDER, ImageRequest, LoadState};
pub use source::{DecodeError, DecodedImage, FsImageSource, ImageSource};
