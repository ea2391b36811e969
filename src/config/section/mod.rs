//! Configuration section definitions.
//!
//! Each module corresponds to a section in `lingomap.toml`:
//!
//! | Module      | TOML Section    | Purpose                                 |
//! |-------------|-----------------|-----------------------------------------|
//! | `build`     | `[build]`       | Output directory                        |
//! | `discovery` | `[discovery]`   | Route source, classification, slugs     |
//! | `serve`     | `[serve]`       | Sitemap HTTP server                     |
//! | `site`      | `[site]`        | Base URL                                |
//! | `sitemap`   | `[sitemap]`     | Entry defaults, caching, hreflang pages |

mod build;
mod discovery;
mod serve;
mod site;
mod sitemap;

pub use build::BuildSectionConfig;
pub use discovery::{DiscoveryConfig, RouteSource};
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
pub use sitemap::SitemapConfig;
