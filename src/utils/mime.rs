//! MIME types of the responses the sitemap server sends.

pub mod types {
    pub const XML: &str = "application/xml";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
}
