pub(crate) const DEFAULT_USER_AGENT: &str = concat!("library-tank/", env!("CARGO_PKG_VERSION"));

/// Mirrors the `book-${__VU}-${__ITER}` naming used by the tank scripts.
pub(crate) const DEFAULT_NAME_TEMPLATE: &str = "book-{{vu}}-{{iter}}";

pub(crate) const DEFAULT_RETRIES: u32 = 3;
