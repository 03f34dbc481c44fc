// SPDX-License-Identifier: MPL-2.0
//! Files bundled into the binary: the default content document and the
//! default page scaffold.

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

/// Path of the bundled content document, relative to the asset root.
pub const CONTENT_DOCUMENT: &str = "data/i18n.json";

/// Path of the bundled page scaffold, relative to the asset root.
pub const PAGE_SCAFFOLD: &str = "page/index.html";

/// Raw bytes of a bundled file.
#[must_use]
pub fn get(name: &str) -> Option<Vec<u8>> {
    Asset::get(name).map(|file| file.data.into_owned())
}

/// A bundled file decoded as UTF-8.
#[must_use]
pub fn get_str(name: &str) -> Option<String> {
    get(name).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}
