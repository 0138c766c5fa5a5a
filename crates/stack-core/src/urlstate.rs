//! URL-state mirror of the web stack builder
//!
//! The hosted builder encodes a full configuration in its query string so
//! stacks can be shared as links. This module is the CLI side of that
//! contract: same short keys, comma-joined ids for multi-valued categories,
//! bare strings for single-valued ones, `"true"`/`"false"` literals for the
//! booleans. Decoding a URL this encoder produced and re-encoding it yields
//! byte-identical query parameters.

use url::Url;

use crate::category::Category;
use crate::error::Result;
use crate::resolver::{PartialStack, StackState};

/// Base URL of the hosted stack builder
pub const BUILDER_URL: &str = "https://better-t-stack.dev/new";

/// Encode a resolved stack as the builder's canonical query string.
///
/// Option ids are plain `[a-z0-9-]` slugs and are emitted raw so the
/// comma-joined lists stay readable; only the free-form project name is
/// form-encoded.
pub fn encode(stack: &StackState) -> String {
    let name: String =
        url::form_urlencoded::byte_serialize(stack.project_name.as_bytes()).collect();
    let mut pairs = vec![format!("name={name}")];
    for category in Category::ALL {
        pairs.push(format!(
            "{}={}",
            category.url_key(),
            stack.selected(category).join(",")
        ));
    }
    pairs.push(format!("git={}", bool_str(stack.git)));
    pairs.push(format!("install={}", bool_str(stack.install)));
    pairs.join("&")
}

/// The full shareable builder link for a resolved stack
pub fn share_url(stack: &StackState) -> String {
    format!("{}?{}", BUILDER_URL, encode(stack))
}

/// Decode a query string (or a full share URL) into a seed.
///
/// Unknown query keys are ignored so older CLIs keep reading links from a
/// newer builder; unknown option ids are kept verbatim and surface as
/// `UnknownOption` when the seed is resolved.
pub fn decode(input: &str) -> Result<PartialStack> {
    let query = if input.contains("://") {
        Url::parse(input)?.query().unwrap_or("").to_string()
    } else {
        input.trim_start_matches('?').to_string()
    };

    let mut seed = PartialStack::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "name" => seed.project_name = Some(value.into_owned()),
            "git" => seed.git = Some(value == "true"),
            "install" => seed.install = Some(value == "true"),
            other => {
                let Some(category) = Category::from_url_key(other) else {
                    continue;
                };
                if category.is_multi() {
                    for id in value.split(',').filter(|id| !id.is_empty()) {
                        seed.add(category, id);
                    }
                } else {
                    seed.set(category, value.as_ref());
                }
            }
        }
    }
    Ok(seed)
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
