// src/fetch/charset.rs

use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use tracing::{debug, warn};

/// How far into the page a `charset=` declaration is looked for.
const SNIFF_LEN: usize = 1024;

/// Decode an HTML page: BOM first, then a `charset=` in the page head,
/// else UTF-8.
pub fn decode_html(bytes: &[u8]) -> Cow<'_, str> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(enc, _)| enc)
        .or_else(|| declared_charset(bytes))
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    debug!(encoding = used.name(), "decoded page");
    if had_errors {
        warn!(encoding = used.name(), "page contained bytes invalid for its charset");
    }
    text
}

/// The encoding named by `<meta charset=..>` or a `content="..; charset=.."`.
fn declared_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\'', ' '])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    Encoding::for_label(label.as_bytes())
}
