//! Result extraction from DuckDuckGo's HTML frontend.
//!
//! Anchors are found by pattern matching rather than a DOM parse, so any
//! input, however malformed, yields a (possibly empty) list and never fails.

use crate::SearchResult;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<a\s([^>]*)>(.*?)</a\s*>").expect("anchor pattern is hardcoded and must be valid")
});

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("href pattern is hardcoded and must be valid")
});

static CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("class pattern is hardcoded and must be valid")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is hardcoded and must be valid"));

/// Class DuckDuckGo puts on result title anchors.
const RESULT_CLASS: &str = "result__a";

/// Titles of navigation links that are never results.
const NAV_TITLES: [&str; 6] = [
    "settings",
    "help",
    "feedback",
    "privacy",
    "next page",
    "previous page",
];

/// Minimum title length, in characters.
const MIN_TITLE_CHARS: usize = 4;

/// Line width handed to the text renderer, wide enough that nothing wraps.
const RENDER_WIDTH: usize = 4096;

struct Anchor {
    href: String,
    title: String,
    is_result: bool,
}

/// Extract results from a results page, in page order.
///
/// Result-title anchors are used when the page has any; otherwise every
/// anchor is considered. Navigation, self-referential and non-http links are
/// dropped. The list is not capped here.
pub fn extract(html: &str) -> Vec<SearchResult> {
    let anchors: Vec<Anchor> = ANCHOR.captures_iter(html).filter_map(anchor).collect();
    let has_results = anchors.iter().any(|a| a.is_result);
    anchors
        .into_iter()
        .filter(|a| !has_results || a.is_result)
        .filter_map(|a| {
            let url = resolve_href(&a.href)?;
            keep(&a.title, &url).then(|| SearchResult::new(a.title, url))
        })
        .collect()
}

fn anchor(caps: Captures<'_>) -> Option<Anchor> {
    let attrs = caps.get(1)?.as_str();
    let href = attribute(&HREF, attrs)?;
    let is_result = attribute(&CLASS, attrs)
        .is_some_and(|class| class.split_whitespace().any(|c| c == RESULT_CLASS));
    let inner = caps.get(2).map_or("", |m| m.as_str());
    let title = TAG.replace_all(inner, " ");
    let title = decode_entities(&title)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    Some(Anchor {
        href: decode_entities(href.trim()),
        title,
        is_result,
    })
}

fn attribute<'a>(pattern: &Regex, attrs: &'a str) -> Option<&'a str> {
    let caps = pattern.captures(attrs)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Resolve an anchor target to the destination URL, unwrapping
/// DuckDuckGo's `/l/?uddg=` redirect links.
pub fn resolve_href(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        href.to_owned()
    };
    let url = Url::parse(&absolute).ok()?;
    let is_redirect = url
        .host_str()
        .is_some_and(|h| h == "duckduckgo.com" || h.ends_with(".duckduckgo.com"))
        && url.path().starts_with("/l/");
    if is_redirect {
        return url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned());
    }
    Some(absolute)
}

fn keep(title: &str, url: &str) -> bool {
    if title.chars().count() < MIN_TITLE_CHARS {
        return false;
    }
    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return false;
    }
    if lower.contains("duckduckgo.com") {
        return false;
    }
    let title = title.to_lowercase();
    !NAV_TITLES.contains(&title.as_str())
}

/// Decode HTML character references, named (the full HTML5 table) or
/// numeric. Unknown references are left as they are.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    match html2text::from_read(text.as_bytes(), RENDER_WIDTH) {
        Ok(decoded) => decoded.trim().to_owned(),
        Err(e) => {
            tracing::debug!("leaving character references undecoded: {e}");
            text.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<div class="header"><a href="/settings">Settings</a><a href="https://duckduckgo.com/">DuckDuckGo</a></div>
<div class="result">
  <h2 class="result__title">
    <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fen.wikipedia.org%2Fwiki%2FPhotosynthesis&amp;rut=abc">
      <b>Photosynthesis</b> - Wikipedia
    </a>
  </h2>
  <a class="result__url" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fen.wikipedia.org%2Fwiki%2FPhotosynthesis">en.wikipedia.org</a>
</div>
<div class="result">
  <a class="result__a" href="https://www.youtube.com/watch?v=1">Photosynthesis explained</a>
</div>
<div class="result">
  <a class="result__a" href='https://www.nationalgeographic.org/photosynthesis'>Plants &amp; Light &#8211; Nat&#x27;l Geo</a>
</div>
<div class="result"><a class="result__a" href="https://x.io/">FAQ</a></div>
"#;

    #[test]
    fn extracts_result_anchors_in_order() {
        let results = extract(PAGE);
        assert_eq!(
            results,
            vec![
                SearchResult::new(
                    "Photosynthesis - Wikipedia",
                    "https://en.wikipedia.org/wiki/Photosynthesis"
                ),
                SearchResult::new(
                    "Photosynthesis explained",
                    "https://www.youtube.com/watch?v=1"
                ),
                SearchResult::new(
                    "Plants & Light \u{2013} Nat'l Geo",
                    "https://www.nationalgeographic.org/photosynthesis"
                ),
            ]
        );
    }

    #[test]
    fn falls_back_to_all_anchors_without_result_class() {
        let page = r#"<a href="/help">Help</a>
<a href="https://duckduckgo.com/about">About DuckDuckGo</a>
<a href="javascript:void(0)">Open menu</a>
<a href="/l/?uddg=https%3A%2F%2Fexample.org%2Fcells">Cells and energy</a>"#;
        assert_eq!(
            extract(page),
            vec![SearchResult::new("Cells and energy", "https://example.org/cells")]
        );
    }

    #[test]
    fn malformed_markup_never_panics() {
        let inputs = [
            "",
            "<a",
            "<a href=>",
            "<a href=\"",
            "<a href=\"https://a.com\">unterminated",
            "</a></a><a><a>",
            "<a href=\"//duckduckgo.com/l/?uddg=%ZZ\">Broken escape</a>",
            "<a class=\"result__a\" href=\"https://[::1\">Bad host here</a>",
            "&#xFFFFFF; &#99999999; &bogus; &",
            "<a href=\"https://ok.example\">\u{0}\u{fffd}<<<>>>Fine title</a>",
        ];
        for input in inputs {
            let _ = extract(input);
        }
        let mut soup = String::new();
        for i in 0..200 {
            soup.push_str(["<a ", "href=\"", "https://", "\">", "</a>", "&amp", ";", "x"][i % 8]);
            let _ = extract(&soup);
        }
    }

    #[test]
    fn redirect_without_target_is_dropped() {
        assert_eq!(resolve_href("https://duckduckgo.com/l/?rut=1"), None);
        assert_eq!(
            resolve_href("https://example.com/l/?uddg=x").as_deref(),
            Some("https://example.com/l/?uddg=x")
        );
    }

    #[test]
    fn entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt; &#39;d&#x27;"), "a & b <c> 'd'");
        assert_eq!(decode_entities("&copy; 2024 &eacute;t&eacute;"), "\u{a9} 2024 \u{e9}t\u{e9}");
        assert_eq!(decode_entities("Caf&eacute; &unknown;"), "Caf\u{e9} &unknown;");
        assert_eq!(decode_entities("plain"), "plain");
    }

    #[test]
    fn title_keeps_accented_references() {
        let page = r#"<a class="result__a" href="https://chem.example/caf?a=1&amp;b=2">Caf&eacute; chemistry &copy; Lab</a>"#;
        assert_eq!(
            extract(page),
            vec![SearchResult::new(
                "Caf\u{e9} chemistry \u{a9} Lab",
                "https://chem.example/caf?a=1&b=2"
            )]
        );
    }
}
