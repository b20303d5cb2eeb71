// src/site/splice.rs

use anyhow::{anyhow, Result};

/// Replace whatever sits between `<!--{id}-->` and `<!--/{id}-->` with
/// `fragment`. The markers stay, so splicing again replaces the same region.
pub fn splice(page: &str, id: &str, fragment: &str) -> Result<String> {
    let open = format!("<!--{id}-->");
    let close = format!("<!--/{id}-->");

    let start = page
        .find(&open)
        .ok_or_else(|| anyhow!("page has no `{open}` marker"))?
        + open.len();
    let end = page[start..]
        .find(&close)
        .map(|i| start + i)
        .ok_or_else(|| anyhow!("page has no `{close}` marker after `{open}`"))?;

    let mut out = String::with_capacity(page.len() + fragment.len());
    out.push_str(&page[..start]);
    out.push('\n');
    out.push_str(fragment.trim_end_matches('\n'));
    out.push('\n');
    out.push_str(&page[end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<body>\n<div id=\"eboard-container\"><!--eboard-container-->old<!--/eboard-container--></div>\n<footer>keep</footer>\n</body>\n";

    #[test]
    fn test_replaces_between_markers_only() {
        let out = splice(PAGE, "eboard-container", "<p>new</p>").unwrap();
        assert_eq!(
            out,
            "<body>\n<div id=\"eboard-container\"><!--eboard-container-->\n<p>new</p>\n<!--/eboard-container--></div>\n<footer>keep</footer>\n</body>\n"
        );
    }

    #[test]
    fn test_splice_twice_is_stable() {
        let once = splice(PAGE, "eboard-container", "<p>new</p>\n").unwrap();
        let twice = splice(&once, "eboard-container", "<p>new</p>\n").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_marker() {
        let err = splice(PAGE, "cardsContainer", "x").unwrap_err();
        assert!(err.to_string().contains("<!--cardsContainer-->"));

        let open_only = "<!--cardsContainer--> no end";
        assert!(splice(open_only, "cardsContainer", "x").is_err());
    }

    #[test]
    fn test_empty_fragment() {
        let out = splice(PAGE, "eboard-container", "").unwrap();
        assert!(out.contains("<!--eboard-container-->\n\n<!--/eboard-container-->"));
    }
}
