//! Relative path resolution for links.
//!
//! A link rendered inside a route subtree may carry a relative target
//! like `href="1"`. [`resolve_href`] turns that into an absolute path by
//! joining it onto the base path of the enclosing route scope.
//!
//! The join algorithm, segment by segment:
//!
//! - an absolute target (leading `/`) ignores the base entirely;
//! - otherwise the target's segments are appended to the base's segments;
//! - `.` segments are dropped, `..` pops one segment (never above root);
//! - empty segments (duplicate slashes) collapse;
//! - the target's trailing slash is preserved;
//! - the result always carries a leading `/`.
//!
//! Note that the base itself is the directory: resolving `"1"` against
//! `/post` yields `/post/1`, not `/1`.

/// Returns whether a target is external and must never be resolved
/// against a route base.
///
/// Scheme-qualified targets (`https://...`, `mailto:...`) and
/// protocol-relative targets (`//host/...`) are external.
pub fn is_external(href: &str) -> bool {
	if href.starts_with("//") {
		return true;
	}

	// A scheme is ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) followed by ":".
	match href.split_once(':') {
		Some((scheme, _)) => {
			let mut chars = scheme.chars();
			match chars.next() {
				Some(first) => {
					first.is_ascii_alphabetic()
						&& chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
				}
				None => false,
			}
		}
		None => false,
	}
}

/// Resolves a link target against the base path of its route scope.
///
/// External targets are returned unchanged.
///
/// # Example
///
/// ```ignore
/// use montgomery::resolve_href;
///
/// assert_eq!(resolve_href("/post", "1"), "/post/1");
/// assert_eq!(resolve_href("/post/1", "../2"), "/post/2");
/// assert_eq!(resolve_href("/post", "/about"), "/about");
/// ```
pub fn resolve_href(base: &str, href: &str) -> String {
	if is_external(href) {
		return href.to_string();
	}

	if let Some(rest) = href.strip_prefix('/') {
		return join_segments(rest.split('/'), href.ends_with('/'));
	}

	if href.is_empty() {
		return normalize_path(base);
	}

	join_segments(
		base.split('/').chain(href.split('/')),
		href.ends_with('/'),
	)
}

/// Normalizes a path: collapses duplicate slashes, resolves `.` and
/// `..` segments, and guarantees a leading `/`.
pub fn normalize_path(path: &str) -> String {
	join_segments(path.split('/'), path.ends_with('/'))
}

/// Returns whether two paths name the same location, ignoring a
/// trailing slash (`/post/1` and `/post/1/` are the same page).
pub fn paths_equal(a: &str, b: &str) -> bool {
	canonical(a) == canonical(b)
}

fn canonical(path: &str) -> &str {
	let trimmed = path.trim_end_matches('/');
	if trimmed.is_empty() { "/" } else { trimmed }
}

fn join_segments<'a>(segments: impl Iterator<Item = &'a str>, trailing_slash: bool) -> String {
	let mut stack: Vec<&str> = Vec::new();

	for segment in segments {
		match segment {
			"" | "." => {}
			".." => {
				stack.pop();
			}
			s => stack.push(s),
		}
	}

	if stack.is_empty() {
		return "/".to_string();
	}

	let mut out = String::with_capacity(stack.iter().map(|s| s.len() + 1).sum());
	for segment in &stack {
		out.push('/');
		out.push_str(segment);
	}
	if trailing_slash {
		out.push('/');
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("https://example.org/x", true)]
	#[case("http://example.org", true)]
	#[case("mailto:someone@example.org", true)]
	#[case("//cdn.example.org/lib.js", true)]
	#[case("/about", false)]
	#[case("about", false)]
	#[case("1", false)]
	#[case("a/b:c", false)]
	#[case(":nope", false)]
	fn test_is_external(#[case] href: &str, #[case] expected: bool) {
		assert_eq!(is_external(href), expected);
	}

	#[test]
	fn test_resolve_relative_segment() {
		assert_eq!(resolve_href("/post", "1"), "/post/1");
	}

	#[test]
	fn test_resolve_against_trailing_slash_base() {
		assert_eq!(resolve_href("/post/", "1"), "/post/1");
	}

	#[test]
	fn test_resolve_absolute_ignores_base() {
		assert_eq!(resolve_href("/post", "/about"), "/about");
	}

	#[test]
	fn test_resolve_empty_keeps_base() {
		assert_eq!(resolve_href("/post/", ""), "/post/");
		assert_eq!(resolve_href("/post", ""), "/post");
	}

	#[test]
	fn test_resolve_dot_segments() {
		assert_eq!(resolve_href("/post/1", "./edit"), "/post/1/edit");
		assert_eq!(resolve_href("/post/1", "../2"), "/post/2");
		assert_eq!(resolve_href("/post/1", "../../about"), "/about");
	}

	#[test]
	fn test_resolve_never_climbs_above_root() {
		assert_eq!(resolve_href("/post", "../../../x"), "/x");
		assert_eq!(normalize_path("/../.."), "/");
	}

	#[test]
	fn test_resolve_preserves_target_trailing_slash() {
		assert_eq!(resolve_href("/post", "1/"), "/post/1/");
		assert_eq!(resolve_href("/post", "/about/"), "/about/");
	}

	#[test]
	fn test_resolve_multi_segment_target() {
		assert_eq!(resolve_href("/docs", "guide/intro"), "/docs/guide/intro");
	}

	#[test]
	fn test_resolve_external_unchanged() {
		assert_eq!(
			resolve_href("/post", "https://example.org/x"),
			"https://example.org/x"
		);
	}

	#[rstest]
	#[case("", "/")]
	#[case("/", "/")]
	#[case("//a//b", "/a/b")]
	#[case("/a/./b", "/a/b")]
	#[case("/a/../b", "/b")]
	#[case("/a/b/", "/a/b/")]
	fn test_normalize_path(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(normalize_path(input), expected);
	}

	#[rstest]
	#[case("/post/1", "/post/1", true)]
	#[case("/post/1", "/post/1/", true)]
	#[case("/", "/", true)]
	#[case("/post/1", "/post/2", false)]
	#[case("/post", "/post/1", false)]
	fn test_paths_equal(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
		assert_eq!(paths_equal(a, b), expected);
	}
}
