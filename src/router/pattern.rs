//! Path pattern matching for route tables.
//!
//! Patterns are segment based:
//! - `/users/` matches exactly;
//! - `:name` captures one path segment (`/post/:id`);
//! - `*name` captures the rest of the path, separators included
//!   (`/files/*path`).
//!
//! A `*name` capture matches across `/`, so `/files/*path` matches
//! `/files/a/b/c` with `path = "a/b/c"`. Callers using such values for
//! anything file-system adjacent must validate them.

use std::collections::HashMap;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for the compiled regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Error type for pattern compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
	/// Pattern string exceeds the maximum length.
	TooLong {
		/// Actual pattern length in bytes.
		length: usize,
		/// Maximum allowed length.
		max: usize,
	},
	/// Pattern has too many path segments.
	TooManySegments {
		/// Actual segment count.
		count: usize,
		/// Maximum allowed count.
		max: usize,
	},
	/// A `:name` or `*name` placeholder has an invalid name.
	InvalidParamName(String),
	/// The compiled regex was rejected.
	Regex(String),
}

impl std::fmt::Display for PatternError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::TooLong { length, max } => {
				write!(f, "pattern length {} exceeds maximum of {} bytes", length, max)
			}
			Self::TooManySegments { count, max } => {
				write!(f, "pattern has {} segments, exceeding maximum of {}", count, max)
			}
			Self::InvalidParamName(name) => write!(f, "invalid parameter name: '{}'", name),
			Self::Regex(msg) => write!(f, "failed to compile pattern regex: {}", msg),
		}
	}
}

impl std::error::Error for PatternError {}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled regex.
	regex: regex::Regex,
	/// Parameter names in the order they appear.
	param_names: Vec<String>,
	/// Whether this pattern has no placeholders.
	is_exact: bool,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns a [`PatternError`] when the pattern exceeds the length or
	/// segment limits, names a parameter invalidly, or compiles to a
	/// regex the size limit rejects.
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let (regex_str, param_names) = Self::compile(pattern)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex(e.to_string()))?;

		let is_exact = param_names.is_empty();

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
			is_exact,
		})
	}

	/// Builds the regex string segment by segment.
	fn compile(pattern: &str) -> Result<(String, Vec<String>), PatternError> {
		let mut parts = Vec::new();
		let mut param_names = Vec::new();

		for segment in pattern.split('/') {
			if let Some(name) = segment.strip_prefix(':') {
				Self::check_param_name(name)?;
				param_names.push(name.to_string());
				parts.push(format!("(?P<{}>[^/]+)", name));
			} else if let Some(name) = segment.strip_prefix('*') {
				Self::check_param_name(name)?;
				param_names.push(name.to_string());
				parts.push(format!("(?P<{}>.*)", name));
			} else {
				parts.push(regex::escape(segment));
			}
		}

		Ok((format!("^{}$", parts.join("/")), param_names))
	}

	fn check_param_name(name: &str) -> Result<(), PatternError> {
		let mut chars = name.chars();
		let valid = match chars.next() {
			Some(first) => {
				(first.is_ascii_alphabetic() || first == '_')
					&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
			}
			None => false,
		};

		if valid {
			Ok(())
		} else {
			Err(PatternError::InvalidParamName(name.to_string()))
		}
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Attempts to match a path, returning extracted parameters.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(path).map(|caps| {
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}

	/// Generates a path from this pattern with the given parameters.
	///
	/// Returns `None` when a parameter is missing.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		let mut parts = Vec::new();

		for segment in self.pattern.split('/') {
			if let Some(name) = segment
				.strip_prefix(':')
				.or_else(|| segment.strip_prefix('*'))
			{
				parts.push(params.get(name)?.clone());
			} else {
				parts.push(segment.to_string());
			}
		}

		Some(parts.join("/"))
	}

	/// Checks whether this pattern matches the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Returns whether this is an exact match pattern (no placeholders).
	pub fn is_exact(&self) -> bool {
		self.is_exact
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}
