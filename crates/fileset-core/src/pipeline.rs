//! Pipeline identifiers
//!
//! A fileset's ingest pipeline is registered under
//! `<module>-<fileset>-<pipeline file name without extension>`.

use std::path::is_separator;

/// Build the identifier of the pipeline defined in `path`.
///
/// ```
/// use fileset_core::pipeline::format_pipeline_id;
///
/// assert_eq!(format_pipeline_id("nginx", "access", "ingest/default.json"), "nginx-access-default");
/// ```
pub fn format_pipeline_id(module: &str, fileset: &str, path: &str) -> String {
    format!("{}-{}-{}", module, fileset, remove_ext(base_name(path)))
}

/// Strip everything from the last `.` of the final path element.
///
/// Returns the input unchanged when the final element has no dot.
pub fn remove_ext(path: &str) -> &str {
    for (i, c) in path.char_indices().rev() {
        if is_separator(c) {
            break;
        }
        if c == '.' {
            return &path[..i];
        }
    }
    path
}

/// Last element of `path`, ignoring trailing separators.
///
/// An empty path yields `"."` and a path of only separators yields `"/"`.
pub fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit(is_separator).next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.b.c", "a.b")]
    #[case("noext", "noext")]
    #[case(".hidden", "")]
    #[case("dir.d/file", "dir.d/file")]
    #[case("dir/file.json", "dir/file")]
    fn test_remove_ext(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(remove_ext(input), expected);
    }

    #[rstest]
    #[case("ingest/default.json", "default.json")]
    #[case("access.json", "access.json")]
    #[case("ingest/", "ingest")]
    #[case("", ".")]
    #[case("///", "/")]
    fn test_base_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(base_name(input), expected);
    }

    #[rstest]
    #[case("nginx", "access", "access.json", "nginx-access-access")]
    #[case("nginx", "access", "ingest/default.json", "nginx-access-default")]
    #[case("syslog", "system", "ingest/pipeline.v2.json", "syslog-system-pipeline.v2")]
    #[case("mysql", "slowlog", "ingest/pipeline", "mysql-slowlog-pipeline")]
    fn test_format_pipeline_id(
        #[case] module: &str,
        #[case] fileset: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(format_pipeline_id(module, fileset, path), expected);
    }

    proptest! {
        #[test]
        fn remove_ext_strips_exactly_one_extension(stem in "[a-z0-9._-]{0,12}", ext in "[a-z0-9]{1,5}") {
            let name = format!("{stem}.{ext}");
            prop_assert_eq!(remove_ext(&name), stem.as_str());
        }

        #[test]
        fn remove_ext_is_identity_without_dots(name in "[a-z0-9_/-]{0,20}") {
            prop_assert_eq!(remove_ext(&name), name.as_str());
        }
    }
}
