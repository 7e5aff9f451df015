//! Source-level check that library code stays within the 100 column width.

const MAX_WIDTH: usize = 100;

const SOURCES: &[(&str, &str)] = &[
    ("src/lib.rs", include_str!("../src/lib.rs")),
    ("src/config.rs", include_str!("../src/config.rs")),
    ("src/usda.rs", include_str!("../src/usda.rs")),
];

#[test]
fn test_library_lines_fit_max_width() {
    let mut too_wide = Vec::new();
    for (path, source) in SOURCES {
        for (number, line) in source.lines().enumerate() {
            if line.chars().count() > MAX_WIDTH {
                too_wide.push(format!("{}:{}", path, number + 1));
            }
        }
    }
    assert!(too_wide.is_empty(), "lines over {MAX_WIDTH} columns: {too_wide:?}");
}
