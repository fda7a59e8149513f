//! Fixed catalog of line tokens and their brand colors.

/// Color used for a line that is not in the catalog.
pub const UNKNOWN_LINE_COLOR: &str = "#666666";

/// Every line the dashboard knows about, with its badge color.
pub const LINE_CATALOG: [(&str, &str); 23] = [
    ("1", "#EE352E"),
    ("2", "#EE352E"),
    ("3", "#EE352E"),
    ("4", "#00933C"),
    ("5", "#00933C"),
    ("6", "#00933C"),
    ("7", "#B933AD"),
    ("A", "#0039A6"),
    ("C", "#0039A6"),
    ("E", "#0039A6"),
    ("B", "#FF6319"),
    ("D", "#FF6319"),
    ("F", "#FF6319"),
    ("M", "#FF6319"),
    ("G", "#6CBE45"),
    ("J", "#996633"),
    ("Z", "#996633"),
    ("L", "#A7A9AC"),
    ("N", "#FCCC0A"),
    ("Q", "#FCCC0A"),
    ("R", "#FCCC0A"),
    ("W", "#FCCC0A"),
    ("S", "#808183"),
];

/// Badge color for a line token.
pub fn line_color(line: &str) -> &'static str {
    LINE_CATALOG
        .iter()
        .find(|(token, _)| *token == line)
        .map(|(_, color)| *color)
        .unwrap_or(UNKNOWN_LINE_COLOR)
}

pub fn is_catalog_line(line: &str) -> bool {
    LINE_CATALOG.iter().any(|(token, _)| *token == line)
}
