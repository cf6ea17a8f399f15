//! Options for rendering merged features

/// Comment lines written at the top of every merged feature file.
pub const DEFAULT_HEADER: [&str; 2] = [
    "# Variable features.fea generated from designspace masters",
    "# Combined from UFO sources in designspace",
];

/// Options for feature merging
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Header comment lines, written verbatim
    pub header: Vec<String>,

    /// Indentation of statements inside the merged `kern` block
    pub indent: String,

    /// Whether to precede class declarations with a comment line
    pub class_comment: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.iter().map(|line| line.to_string()).collect(),
            indent: "    ".to_string(),
            class_comment: true,
        }
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the header lines (accepts any iterable of string-like values)
    pub fn header(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.header = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn class_comment(mut self, class_comment: bool) -> Self {
        self.class_comment = class_comment;
        self
    }
}
