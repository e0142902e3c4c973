//! Display flags shared by the title builder, grid renderer and loader.

/// How titles are built and inputs are ordered.
///
/// Built once from the command line and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Append `min`/`max` to each title.
    pub show_limits: bool,
    /// Append average, median and shape to each title.
    pub show_stats: bool,
    /// Start each title with `idx: N`.
    pub enable_index: bool,
    /// Added to the zero-based position when printing the index.
    pub index_offset: i64,
    /// Load paths in byte-lexicographic order instead of argument order.
    pub sort_inputs: bool,
    /// Use each file's last path segment as its name.
    pub use_filename_as_title: bool,
    /// Explicit per-image names. Takes precedence over file names.
    pub image_names: Option<Vec<String>>,
}

impl DisplayOptions {
    pub fn with_index(mut self, offset: i64) -> Self {
        self.enable_index = true;
        self.index_offset = offset;
        self
    }

    pub fn with_limits(mut self) -> Self {
        self.show_limits = true;
        self
    }

    pub fn with_stats(mut self) -> Self {
        self.show_stats = true;
        self
    }

    pub fn with_image_names(mut self, names: Vec<String>) -> Self {
        self.image_names = Some(names);
        self
    }
}
