// ---------------------------------------------------------------------------
// Static application settings
// ---------------------------------------------------------------------------

/// Default name offered when saving an export.
pub const EXPORT_FILE_NAME: &str = "filtered_data.csv";

/// Content type of exported files.
pub const EXPORT_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// Tunables shared by the session and the UI.
#[derive(Debug, Clone)]
pub struct SieveConfig {
    /// How many filtered records the preview table shows. Exports are never
    /// truncated.
    pub preview_rows: usize,
    /// File name suggested by the save dialog.
    pub export_file_name: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            export_file_name: EXPORT_FILE_NAME.to_string(),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
        }
    }
}
