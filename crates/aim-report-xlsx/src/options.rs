//! Rendering options and colour presets

use aim_report_core::InspectionStatus;

/// Excel worksheet maximum row count
pub const MAX_ROWS: usize = 1_048_576;

/// Excel worksheet maximum column count
pub const MAX_COLUMNS: usize = 16_384;

/// Excel maximum characters per cell
pub const MAX_CELL_CHARS: usize = 32_767;

/// Layout and colour choices for the rendered workbook
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Name of the main sheet
    pub sheet_name: String,
    /// Name of the summary sheet; `None` skips it
    pub dashboard_sheet_name: Option<String>,
    /// Header fill (RGB)
    pub header_fill: u32,
    /// Width of description columns
    pub description_width: f64,
    /// Width of every other column
    pub column_width: f64,
    /// Width of dashboard columns
    pub dashboard_width: f64,
    /// Fill per inspection status (RGB)
    pub status_fills: Vec<(InspectionStatus, u32)>,
    /// Age heatmap colours: low, middle, high (RGB)
    pub age_scale: (u32, u32, u32),
    /// Prompt shown when a status cell is selected
    pub status_prompt: String,
    /// Message shown when an invalid status is typed
    pub status_error: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Work Orders".to_string(),
            dashboard_sheet_name: Some("Dashboard".to_string()),
            header_fill: 0xD9E2F3,
            description_width: 60.0,
            column_width: 18.0,
            dashboard_width: 25.0,
            status_fills: vec![
                (InspectionStatus::Complete, 0xC6EFCE),
                (InspectionStatus::Pending, 0xFFF2CC),
                (InspectionStatus::Incomplete, 0xF8CBAD),
                (InspectionStatus::NeedsReview, 0xFFD966),
            ],
            age_scale: (0xC6EFCE, 0xFFF2CC, 0xF4B084),
            status_prompt: "Select an inspection status.".to_string(),
            status_error: "Please choose a valid inspection status.".to_string(),
        }
    }
}

impl RenderOptions {
    /// Fill configured for `status`
    pub fn status_fill(&self, status: InspectionStatus) -> Option<u32> {
        self.status_fills
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, rgb)| *rgb)
    }
}

/// `true` for columns rendered as wrapped free text
pub fn is_description_column(name: &str) -> bool {
    name.to_lowercase().contains("description")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_fill_lookup() {
        let options = RenderOptions::default();
        assert_eq!(options.status_fill(InspectionStatus::Complete), Some(0xC6EFCE));
        assert_eq!(options.status_fill(InspectionStatus::NeedsReview), Some(0xFFD966));

        let options = RenderOptions {
            status_fills: vec![],
            ..Default::default()
        };
        assert_eq!(options.status_fill(InspectionStatus::Pending), None);
    }

    #[test]
    fn test_is_description_column() {
        assert!(is_description_column("Long DESCRIPTION"));
        assert!(!is_description_column("Desc"));
        assert!(!is_description_column("Room"));
    }
}
