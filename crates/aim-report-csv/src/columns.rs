//! Header cleanup and column-role discovery

use aim_report_core::ColumnRoles;

const DESCRIPTION_TERMS: &[&str] = &["description", "desc"];
const CREATED_TERMS: &[&str] = &["date created", "created"];
const EDITED_TERMS: &[&str] = &["edit date", "last updated", "modified"];
const BUILDING_TERMS: &[&str] = &["building", "property", "facility"];

/// Strip the BOM and anything outside printable ASCII, then trim
pub fn clean_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| (' '..='~').contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Clean every header and make duplicates unique (`Name`, `Name.1`, ...)
pub(crate) fn clean_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for header in headers {
        let base = clean_header(header);
        let mut name = base.clone();
        let mut n = 1;
        while cleaned.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        cleaned.push(name);
    }
    cleaned
}

/// First header containing any of `terms` (case-insensitive, terms in priority order)
pub fn find_column<'h>(headers: &'h [String], terms: &[&str]) -> Option<&'h str> {
    terms.iter().find_map(|term| {
        let term = term.to_lowercase();
        headers
            .iter()
            .find(|h| h.to_lowercase().contains(&term))
            .map(String::as_str)
    })
}

/// Resolve the description, date and building columns by name
pub fn discover_roles(headers: &[String]) -> ColumnRoles {
    let find = |terms: &[&str]| find_column(headers, terms).map(str::to_string);
    ColumnRoles {
        description: find(DESCRIPTION_TERMS),
        created: find(CREATED_TERMS),
        edited: find(EDITED_TERMS),
        building: find(BUILDING_TERMS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_clean_header() {
        assert_eq!(clean_header("\u{feff}Work Order"), "Work Order");
        assert_eq!(clean_header("  Date\tCreated \r"), "DateCreated");
        assert_eq!(clean_header("Descripción"), "Descripcin");
    }

    #[test]
    fn test_duplicate_headers_made_unique() {
        assert_eq!(
            clean_headers(["Notes", "Notes ", "Notes"]),
            headers(&["Notes", "Notes.1", "Notes.2"])
        );
    }

    #[test]
    fn test_find_column_term_priority() {
        let cols = headers(&["Short Desc", "Long Description"]);
        assert_eq!(find_column(&cols, DESCRIPTION_TERMS), Some("Long Description"));
        assert_eq!(find_column(&cols, &["missing"]), None);
    }

    #[test]
    fn test_discover_roles() {
        let cols = headers(&[
            "WO Number",
            "Property",
            "Description",
            "Date Created",
            "Edit Date",
        ]);
        assert_eq!(
            discover_roles(&cols),
            ColumnRoles {
                description: Some("Description".into()),
                created: Some("Date Created".into()),
                edited: Some("Edit Date".into()),
                building: Some("Property".into()),
            }
        );
    }

    #[test]
    fn test_discover_roles_partial() {
        let cols = headers(&["WO", "Task DESC", "Last Updated"]);
        let roles = discover_roles(&cols);
        assert_eq!(roles.description.as_deref(), Some("Task DESC"));
        assert_eq!(roles.created, None);
        assert_eq!(roles.edited.as_deref(), Some("Last Updated"));
        assert_eq!(roles.building, None);
    }
}
