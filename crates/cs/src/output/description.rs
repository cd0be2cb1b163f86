//! Parsed path output formatting.

use serde::Serialize;

use crate::commands::parse::ParseResult;

use super::helpers::push_title;

/// JSON output structure for the parse command.
#[derive(Serialize)]
pub struct DescriptionOutput<'a> {
    pub path: &'a str,
    pub set: &'a str,
    pub set_explicit: bool,
    pub filters: &'a [String],
    pub sort: &'a str,
    pub reversed: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub extra: &'a str,
}

impl<'a> From<&'a ParseResult> for DescriptionOutput<'a> {
    fn from(result: &'a ParseResult) -> Self {
        let description = &result.description;
        Self {
            path: description.serialize(),
            set: description.set_name(),
            set_explicit: description.set_name_explicitly_set(),
            filters: description.filters(),
            sort: description.sort_name(),
            reversed: description.sort_reversed(),
            extra: &result.extra,
        }
    }
}

/// Formats a parsed path as JSON.
pub fn format_description_json(result: &ParseResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DescriptionOutput::from(result))
}

/// Formats a parsed path as a key/value listing.
pub fn format_description_table(result: &ParseResult, use_colors: bool) -> String {
    let output = DescriptionOutput::from(result);
    let mut text = String::new();

    push_title(&mut text, output.path, use_colors);

    let set_note = if output.set_explicit { "" } else { " (default)" };
    text.push_str(&format!("  Set:     {}{}\n", output.set, set_note));

    if output.filters.is_empty() {
        text.push_str("  Filters: (none)\n");
    } else {
        text.push_str(&format!("  Filters: {}\n", output.filters.join(", ")));
    }

    let direction = if output.reversed { " (reversed)" } else { "" };
    text.push_str(&format!("  Sort:    {}{}\n", output.sort, direction));

    if !output.extra.is_empty() {
        text.push_str(&format!("  Extra:   {}\n", output.extra));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardset_collection_rs::CollectionDescription;

    fn parsed(path: &str) -> ParseResult {
        let (description, extra) = CollectionDescription::deserialize_with_extra(path);
        ParseResult { description, extra }
    }

    #[test]
    fn test_description_json() {
        let json = format_description_json(&parsed("unread/starred/sort/reverse/stars/x")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["path"], "main/starred/unread/sort/reverse/stars/");
        assert_eq!(value["set"], "main");
        assert_eq!(value["set_explicit"], false);
        assert_eq!(value["filters"], serde_json::json!(["unread", "starred"]));
        assert_eq!(value["sort"], "stars");
        assert_eq!(value["reversed"], true);
        assert_eq!(value["extra"], "x");
    }

    #[test]
    fn test_description_json_omits_empty_extra() {
        let json = format_description_json(&parsed("main/")).unwrap();
        assert!(!json.contains("extra"));
    }

    #[test]
    fn test_description_table() {
        let table = format_description_table(&parsed("everything/done/sort/recent/"), false);
        assert_eq!(
            table,
            "everything/done/sort/recent/\n  Set:     everything\n  Filters: done\n  Sort:    recent\n"
        );

        let table = format_description_table(&parsed(""), false);
        assert!(table.contains("Set:     main (default)"));
        assert!(table.contains("Filters: (none)"));
        assert!(table.contains("Sort:    default\n"));
    }
}
