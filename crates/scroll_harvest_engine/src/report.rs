use scroll_harvest_core::Item;

/// Pretty JSON rendering of the accumulated items, two-space indented.
pub fn format_results(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_results_render_as_empty_array() {
        assert_eq!(format_results(&[]).unwrap(), "[]");
    }

    #[test]
    fn items_render_in_order_with_field_names() {
        let items = vec![Item::new("/a", "Alpha"), Item::new("/b", "Beta")];
        let rendered = format_results(&items).unwrap();
        assert_eq!(
            rendered,
            "[\n  {\n    \"href\": \"/a\",\n    \"codename\": \"Alpha\"\n  },\n  {\n    \"href\": \"/b\",\n    \"codename\": \"Beta\"\n  }\n]"
        );
    }
}
