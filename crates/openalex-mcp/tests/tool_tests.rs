//! Contract tests for the registered tool table: names, schemas, descriptions.

use openalex_mcp::tools::register_all_tools;

#[test]
fn test_expected_tools_are_registered() {
    let tools = register_all_tools();
    let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();

    for expected in [
        "search_works",
        "search_entities",
        "autocomplete",
        "find_similar_works",
        "get_work",
        "get_author",
        "get_entity",
        "search_authors",
        "get_citation_network",
        "get_related_works",
        "analyze_collaborators",
        "find_influential_works",
        "compare_topics",
    ] {
        assert!(names.contains(&expected), "missing tool: {expected}");
    }

    assert_eq!(tools.len(), 13);
}

#[test]
fn test_tool_names_are_unique() {
    let tools = register_all_tools();
    let mut names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), tools.len());
}

#[test]
fn test_every_schema_is_an_object_schema() {
    for tool in register_all_tools() {
        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object", "tool {} schema is not an object", tool.name());
        assert!(
            schema["properties"].is_object(),
            "tool {} schema has no properties",
            tool.name()
        );
    }
}

#[test]
fn test_required_fields_exist_in_properties() {
    for tool in register_all_tools() {
        let schema = tool.input_schema();
        let Some(required) = schema.get("required").and_then(|r| r.as_array()) else {
            continue;
        };

        for field in required {
            let field = field.as_str().unwrap();
            assert!(
                schema["properties"].get(field).is_some(),
                "tool {} requires '{field}' but does not declare it",
                tool.name()
            );
        }
    }
}

#[test]
fn test_descriptions_are_nonempty() {
    for tool in register_all_tools() {
        assert!(!tool.description().trim().is_empty(), "tool {} lacks a description", tool.name());
    }
}
