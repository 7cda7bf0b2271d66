//! Mock-based tests for the network tools: citation network assembly,
//! related-works resolution, collaborator analysis.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openalex_mcp::client::OpenAlexClient;
use openalex_mcp::config::Config;
use openalex_mcp::tools::{
    CitationNetworkTool, CollaboratorAnalysisTool, McpTool, RelatedWorksTool, ToolContext,
};

fn setup_test_context(mock_server: &MockServer) -> ToolContext {
    let config = Config::for_testing(&mock_server.uri());
    let client = OpenAlexClient::new(config).unwrap();
    ToolContext::new(Arc::new(client))
}

fn work_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": format!("https://openalex.org/{id}"),
        "display_name": title,
        "publication_year": 2022,
        "cited_by_count": 10
    })
}

#[tokio::test]
async fn test_citation_network_combines_citing_and_reference_ids() {
    let mock_server = MockServer::start().await;

    let mut focal = work_json("W1", "Focal Work");
    focal["referenced_works"] = json!([
        "https://openalex.org/W100",
        "https://openalex.org/W101",
        "https://openalex.org/W102"
    ]);

    Mock::given(method("GET"))
        .and(path("/works/W1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(focal))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("filter", "cites:W1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"count": 2},
            "results": [work_json("W2", "Citing One"), work_json("W3", "Citing Two")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let tool = CitationNetworkTool;

    let result =
        tool.execute(&ctx, json!({"work_id": "W1", "max_references": 2})).await.unwrap();
    let payload: serde_json::Value = serde_json::from_str(&result).unwrap();

    assert_eq!(payload["work"]["title"], "Focal Work");
    assert_eq!(payload["citing_works"]["results"].as_array().unwrap().len(), 2);
    // Reference IDs come back capped and unresolved.
    assert_eq!(payload["referenced_works"].as_array().unwrap().len(), 2);
    assert_eq!(payload["referenced_works_total"], 3);
}

#[tokio::test]
async fn test_related_works_skips_missing_ids() {
    let mock_server = MockServer::start().await;

    let mut focal = work_json("W1", "Focal Work");
    focal["related_works"] = json!([
        "https://openalex.org/W200",
        "https://openalex.org/W201",
        "https://openalex.org/W202"
    ]);

    Mock::given(method("GET"))
        .and(path("/works/W1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(focal))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works/W200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(work_json("W200", "Related One")))
        .mount(&mock_server)
        .await;

    // W201 vanished upstream; the batch must survive.
    Mock::given(method("GET"))
        .and(path("/works/W201"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works/W202"))
        .respond_with(ResponseTemplate::new(200).set_body_json(work_json("W202", "Related Two")))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let tool = RelatedWorksTool;

    let result = tool.execute(&ctx, json!({"work_id": "W1"})).await.unwrap();
    let payload: serde_json::Value = serde_json::from_str(&result).unwrap();

    let related = payload["related_works"].as_array().unwrap();
    assert_eq!(related.len(), 2);
    assert_eq!(payload["related_works_total"], 3);
}

#[tokio::test]
async fn test_related_works_respects_limit() {
    let mock_server = MockServer::start().await;

    let mut focal = work_json("W1", "Focal Work");
    focal["related_works"] =
        json!((0..20).map(|i| format!("https://openalex.org/W3{i:02}")).collect::<Vec<_>>());

    Mock::given(method("GET"))
        .and(path("/works/W1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(focal))
        .mount(&mock_server)
        .await;

    for i in 0..3 {
        Mock::given(method("GET"))
            .and(path(format!("/works/W3{i:02}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(work_json(&format!("W3{i:02}"), "Related")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let ctx = setup_test_context(&mock_server);
    let tool = RelatedWorksTool;

    let result = tool.execute(&ctx, json!({"work_id": "W1", "limit": 3})).await.unwrap();
    let payload: serde_json::Value = serde_json::from_str(&result).unwrap();

    assert_eq!(payload["related_works"].as_array().unwrap().len(), 3);
    // Focal fetch plus exactly three resolutions.
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_collaborators_are_tallied_and_filtered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authors/A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "https://openalex.org/A1",
            "display_name": "Focal Author"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let work_with = |id: &str, coauthors: Vec<(&str, &str)>| {
        let mut authorships = vec![json!({
            "author": {"id": "https://openalex.org/A1", "display_name": "Focal Author"}
        })];
        for (aid, name) in coauthors {
            authorships.push(json!({
                "author": {"id": format!("https://openalex.org/{aid}"), "display_name": name}
            }));
        }
        json!({
            "id": format!("https://openalex.org/{id}"),
            "display_name": "Shared Work",
            "authorships": authorships
        })
    };

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("filter", "author.id:A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"count": 3},
            "results": [
                work_with("W1", vec![("A2", "Frequent Friend"), ("A3", "One Timer")]),
                work_with("W2", vec![("A2", "Frequent Friend")]),
                work_with("W3", vec![("A2", "Frequent Friend")])
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let tool = CollaboratorAnalysisTool;

    let result = tool
        .execute(&ctx, json!({"author_id": "A1", "min_collaborations": 2}))
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_str(&result).unwrap();

    let collaborators = payload["collaborators"].as_array().unwrap();
    // A3 falls under the threshold; the focal author is never their own collaborator.
    assert_eq!(collaborators.len(), 1);
    assert_eq!(collaborators[0]["id"], "A2");
    assert_eq!(collaborators[0]["shared_works"], 3);
    assert_eq!(payload["works_analyzed"], 3);
}
