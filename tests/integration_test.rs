use sequential_thinking::{
    validate_thought, Envelope, SequentialThinkingService, ServerConfig, SessionState,
    ThoughtPayload, ThoughtProcessor, ThoughtRenderer,
};
use serde_json::{json, Value};

fn quiet_processor() -> ThoughtProcessor {
    ThoughtProcessor::new(SessionState::shared(), ThoughtRenderer::plain(), None)
}

fn thought(number: u32, total: u32) -> Value {
    json!({
        "thought": format!("Thought number {}", number),
        "thoughtNumber": number,
        "totalThoughts": total,
        "nextThoughtNeeded": number < total
    })
}

fn envelope_json(processor: &ThoughtProcessor, payload: &Value) -> Value {
    let envelope = processor.process_thought(payload);
    serde_json::from_str(&envelope.to_json().expect("envelope serializes")).expect("valid JSON")
}

#[test]
fn test_missing_required_field_is_named_and_not_recorded() {
    let cases = [
        ("thought", "Invalid thought: must be a string"),
        ("thoughtNumber", "Invalid thoughtNumber: must be a number"),
        ("totalThoughts", "Invalid totalThoughts: must be a number"),
        ("nextThoughtNeeded", "Invalid nextThoughtNeeded: must be a boolean"),
    ];

    for (field, expected) in cases {
        let processor = quiet_processor();
        let mut payload = thought(1, 3);
        payload.as_object_mut().unwrap().remove(field);

        let response = envelope_json(&processor, &payload);
        assert_eq!(response, json!({"error": expected, "status": "failed"}));

        let follow_up = envelope_json(&processor, &thought(1, 3));
        assert_eq!(follow_up["thoughtHistoryLength"], 1, "failed call for {} was recorded", field);
    }
}

#[test]
fn test_confidence_score_bounds_and_banding() {
    let processor = quiet_processor();

    for bad in [-0.1, 1.5] {
        let mut payload = thought(1, 1);
        payload["confidenceScore"] = json!(bad);
        let response = envelope_json(&processor, &payload);
        assert_eq!(
            response["error"],
            "Invalid confidenceScore: must be a number between 0.0 and 1.0"
        );
        assert_eq!(response["status"], "failed");
    }

    let expectations = [
        (0.0, "Very Low"),
        (0.4, "Low"),
        (0.6, "Medium"),
        (0.75, "Medium"),
        (0.79999, "Medium"),
        (0.8, "High"),
        (0.9, "Very High"),
        (1.0, "Very High"),
    ];
    for (score, level) in expectations {
        let mut payload = thought(1, 1);
        payload["confidenceScore"] = json!(score);
        let response = envelope_json(&processor, &payload);
        assert_eq!(response["confidenceScore"], json!(score));
        assert_eq!(response["confidenceLevel"], level, "score {}", score);
    }
}

#[test]
fn test_total_thoughts_adjusts_per_call_only() {
    let processor = quiet_processor();

    let first = envelope_json(&processor, &thought(5, 3));
    assert_eq!(first["thoughtNumber"], 5);
    assert_eq!(first["totalThoughts"], 5);

    let second = envelope_json(&processor, &thought(2, 3));
    assert_eq!(second["totalThoughts"], 3);
    assert_eq!(second["thoughtHistoryLength"], 2);
}

#[test]
fn test_branches_accumulate_in_first_seen_order() {
    let processor = quiet_processor();

    for number in 3..6 {
        let mut payload = thought(number, 6);
        payload["branchId"] = json!("A");
        payload["branchFromThought"] = json!(2);
        envelope_json(&processor, &payload);
    }
    let mut payload = thought(3, 6);
    payload["branchId"] = json!("B");
    payload["branchFromThought"] = json!(2);
    let response = envelope_json(&processor, &payload);

    assert_eq!(response["branches"], json!(["A", "B"]));
    assert_eq!(response["thoughtHistoryLength"], 4);

    let session = processor.session().lock();
    assert_eq!(session.branch_len("A"), 3);
    assert_eq!(session.branch_len("B"), 1);
}

#[test]
fn test_branch_id_without_origin_creates_no_branch() {
    let processor = quiet_processor();
    let mut payload = thought(2, 3);
    payload["branchId"] = json!("orphan");

    let response = envelope_json(&processor, &payload);
    assert_eq!(response["branches"], json!([]));
    assert!(processor.session().lock().branch("orphan").is_none());
}

#[test]
fn test_repeated_failure_is_idempotent() {
    let processor = quiet_processor();
    envelope_json(&processor, &thought(1, 2));

    let malformed = json!({"thought": "no numbers", "nextThoughtNeeded": true});
    let first = processor.process_thought(&malformed);
    let second = processor.process_thought(&malformed);

    assert!(first.is_error());
    assert_eq!(first, second);
    assert_eq!(processor.session().lock().history_len(), 1);
}

#[test]
fn test_success_envelope_optional_fields() {
    let processor = quiet_processor();

    let plain = envelope_json(&processor, &thought(1, 2));
    let keys: Vec<&str> = plain.as_object().unwrap().keys().map(String::as_str).collect();
    for absent in [
        "confidenceScore",
        "confidenceLevel",
        "uncertaintyCount",
        "calibrationData",
        "firstPrinciplesApplied",
    ] {
        assert!(!keys.contains(&absent), "{} should be omitted", absent);
    }

    let mut payload = thought(2, 2);
    payload["uncertaintyFactors"] = json!([]);
    payload["calibrationMetrics"] = json!({"overconfidencePattern": "maybe", "extra": [1, 2]});
    payload["firstPrinciples"] =
        json!({"fundamentalTruths": ["gravity"], "reasoningFromZero": true});
    let rich = envelope_json(&processor, &payload);

    assert_eq!(rich["uncertaintyCount"], 0);
    assert_eq!(rich["calibrationData"], json!({"overconfidencePattern": "maybe", "extra": [1, 2]}));
    assert_eq!(
        rich["firstPrinciplesApplied"],
        json!({"assumptionsCount": 0, "truthsCount": 1, "reasoningFromZero": true})
    );
    assert_eq!(rich["nextThoughtNeeded"], false);
}

#[test]
fn test_fully_populated_record_renders_a_closed_box() {
    let payload = json!({
        "thought": "Revisit the cache design\nwith the new latency numbers",
        "thoughtNumber": 4,
        "totalThoughts": 6,
        "nextThoughtNeeded": true,
        "isRevision": true,
        "revisesThought": 2,
        "branchFromThought": 1,
        "branchId": "cache-alt",
        "needsMoreThoughts": true,
        "confidenceScore": 0.62,
        "confidenceReasoning": "Benchmarks agree but the sample is small",
        "uncertaintyFactors": ["sample size", "cold starts"],
        "calibrationMetrics": {
            "previousAccuracy": 0.7,
            "overconfidencePattern": true,
            "uncertaintyAwareness": 0.8
        },
        "firstPrinciples": {
            "assumptionsIdentified": ["reads dominate"],
            "assumptionsChallenged": ["cache is always warm"],
            "fundamentalTruths": ["memory is faster than disk"],
            "analogiesAvoided": ["CDN behaviour"],
            "evidenceBase": ["p99 traces"],
            "reasoningFromZero": true,
            "reconstructedSolution": "write-through cache with TTL"
        }
    });
    let record = validate_thought(&payload).expect("payload is valid");
    let rendered = ThoughtRenderer::plain().render(&record);

    let widths: Vec<usize> = rendered.lines().map(|line| line.chars().count()).collect();
    assert!(!rendered.is_empty());
    assert!(widths.iter().all(|w| *w == widths[0]), "uneven rows:\n{}", rendered);
    assert!(rendered.starts_with('┌'));
    assert!(rendered.ends_with('┘'));
    assert!(rendered.contains("🔄 Revision 4/6 (revising thought 2) [Medium 62%]"));
    assert!(rendered.contains("write-through cache with TTL"));
    assert!(!rendered.contains("cache is always warm"));
}

#[test]
fn test_tool_schema_mirrors_thought_fields() {
    let schema = serde_json::to_value(schemars::schema_for!(ThoughtPayload)).unwrap();

    let mut required: Vec<&str> = schema["required"]
        .as_array()
        .expect("required list")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    required.sort_unstable();
    assert_eq!(required, vec!["nextThoughtNeeded", "thought", "thoughtNumber", "totalThoughts"]);

    let properties = schema["properties"].as_object().expect("properties");
    for field in [
        "isRevision",
        "revisesThought",
        "branchFromThought",
        "branchId",
        "needsMoreThoughts",
        "confidenceScore",
        "confidenceReasoning",
        "uncertaintyFactors",
        "calibrationMetrics",
        "firstPrinciples",
    ] {
        assert!(properties.contains_key(field), "schema is missing {}", field);
    }
}

#[tokio::test]
async fn test_service_returns_error_results_for_bad_input() {
    use rmcp::handler::server::tool::Parameters;

    let mut config = ServerConfig::default();
    config.logging.disable_thought_logging = "TRUE".to_string();
    let service = SequentialThinkingService::new(config);

    let payload: ThoughtPayload = serde_json::from_value(json!({"thought": "only text"})).unwrap();
    let result = service.sequential_thinking(Parameters(payload)).await.unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(service.processor().session().lock().history_len(), 0);

    let envelope = service.processor().process_thought(&thought(1, 1));
    assert!(matches!(envelope, Envelope::Success(ref s) if s.thought_history_length == 1));
}
