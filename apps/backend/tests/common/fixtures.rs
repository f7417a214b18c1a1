//! Request bodies shared by the API tests.

use serde_json::{json, Value};

pub fn start_request(level: &str) -> Value {
    json!({ "level": level })
}

pub fn score_request(reference: &str, candidate: &str) -> Value {
    json!({ "reference": reference, "candidate": candidate })
}

pub fn diff_request(candidate: &str, reference: &str, granularity: &str, coalesce: bool) -> Value {
    json!({
        "candidate": candidate,
        "reference": reference,
        "granularity": granularity,
        "coalesce": coalesce,
    })
}

pub fn check_request(input: &str) -> Value {
    json!({ "input": input })
}

pub fn attempt_request(activity: &str, correct: bool, points: u32) -> Value {
    json!({ "activity": activity, "correct": correct, "points": points })
}

pub fn phonetic_request(phoneme: Option<&str>, word: Option<&str>) -> Value {
    json!({ "phoneme": phoneme, "word": word })
}

/// Flatten a diff response into `(text, diff_type)` pairs.
pub fn segments(body: &Value) -> Vec<(String, String)> {
    body.as_array()
        .expect("diff should be an array")
        .iter()
        .map(|segment| {
            (
                segment["text"].as_str().unwrap_or_default().to_string(),
                segment["diff_type"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}
