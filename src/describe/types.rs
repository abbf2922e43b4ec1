use serde::{Deserialize, Serialize};

/// Action discriminator on the collaborator message envelope.
pub const GENERATE_ACTION: &str = "generatePRDescription";

/// Everything the collaborator needs to draft a description. Constructed
/// fresh per click, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub diff_data: String,
    pub pr_title: String,
    pub branch_info: String,
}

/// Wire envelope for collaborator messages:
/// `{ "action": "generatePRDescription", "data": { … } }`.
#[derive(Debug, Serialize)]
pub struct MessageEnvelope<'a> {
    pub action: &'a str,
    pub data: &'a GenerationRequest,
}

impl<'a> MessageEnvelope<'a> {
    pub fn generate(data: &'a GenerationRequest) -> Self {
        Self {
            action: GENERATE_ACTION,
            data,
        }
    }
}

/// Collaborator response. A missing or empty description signals the
/// fallback-template path; it is not an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    #[serde(default)]
    pub generated_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            diff_data: "\n## src/lib.rs\n\n+ added\n".to_string(),
            pr_title: "Add thing".to_string(),
            branch_info: "main...feature".to_string(),
        }
    }

    #[test]
    fn test_envelope_wire_shape() {
        let req = request();
        let value = serde_json::to_value(MessageEnvelope::generate(&req)).unwrap();
        assert_eq!(value["action"], "generatePRDescription");
        assert_eq!(value["data"]["diffData"], req.diff_data);
        assert_eq!(value["data"]["prTitle"], "Add thing");
        assert_eq!(value["data"]["branchInfo"], "main...feature");
    }

    #[test]
    fn test_response_with_description() {
        let response: GenerationResponse =
            serde_json::from_str(r#"{"generatedDescription": "X"}"#).unwrap();
        assert_eq!(response.generated_description.as_deref(), Some("X"));
    }

    #[test]
    fn test_empty_response_is_valid() {
        let response: GenerationResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.generated_description, None);
    }
}
