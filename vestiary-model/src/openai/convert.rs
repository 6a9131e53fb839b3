//! Wire types for the OpenAI-compatible chat completions endpoint.
//!
//! Requests carry the group's images as `image_url` content parts holding
//! `data:` URIs; responses only need the first choice's message text and the
//! token usage block.

use serde::{Deserialize, Serialize};
use vestiary_core::{DescribeRequest, DescribeResponse, Result, UsageMetadata, VestiaryError};

/// Outgoing chat message.
#[derive(Debug, Clone, Serialize)]
pub struct RequestMessage {
    pub role: String,
    pub content: MessageContent,
}

/// Message content: plain text for the system role, an array of parts for
/// the multi-image user message.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<RequestMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Chat completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Build the message list for one describe request: the optional system
/// framing, then a single user message with the instruction and every image.
pub fn request_to_messages(request: &DescribeRequest) -> Vec<RequestMessage> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &request.system {
        messages.push(RequestMessage {
            role: "system".to_string(),
            content: MessageContent::Text(system.clone()),
        });
    }

    let mut parts = Vec::with_capacity(request.images.len() + 1);
    parts.push(ContentPart::Text { text: request.instruction.clone() });
    for image in &request.images {
        parts.push(ContentPart::ImageUrl {
            image_url: ImageUrl { url: image.data_uri(), detail: None },
        });
    }
    messages
        .push(RequestMessage { role: "user".to_string(), content: MessageContent::Parts(parts) });

    messages
}

/// Extract the description from a chat completion response.
pub fn response_to_describe(response: ChatCompletionResponse) -> Result<DescribeResponse> {
    let usage = response.usage.map(|u| UsageMetadata {
        prompt_token_count: u.prompt_tokens as i32,
        completion_token_count: u.completion_tokens as i32,
        total_token_count: u.total_tokens as i32,
    });

    let description = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default();

    if description.trim().is_empty() {
        return Err(VestiaryError::Service("model returned an empty description".to_string()));
    }

    Ok(DescribeResponse { description, usage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestiary_core::EncodedImage;

    fn sample_request() -> DescribeRequest {
        let images = vec![
            EncodedImage { mime_type: "image/png".to_string(), data_base64: "QQ==".to_string() },
            EncodedImage { mime_type: "image/png".to_string(), data_base64: "Qg==".to_string() },
        ];
        DescribeRequest::new("describe the item", images).with_system("fashion assistant")
    }

    #[test]
    fn test_messages_include_system_then_user() {
        let messages = request_to_messages(&sample_request());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_user_message_carries_one_part_per_image() {
        let messages = request_to_messages(&sample_request());
        let MessageContent::Parts(parts) = &messages[1].content else {
            panic!("user content should be an array of parts");
        };
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], ContentPart::Text { text } if text == "describe the item"));
        assert!(matches!(
            &parts[1],
            ContentPart::ImageUrl { image_url } if image_url.url == "data:image/png;base64,QQ=="
        ));
    }

    #[test]
    fn test_no_system_message_when_absent() {
        let request = DescribeRequest::new("describe", vec![]);
        let messages = request_to_messages(&request);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
    }

    #[test]
    fn test_request_serialization_shape() {
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: request_to_messages(&sample_request()),
            temperature: None,
            max_tokens: Some(150),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/png;base64,QQ=="
        );
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_response_extraction() {
        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "A red shirt."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        }))
        .unwrap();

        let describe = response_to_describe(response).unwrap();
        assert_eq!(describe.description, "A red shirt.");
        assert_eq!(describe.usage.unwrap().total_token_count, 14);
    }

    #[test]
    fn test_empty_content_is_a_service_error() {
        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": ""}}]
        }))
        .unwrap();
        let err = response_to_describe(response).unwrap_err();
        assert!(matches!(err, VestiaryError::Service(_)));
    }

    #[test]
    fn test_missing_choices_is_a_service_error() {
        let response: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({"choices": []})).unwrap();
        assert!(response_to_describe(response).is_err());
    }
}
