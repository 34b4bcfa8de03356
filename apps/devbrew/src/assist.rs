use serde::{Deserialize, Serialize};

const ENHANCE_PROMPT: &str = "You are a professional software engineer editor. \
Take the following raw thought/post from a developer and format it nicely using \
markdown/code blocks if needed, but keep it brief. Make it sound like a hacker's \
field notes.";

const COFFEE_PROMPT: &str = "Tell me one short, interesting fact about coffee \
history or brewing, suitable for a programmer.";

const COFFEE_FACT_FALLBACK: &str = "Coffee is the fuel for algorithms.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Client for the generateContent-style text API. Both operations are
/// best effort: any failure falls back to a usable string and is never
/// surfaced as an error.
pub struct AssistClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl AssistClient {
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            model,
            api_key,
        }
    }

    /// Reformats a raw post draft. On any failure the original content
    /// comes back unchanged.
    pub async fn enhance_post(&self, content: &str) -> String {
        let prompt = format!("{ENHANCE_PROMPT} Content: \"{content}\"");
        match self.generate(&prompt, 0.7, Some(500)).await {
            Some(text) => text,
            None => content.to_string(),
        }
    }

    /// One short coffee fact, or the fixed fallback.
    pub async fn coffee_fact(&self) -> String {
        self.generate(COFFEE_PROMPT, 1.0, None)
            .await
            .unwrap_or_else(|| COFFEE_FACT_FALLBACK.to_string())
    }

    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_output_tokens: Option<u32>,
    ) -> Option<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!(component = "assist", "no API key configured, using fallback");
            return None;
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
            },
        };

        let res = match self.client.post(&url).json(&body).send().await {
            Ok(res) => res,
            Err(err) => {
                tracing::warn!(component = "assist", error = %err, "assist request failed");
                return None;
            }
        };

        if !res.status().is_success() {
            tracing::warn!(
                component = "assist",
                status = %res.status(),
                "assist request rejected"
            );
            return None;
        }

        let parsed: GenerateResponse = match res.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(component = "assist", error = %err, "assist response unreadable");
                return None;
            }
        };

        parsed
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
    }
}
