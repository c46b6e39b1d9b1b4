use crate::{
    core::{model::chunk::Chunk, parser::ChunkParser},
    error::ChunkviewError,
};
use serde::Deserialize;
use tracing::debug;

/// The route of the analysis tool on the vision agent API.
const ANALYSIS_ROUTE: &str = "/v1/tools/agentic-document-analysis";

/// Client for the vision agent document analysis API.
///
/// Sends the document as a multipart upload and maps the response
/// directly onto the [Chunk] model. The call blocks the request for
/// its full duration, there is no retry.
pub struct VisionParser {
    endpoint: String,
    key: String,
    client: reqwest::Client,
}

impl VisionParser {
    pub fn new(endpoint: String, api_key: &str) -> Self {
        tracing::info!("Initializing vision agent client at {endpoint}");
        Self {
            endpoint,
            key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl ChunkParser for VisionParser {
    fn id(&self) -> &'static str {
        "vision"
    }

    async fn parse(&self, name: &str, file: &[u8]) -> Result<Vec<Chunk>, ChunkviewError> {
        let part = reqwest::multipart::Part::bytes(file.to_vec()).file_name(name.to_string());
        let form = reqwest::multipart::Form::new().part("pdf", part);

        let response = match self
            .client
            .post(format!("{}{ANALYSIS_ROUTE}", self.endpoint))
            .header("Authorization", format!("Basic {}", self.key))
            .multipart(form)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error in analysis request: {e}");
                return Err(ChunkviewError::Reqwest(e));
            }
        };

        if response.status() != 200 {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Analysis request failed with status {status}: {body}");
            return Err(ChunkviewError::Analysis(format!("status {status}; {body}")));
        }

        let response: AnalysisResponse = response.json().await?;

        debug!("Analysis of '{name}' returned {} chunk(s)", response.data.chunks.len());

        Ok(response.data.chunks)
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    data: AnalysisData,
}

#[derive(Debug, Deserialize)]
struct AnalysisData {
    chunks: Vec<Chunk>,
}
