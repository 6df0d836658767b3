use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{CallToolResult, Content, ErrorData, ServerCapabilities, ServerInfo},
    ServerHandler,
};
use rmcp_macros::{tool, tool_handler, tool_router};
use std::{future::Future, sync::Arc};

use crate::config::ServerConfig;
use crate::error::ThinkingResult;
use crate::handlers::ThoughtProcessor;
use crate::models::{Envelope, ThoughtPayload};
use crate::session::SessionState;
use crate::sink::{StderrSink, ThoughtSink};
use crate::visual::ThoughtRenderer;

/// Main service struct for the sequential thinking MCP server
#[derive(Clone)]
pub struct SequentialThinkingService {
    tool_router: ToolRouter<Self>,
    processor: Arc<ThoughtProcessor>,
    config: ServerConfig,
}

impl SequentialThinkingService {
    /// Create a service with a fresh, empty session
    pub fn new(config: ServerConfig) -> Self {
        let sink: Option<Arc<dyn ThoughtSink>> = if config.logging.thought_logging_enabled() {
            Some(Arc::new(StderrSink))
        } else {
            None
        };
        let processor = ThoughtProcessor::new(
            SessionState::shared(),
            ThoughtRenderer::new(config.logging.color),
            sink,
        );
        Self::with_processor(config, processor)
    }

    pub fn with_processor(config: ServerConfig, processor: ThoughtProcessor) -> Self {
        tracing::info!(
            "Initializing {} v{}",
            config.server.name,
            config.server.version
        );
        Self {
            tool_router: Self::tool_router(),
            processor: Arc::new(processor),
            config,
        }
    }

    pub fn processor(&self) -> &ThoughtProcessor {
        &self.processor
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[tool_router]
impl SequentialThinkingService {
    #[tool(
        name = "sequentialthinking",
        description = "A detailed tool for dynamic and reflective problem-solving through thoughts. Each call records one thinking step. Thoughts can build on, question, or revise earlier ones, branch into alternative lines of reasoning, and carry an optional confidence score with reasoning, uncertainty factors, calibration metrics, and a first-principles breakdown. Adjust totalThoughts as understanding changes and set nextThoughtNeeded to false only when a satisfactory answer has been reached."
    )]
    pub async fn sequential_thinking(
        &self,
        params: Parameters<ThoughtPayload>,
    ) -> Result<CallToolResult, ErrorData> {
        let envelope = self.processor.process_thought(&params.0.into_value());
        envelope_result(&envelope).map_err(ErrorData::from)
    }
}

/// Wrap an envelope as a single text item, flagged as an error for failures
pub fn envelope_result(envelope: &Envelope) -> ThinkingResult<CallToolResult> {
    let content = Content::text(envelope.to_json()?);
    if envelope.is_error() {
        Ok(CallToolResult::error(vec![content]))
    } else {
        Ok(CallToolResult::success(vec![content]))
    }
}

#[tool_handler]
impl ServerHandler for SequentialThinkingService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: rmcp::model::ProtocolVersion::V_2024_11_05,
            server_info: rmcp::model::Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
            },
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some(
                "Sequential thinking server: call sequentialthinking once per reasoning step"
                    .into(),
            ),
        }
    }
}
