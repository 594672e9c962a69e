//! Agent runner with tool calling loop.

use super::{AgentExecutor, AgentOutput, ToolCallRecord};
use crate::config::LlmSettings;
use crate::error::{ResearchError, Result};
use crate::openai::create_client;
use crate::research::{ResearchPrompt, Role};
use crate::tools::ToolSet;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, info};

/// Agent that drives an OpenAI-compatible chat model through tool calls.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    max_iterations: usize,
}

impl Agent {
    /// Create a new agent from model settings.
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            model: settings.model.clone(),
            max_iterations: settings.max_iterations,
        })
    }

    /// Override the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AgentExecutor for Agent {
    async fn execute(&self, prompt: &ResearchPrompt, tools: &ToolSet) -> Result<AgentOutput> {
        let mut messages = initial_messages(prompt)?;
        let definitions = tools.definitions();

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(ResearchError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let mut request = CreateChatCompletionRequestArgs::default();
            request.model(&self.model).messages(messages.clone());
            if !tools.is_empty() {
                request.tools(definitions.clone());
            }
            let request = request
                .build()
                .map_err(|e| ResearchError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| ResearchError::Provider(e.to_string()))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| ResearchError::Agent("No response from model".to_string()))?;

            let tool_calls = match &choice.message.tool_calls {
                Some(calls) if !calls.is_empty() => calls,
                _ => {
                    return Ok(build_output(
                        choice.message.content.clone(),
                        tool_calls_made,
                        iterations,
                    ))
                }
            };

            // Scratchpad: assistant tool request followed by each tool result
            let mut assistant = ChatCompletionRequestAssistantMessageArgs::default();
            assistant.tool_calls(tool_calls.clone());
            if let Some(content) = choice.message.content.as_ref().filter(|c| !c.is_empty()) {
                assistant.content(content.clone());
            }
            messages.push(
                assistant
                    .build()
                    .map_err(|e| ResearchError::Agent(e.to_string()))?
                    .into(),
            );

            for tool_call in tool_calls {
                let record = execute_tool_call(tools, tool_call).await;

                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(&tool_call.id)
                    .content(record.result.clone())
                    .build()
                    .map_err(|e| ResearchError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());

                tool_calls_made.push(record);
            }
        }
    }
}

/// System message, prior turns, then the human query.
fn initial_messages(prompt: &ResearchPrompt) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut messages: Vec<ChatCompletionRequestMessage> = vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(prompt.system.clone())
            .build()
            .map_err(|e| ResearchError::Agent(e.to_string()))?
            .into(),
    ];

    for turn in &prompt.chat_history {
        let message: ChatCompletionRequestMessage = match turn.role {
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(turn.content.clone())
                .build()
                .map_err(|e| ResearchError::Agent(e.to_string()))?
                .into(),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(turn.content.clone())
                .build()
                .map_err(|e| ResearchError::Agent(e.to_string()))?
                .into(),
        };
        messages.push(message);
    }

    messages.push(
        ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.query.clone())
            .build()
            .map_err(|e| ResearchError::Agent(e.to_string()))?
            .into(),
    );

    Ok(messages)
}

/// Execute a single tool call and return a record of it.
///
/// Tool failures are reported back to the model as the result text.
async fn execute_tool_call(tools: &ToolSet, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
    let name = &tool_call.function.name;
    let arguments = &tool_call.function.arguments;

    info!("Agent calling tool: {} with args: {}", name, arguments);

    let result = match tools.call(name, arguments).await {
        Ok(output) => output,
        Err(e) => format!("Tool error: {}", e),
    };

    ToolCallRecord {
        name: name.clone(),
        arguments: arguments.clone(),
        result,
    }
}

/// Build the final agent output.
fn build_output(
    content: Option<String>,
    tool_calls: Vec<ToolCallRecord>,
    iterations: usize,
) -> AgentOutput {
    let segments = content.into_iter().filter(|c| !c.trim().is_empty()).collect();

    AgentOutput {
        segments,
        tool_calls,
        iterations,
    }
}
