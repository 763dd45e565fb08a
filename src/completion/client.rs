use crate::completion::ChatClientConfig;
use crate::tool::ToolSchema;
use crate::types::{CompletionError, Message, Role, ToolCall};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionResponseMessage, ChatCompletionTool, ChatCompletionToolChoiceOption,
        ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionCall, FunctionObject,
    },
    Client as OpenAIClient,
};
use async_trait::async_trait;
use tracing::debug;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Per-request options: which model, how hot, and which tools the model may
/// request to have called.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: Option<f32>,
    pub tools: Vec<ToolSchema>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            tools: Vec::new(),
        }
    }
}

impl CompletionOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolSchema>) -> Self {
        self.tools = tools;
        self
    }
}

/// The boundary to the hosted completion service: an ordered message history
/// plus declared tool signatures in, exactly one new message out. The reply
/// may be natural language or a structured tool-call request.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<Message, CompletionError>;
}

/// `ChatClient` backed by the OpenAI chat-completions API.
pub struct ChatClientImpl {
    client: OpenAIClient<OpenAIConfig>,
}

impl ChatClientImpl {
    pub fn new(config: ChatClientConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);
        if let Some(api_base) = config.api_base {
            openai_config = openai_config.with_api_base(api_base);
        }
        Self {
            client: OpenAIClient::with_config(openai_config),
        }
    }
}

#[async_trait]
impl ChatClient for ChatClientImpl {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<Message, CompletionError> {
        let request_messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&options.model).messages(request_messages);
        if let Some(temperature) = options.temperature {
            builder.temperature(temperature);
        }
        if !options.tools.is_empty() {
            builder
                .tools(options.tools.iter().map(to_completion_tool).collect::<Vec<_>>())
                .tool_choice(ChatCompletionToolChoiceOption::Auto);
        }
        let request = builder.build()?;

        debug!(
            model = %options.model,
            messages = messages.len(),
            tools = options.tools.len(),
            "requesting chat completion"
        );

        let response = self.client.chat().create(request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::MalformedResponse("no choices returned".to_string()))?;

        from_response_message(choice.message)
    }
}

fn to_completion_tool(schema: &ToolSchema) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: schema.name.clone(),
            description: Some(schema.description.clone()),
            parameters: Some(schema.parameters.clone()),
            strict: None,
        },
    }
}

fn to_request_message(message: &Message) -> Result<ChatCompletionRequestMessage, CompletionError> {
    match message.role {
        Role::System => Ok(ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.clone())
            .build()?
            .into()),
        Role::Human => {
            let mut builder = ChatCompletionRequestUserMessageArgs::default();
            builder.content(message.content.clone());
            if let Some(name) = &message.name {
                builder.name(name.clone());
            }
            Ok(builder.build()?.into())
        }
        Role::Ai => {
            let mut builder = ChatCompletionRequestAssistantMessageArgs::default();
            if !message.content.is_empty() {
                builder.content(message.content.clone());
            }
            if let Some(name) = &message.name {
                builder.name(name.clone());
            }
            if message.has_tool_calls() {
                builder.tool_calls(
                    message
                        .tool_calls
                        .iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id.clone(),
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name.clone(),
                                arguments: call.arguments.to_string(),
                            },
                        })
                        .collect::<Vec<_>>(),
                );
            }
            Ok(builder.build()?.into())
        }
        Role::Tool => {
            let tool_call_id = message.tool_call_id.clone().ok_or_else(|| {
                CompletionError::MalformedResponse(
                    "tool message is missing its tool_call_id".to_string(),
                )
            })?;
            Ok(ChatCompletionRequestToolMessageArgs::default()
                .content(message.content.clone())
                .tool_call_id(tool_call_id)
                .build()?
                .into())
        }
    }
}

fn from_response_message(
    message: ChatCompletionResponseMessage,
) -> Result<Message, CompletionError> {
    let mut reply = Message::ai(message.content.unwrap_or_default());
    if let Some(tool_calls) = message.tool_calls {
        let tool_calls = tool_calls
            .into_iter()
            .map(|call| {
                let arguments = serde_json::from_str(&call.function.arguments).map_err(|e| {
                    CompletionError::MalformedResponse(format!(
                        "tool call {} has invalid arguments: {}",
                        call.function.name, e
                    ))
                })?;
                Ok(ToolCall {
                    id: call.id,
                    name: call.function.name,
                    arguments,
                })
            })
            .collect::<Result<Vec<_>, CompletionError>>()?;
        reply = reply.with_tool_calls(tool_calls);
    }
    Ok(reply)
}
