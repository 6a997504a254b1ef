use super::{Field, NodeTemplate, Out, OutputType, text_out};
use crate::registry::NodeCategory::{Ai, Control, Human, Logging, Python, Security};
use serde_json::json;

pub(super) fn ai_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("ai.llm_prompt", Ai, "LLM Prompt", "Send a prompt to a language model")
            .config(vec![
                Field::select("provider", "Provider", &["openai", "anthropic", "azure", "ollama"])
                    .default_value("openai"),
                Field::text("model", "Model"),
                Field::textarea("prompt", "Prompt").required().expressions(),
                Field::number("temperature", "Temperature").default_value(0.7),
                Field::text("baseUrl", "Base URL").visible_when("provider", "ollama"),
            ])
            .outputs(vec![
                text_out("response", "Model response"),
                Out::new("tokens", OutputType::Number, "Tokens used"),
            ]),
        NodeTemplate::new("ai.agent", Ai, "AI Agent", "Hold a tool-using conversation")
            .config(vec![
                Field::text("model", "Model Node").placeholder("id of an ai.model node"),
                Field::textarea("systemPrompt", "System Prompt"),
                Field::textarea("message", "Message").required().expressions(),
                Field::select("memory", "Memory", &["none", "store", "retrieve", "both"])
                    .default_value("none"),
                Field::text("embeddings", "Embeddings Node")
                    .visible_when("memory", json!(["retrieve", "both"])),
                Field::number("maxIterations", "Max Iterations").default_value(5),
            ])
            .outputs(vec![
                text_out("response", "Final agent answer"),
                Out::new("toolCalls", OutputType::Array, "Tools the agent called"),
                Out::new("iterations", OutputType::Number, "Reasoning steps taken"),
            ]),
        NodeTemplate::new("ai.model", Ai, "AI Model", "Model settings used by agents")
            .config(vec![
                Field::select(
                    "provider",
                    "Provider",
                    &[
                        "openai",
                        "anthropic",
                        "azure",
                        "aws",
                        "ollama",
                        "groq",
                        "mistral",
                        "cohere",
                    ],
                )
                .default_value("openai"),
                Field::text("model", "Model"),
                Field::password("apiKey", "API Key").expressions(),
                Field::text("baseUrl", "Base URL")
                    .visible_when("provider", json!(["azure", "ollama"])),
                Field::text("apiVersion", "API Version").visible_when("provider", "azure"),
                Field::text("region", "Region").visible_when("provider", "aws"),
                Field::number("temperature", "Temperature").default_value(0.7),
            ]),
        NodeTemplate::new("ai.embeddings", Ai, "Embeddings", "Embedding settings for agent memory")
            .config(vec![
                Field::select("provider", "Provider", &["openai", "azure", "ollama", "cohere"])
                    .default_value("openai"),
                Field::text("model", "Model"),
                Field::password("apiKey", "API Key").expressions(),
                Field::text("baseUrl", "Base URL")
                    .visible_when("provider", json!(["azure", "ollama"])),
            ]),
        NodeTemplate::new("ai.extract_data", Ai, "Extract Data", "Extract structured fields")
            .config(vec![
                Field::textarea("text", "Text").required().expressions(),
                Field::json("schema", "Output Schema").required(),
            ])
            .outputs(vec![Out::new("data", OutputType::Object, "Extracted fields")]),
        NodeTemplate::new("ai.summarize", Ai, "Summarize", "Condense text")
            .config(vec![
                Field::textarea("text", "Text").required().expressions(),
                Field::number("maxWords", "Max Words").default_value(150),
            ])
            .outputs(vec![text_out("summary", "Summary")]),
        NodeTemplate::new("ai.classify", Ai, "Classify", "Assign text to one of several labels")
            .config(vec![
                Field::textarea("text", "Text").required().expressions(),
                Field::text("categories", "Categories")
                    .required()
                    .placeholder("invoice, receipt"),
            ])
            .outputs(vec![
                text_out("category", "Chosen label"),
                Out::new("confidence", OutputType::Number, "Confidence, 0-1"),
            ]),
        NodeTemplate::new("ai.translate", Ai, "Translate", "Translate text")
            .config(vec![
                Field::textarea("text", "Text").required().expressions(),
                Field::text("targetLanguage", "Target Language").required(),
            ])
            .outputs(vec![text_out("translation", "Translated text")]),
    ]
}

pub(super) fn python_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("python.execute", Python, "Python Script", "Run a Python snippet")
            .config(vec![
                Field::textarea("code", "Code").required(),
                Field::json("inputs", "Inputs"),
            ])
            .outputs(vec![
                Out::new("result", OutputType::Any, "Value of `result` after the script"),
                text_out("stdout", "Captured standard output"),
            ]),
        NodeTemplate::new("python.eval", Python, "Evaluate", "Evaluate a Python expression")
            .config(vec![Field::text("expression", "Expression").required().expressions()])
            .outputs(vec![Out::new("result", OutputType::Any, "Expression value")]),
    ]
}

pub(super) fn control_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("control.if", Control, "If", "Run the nested branch when true")
            .config(vec![Field::text("condition", "Condition").required().expressions()])
            .outputs(vec![Out::new("result", OutputType::Boolean, "Evaluated condition")]),
        NodeTemplate::new("control.loop", Control, "For Each", "Run nested nodes once per item")
            .config(vec![
                Field::text("items", "Items").required().expressions(),
                Field::text("itemVariable", "Item Variable").default_value("item"),
            ])
            .outputs(vec![
                Out::new("item", OutputType::Any, "Current item"),
                Out::new("index", OutputType::Number, "Current index"),
                Out::new("count", OutputType::Number, "Total items"),
            ]),
        NodeTemplate::new("control.while", Control, "While", "Repeat nested nodes while true")
            .config(vec![
                Field::text("condition", "Condition").required().expressions(),
                Field::number("maxIterations", "Max Iterations").default_value(100),
            ])
            .outputs(vec![Out::new("iteration", OutputType::Number, "Current iteration")]),
        NodeTemplate::new("control.try_catch", Control, "Try / Catch", "Catch nested errors")
            .config(vec![Field::number("retries", "Retries").default_value(0)])
            .outputs(vec![
                text_out("error", "Caught error message"),
                text_out("errorNode", "Id of the failing node"),
            ]),
        NodeTemplate::new("control.parallel", Control, "Parallel", "Run nested branches together")
            .config(vec![
                Field::select("waitFor", "Wait For", &["all", "any"]).default_value("all"),
            ])
            .outputs(vec![Out::new("results", OutputType::Array, "Results per branch")]),
        NodeTemplate::new("control.wait", Control, "Wait", "Pause execution").config(vec![
            Field::number("seconds", "Seconds")
                .required()
                .default_value(1)
                .expressions(),
        ]),
        NodeTemplate::new("control.set_variable", Control, "Set Variable", "Store a value")
            .config(vec![
                Field::text("name", "Name").required(),
                Field::text("value", "Value").expressions(),
            ])
            .outputs(vec![Out::new("value", OutputType::Any, "Stored value")]),
        NodeTemplate::new("control.stop", Control, "Stop", "End the run").config(vec![
            Field::select("status", "Status", &["success", "failure"]).default_value("success"),
            Field::text("message", "Message")
                .expressions()
                .visible_when("status", "failure"),
        ]),
    ]
}

pub(super) fn logging_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("logging.log", Logging, "Log", "Write a message to the run log")
            .config(vec![
                Field::textarea("message", "Message").required().expressions(),
                Field::select("level", "Level", &["DEBUG", "INFO", "WARN", "ERROR"])
                    .default_value("INFO"),
            ]),
        NodeTemplate::new("logging.screenshot", Logging, "Log Screenshot", "Attach a screenshot")
            .config(vec![Field::text("name", "Name").expressions()]),
        NodeTemplate::new("logging.notification", Logging, "Notify", "Send a run notification")
            .config(vec![
                Field::select("channel", "Channel", &["email", "slack", "teams"])
                    .default_value("email"),
                Field::text("recipient", "Recipient").required().expressions(),
                Field::textarea("message", "Message").required().expressions(),
            ]),
    ]
}

pub(super) fn security_templates() -> Vec<NodeTemplate> {
    let vault = || {
        Field::select("provider", "Vault", &["local", "azure", "aws", "hashicorp"])
            .default_value("local")
    };
    vec![
        NodeTemplate::new("security.get_secret", Security, "Get Secret", "Read a vault secret")
            .config(vec![Field::text("name", "Secret Name").required(), vault()])
            .outputs(vec![text_out("value", "Secret value")]),
        NodeTemplate::new("security.set_secret", Security, "Set Secret", "Store a vault secret")
            .config(vec![
                Field::text("name", "Secret Name").required(),
                Field::password("value", "Value").required().expressions(),
                vault(),
            ]),
        NodeTemplate::new("security.mask_data", Security, "Mask Data", "Hide sensitive values")
            .config(vec![
                Field::text("text", "Text").required().expressions(),
                Field::text("mask", "Mask Character").default_value("*"),
            ])
            .outputs(vec![text_out("masked", "Masked text")]),
    ]
}

pub(super) fn human_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("human.approval", Human, "Approval", "Wait for a person to approve")
            .config(vec![
                Field::text("title", "Title").required().expressions(),
                Field::textarea("details", "Details").expressions(),
                Field::text("assignee", "Assignee"),
                Field::number("timeoutHours", "Timeout (h)").default_value(24),
                Field::validation_builder("rules", "Approval Rules"),
            ])
            .outputs(vec![
                Out::new("approved", OutputType::Boolean, "Whether the request was approved"),
                text_out("approver", "Who decided"),
                text_out("comment", "Reviewer comment"),
            ]),
        NodeTemplate::new("human.input", Human, "Ask For Input", "Wait for a person to answer")
            .config(vec![
                Field::text("title", "Title").required().expressions(),
                Field::form_builder("fields", "Fields").required(),
                Field::text("assignee", "Assignee"),
            ])
            .outputs(vec![Out::new("values", OutputType::Object, "Submitted values")]),
    ]
}
