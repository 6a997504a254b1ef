use super::{Field, NodeTemplate, Out, OutputType, text_out};
use crate::registry::NodeCategory::Trigger;

pub(super) fn trigger_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("trigger.manual", Trigger, "Manual Trigger", "Start the bot by hand")
            .outputs(vec![
                text_out("startedAt", "ISO-8601 start time").example("2024-01-01T09:00:00Z"),
            ]),
        NodeTemplate::new("trigger.schedule", Trigger, "Schedule", "Run on a cron schedule")
            .config(vec![
                Field::text("cron", "Cron Expression")
                    .required()
                    .default_value("0 9 * * 1-5")
                    .placeholder("0 9 * * 1-5"),
                Field::text("timezone", "Timezone").default_value("UTC"),
            ])
            .outputs(vec![
                text_out("scheduledTime", "Planned fire time"),
                text_out("actualTime", "Actual fire time"),
            ]),
        NodeTemplate::new(
            "trigger.webhook",
            Trigger,
            "Webhook",
            "Run when an HTTP request arrives",
        )
        .config(vec![
            Field::text("path", "Path").required().placeholder("/hooks/my-bot"),
            Field::select("method", "Method", &["GET", "POST", "PUT"]).default_value("POST"),
            Field::password("secret", "Shared Secret"),
        ])
        .outputs(vec![
            Out::new("body", OutputType::Any, "Request body"),
            Out::new("headers", OutputType::Object, "Request headers"),
            Out::new("query", OutputType::Object, "Query string parameters"),
        ]),
        NodeTemplate::new("trigger.file_watch", Trigger, "File Watcher", "Run when files change")
            .config(vec![
                Field::text("path", "Folder").required().expressions(),
                Field::text("pattern", "Pattern").default_value("*"),
                Field::select("events", "Events", &["created", "modified", "deleted", "any"])
                    .default_value("created"),
            ])
            .outputs(vec![
                text_out("filePath", "Path of the changed file"),
                text_out("event", "Kind of change"),
            ]),
        NodeTemplate::new(
            "trigger.email_received",
            Trigger,
            "Email Received",
            "Run when a matching email arrives",
        )
        .config(vec![
            Field::text("mailbox", "Mailbox").default_value("INBOX"),
            Field::text("fromFilter", "From Contains"),
            Field::text("subjectFilter", "Subject Contains"),
        ])
        .outputs(vec![
            text_out("from", "Sender address"),
            text_out("subject", "Subject line"),
            text_out("body", "Plain text body"),
            Out::new("attachments", OutputType::Array, "Attachment file paths"),
        ]),
        NodeTemplate::new("trigger.queue", Trigger, "Queue", "Run for each queued work item")
            .config(vec![
                Field::text("queue", "Queue Name").required(),
                Field::number("batchSize", "Batch Size").default_value(1),
            ])
            .outputs(vec![
                Out::new("item", OutputType::Any, "Payload of the work item"),
                text_out("itemId", "Work item id"),
            ]),
        NodeTemplate::new("trigger.form", Trigger, "Form Trigger", "Run when a form is submitted")
            .config(vec![
                Field::text("formTitle", "Form Title").required(),
                Field::textarea("formDescription", "Description"),
                Field::form_builder("fields", "Form Fields").required(),
                Field::text("submitButtonText", "Submit Button").default_value("Submit"),
            ])
            .outputs(vec![
                Out::new(
                    "formData",
                    OutputType::Object,
                    "All submitted values, keyed by field id",
                ),
                text_out("submittedAt", "Submission time"),
                text_out("submissionId", "Unique submission id"),
            ]),
        NodeTemplate::new(
            "trigger.api_polling",
            Trigger,
            "API Polling",
            "Poll an endpoint and run when it reports a change",
        )
        .config(vec![
            Field::text("url", "URL").required().placeholder("https://"),
            Field::select("method", "Method", &["GET", "POST"]).default_value("GET"),
            Field::number("interval", "Interval (s)").default_value(300),
        ])
        .outputs(vec![
            Out::new("response", OutputType::Any, "Body of the triggering response"),
            Out::new("status", OutputType::Number, "HTTP status code"),
        ]),
        NodeTemplate::new(
            "trigger.database_change",
            Trigger,
            "Database Change",
            "Run when rows change in a table",
        )
        .config(vec![
            Field::text("table", "Table").required(),
            Field::select("event", "Event", &["insert", "update", "delete", "any"])
                .default_value("any"),
        ])
        .outputs(vec![
            text_out("event", "Kind of change"),
            Out::new("row", OutputType::Object, "Changed row"),
        ]),
        NodeTemplate::new(
            "trigger.storage_event",
            Trigger,
            "Storage Event",
            "Run when an object store bucket changes",
        )
        .config(vec![
            Field::text("bucket", "Bucket").required(),
            Field::select("event", "Event", &["created", "deleted", "any"])
                .default_value("created"),
            Field::text("prefix", "Key Prefix"),
        ])
        .outputs(vec![
            text_out("key", "Object key"),
            Out::new("size", OutputType::Number, "Object size in bytes"),
        ]),
        NodeTemplate::new(
            "trigger.message_bus",
            Trigger,
            "Message Bus",
            "Run for each message on a topic",
        )
        .config(vec![
            Field::select("provider", "Provider", &["kafka", "rabbitmq", "redis"])
                .default_value("kafka"),
            Field::text("topic", "Topic").required(),
        ])
        .outputs(vec![
            Out::new("message", OutputType::Any, "Message payload"),
            Out::new("headers", OutputType::Object, "Message headers"),
        ]),
        NodeTemplate::new("trigger.chat", Trigger, "Chat", "Run when a chat command arrives")
            .config(vec![
                Field::select("platform", "Platform", &["slack", "teams", "telegram"])
                    .default_value("slack"),
                Field::text("channel", "Channel"),
                Field::text("command", "Command").placeholder("/run"),
            ])
            .outputs(vec![
                text_out("text", "Message text"),
                text_out("user", "Sender"),
                text_out("channel", "Channel the message came from"),
            ]),
    ]
}
