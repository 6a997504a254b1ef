use super::{Field, NodeTemplate, Out, OutputType, text_out, workbook};
use crate::registry::NodeCategory::{Api, Database, Document, Email, Excel, Files};
use serde_json::json;

fn path(label: &str) -> Field {
    Field::text("path", label).required().expressions()
}

pub(super) fn files_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("files.read", Files, "Read File", "Read a file's contents")
            .config(vec![
                path("Path"),
                Field::select("encoding", "Encoding", &["utf-8", "latin-1", "binary"])
                    .default_value("utf-8"),
            ])
            .outputs(vec![
                text_out("content", "File contents"),
                Out::new("size", OutputType::Number, "Size in bytes"),
            ]),
        NodeTemplate::new("files.write", Files, "Write File", "Write content to a file")
            .config(vec![
                path("Path"),
                Field::textarea("content", "Content").required().expressions(),
                Field::boolean("append", "Append").default_value(false),
            ])
            .outputs(vec![text_out("path", "Written file path")]),
        NodeTemplate::new("files.copy", Files, "Copy File", "Copy a file")
            .config(vec![
                Field::text("source", "Source").required().expressions(),
                Field::text("destination", "Destination").required().expressions(),
                Field::boolean("overwrite", "Overwrite").default_value(false),
            ])
            .outputs(vec![text_out("path", "Path of the copy")]),
        NodeTemplate::new("files.move", Files, "Move File", "Move or rename a file")
            .config(vec![
                Field::text("source", "Source").required().expressions(),
                Field::text("destination", "Destination").required().expressions(),
            ])
            .outputs(vec![text_out("path", "New path")]),
        NodeTemplate::new("files.delete", Files, "Delete File", "Delete a file")
            .config(vec![path("Path")]),
        NodeTemplate::new("files.create_folder", Files, "Create Folder", "Create a directory")
            .config(vec![
                path("Folder"),
                Field::boolean("parents", "Create Parents").default_value(true),
            ]),
        NodeTemplate::new("files.list", Files, "List Files", "List files in a folder")
            .config(vec![
                path("Folder"),
                Field::text("pattern", "Pattern").default_value("*"),
                Field::boolean("recursive", "Recursive").default_value(false),
            ])
            .outputs(vec![
                Out::new("files", OutputType::Array, "Matching file paths"),
                Out::new("count", OutputType::Number, "Number of matches"),
            ]),
        NodeTemplate::new("files.exists", Files, "File Exists", "Check whether a path exists")
            .config(vec![path("Path")])
            .outputs(vec![Out::new("exists", OutputType::Boolean, "Whether the path exists")]),
        NodeTemplate::new("files.zip", Files, "Zip", "Compress files into an archive")
            .config(vec![
                Field::text("source", "Files or Folder").required().expressions(),
                Field::text("archive", "Archive").required().expressions(),
            ])
            .outputs(vec![text_out("archive", "Archive path")]),
        NodeTemplate::new("files.unzip", Files, "Unzip", "Extract an archive")
            .config(vec![
                Field::text("archive", "Archive").required().expressions(),
                Field::text("destination", "Destination").required().expressions(),
            ])
            .outputs(vec![Out::new("files", OutputType::Array, "Extracted file paths")]),
        NodeTemplate::new("files.get_info", Files, "File Info", "Read size and timestamps")
            .config(vec![path("Path")])
            .outputs(vec![
                Out::new("size", OutputType::Number, "Size in bytes"),
                text_out("modified", "Last modification time"),
                text_out("extension", "File extension"),
            ]),
    ]
}

pub(super) fn excel_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("excel.open", Excel, "Open Workbook", "Open a workbook for editing")
            .config(vec![
                workbook(),
                Field::boolean("create", "Create If Missing").default_value(false),
            ]),
        NodeTemplate::new("excel.read_range", Excel, "Read Range", "Read a worksheet range")
            .config(vec![
                workbook(),
                Field::text("sheet", "Sheet").default_value("Sheet1"),
                Field::text("range", "Range").placeholder("A1:D20"),
                Field::boolean("header", "First Row Is Header").default_value(true),
            ])
            .outputs(vec![
                Out::new("rows", OutputType::Array, "Rows read from the range"),
                Out::new("rowCount", OutputType::Number, "Number of rows"),
            ]),
        NodeTemplate::new("excel.write_range", Excel, "Write Range", "Write rows to a worksheet")
            .config(vec![
                workbook(),
                Field::text("sheet", "Sheet").default_value("Sheet1"),
                Field::text("startCell", "Start Cell").default_value("A1"),
                Field::text("data", "Rows").required().expressions(),
            ]),
        NodeTemplate::new("excel.read_cell", Excel, "Read Cell", "Read a single cell")
            .config(vec![
                workbook(),
                Field::text("sheet", "Sheet").default_value("Sheet1"),
                Field::text("cell", "Cell").required().placeholder("B2"),
            ])
            .outputs(vec![Out::new("value", OutputType::Any, "Cell value")]),
        NodeTemplate::new("excel.write_cell", Excel, "Write Cell", "Write a single cell")
            .config(vec![
                workbook(),
                Field::text("sheet", "Sheet").default_value("Sheet1"),
                Field::text("cell", "Cell").required().placeholder("B2"),
                Field::text("value", "Value").required().expressions(),
            ]),
        NodeTemplate::new("excel.add_row", Excel, "Add Row", "Append a row to a worksheet")
            .config(vec![
                workbook(),
                Field::text("sheet", "Sheet").default_value("Sheet1"),
                Field::json("values", "Values").required(),
            ]),
        NodeTemplate::new("excel.filter", Excel, "Filter Rows", "Keep rows matching a condition")
            .config(vec![
                Field::text("rows", "Rows").required().expressions(),
                Field::text("column", "Column").required(),
                Field::select(
                    "operator",
                    "Operator",
                    &["equals", "not_equals", "contains", "greater", "less"],
                )
                .default_value("equals"),
                Field::text("value", "Value").expressions(),
            ])
            .outputs(vec![
                Out::new("rows", OutputType::Array, "Matching rows"),
                Out::new("rowCount", OutputType::Number, "Number of matching rows"),
            ]),
        NodeTemplate::new("excel.save", Excel, "Save Workbook", "Save the open workbook")
            .config(vec![Field::text("saveAs", "Save As").expressions()]),
        NodeTemplate::new("excel.close", Excel, "Close Workbook", "Close the open workbook"),
        NodeTemplate::new("excel.csv_read", Excel, "Read CSV", "Parse a CSV file")
            .config(vec![
                path("Path"),
                Field::text("delimiter", "Delimiter").default_value(","),
            ])
            .outputs(vec![
                Out::new("rows", OutputType::Array, "Parsed rows"),
                Out::new("columns", OutputType::Array, "Column names"),
            ]),
        NodeTemplate::new("excel.csv_write", Excel, "Write CSV", "Write rows to a CSV file")
            .config(vec![
                path("Path"),
                Field::text("data", "Rows").required().expressions(),
                Field::text("delimiter", "Delimiter").default_value(","),
            ])
            .outputs(vec![text_out("path", "Written file path")]),
        NodeTemplate::new("excel.pivot", Excel, "Pivot", "Summarise rows into a pivot table")
            .config(vec![
                Field::text("rows", "Rows").required().expressions(),
                Field::text("index", "Group By").required(),
                Field::text("values", "Value Column").required(),
                Field::select("aggregate", "Aggregate", &["sum", "count", "mean", "min", "max"])
                    .default_value("sum"),
            ])
            .outputs(vec![Out::new("table", OutputType::Array, "Pivoted rows")]),
    ]
}

pub(super) fn email_templates() -> Vec<NodeTemplate> {
    let message_id = || Field::text("messageId", "Message Id").required().expressions();
    vec![
        NodeTemplate::new("email.send", Email, "Send Email", "Send an email over SMTP")
            .config(vec![
                Field::text("to", "To").required().expressions(),
                Field::text("subject", "Subject").required().expressions(),
                Field::textarea("body", "Body").expressions(),
                Field::boolean("html", "HTML Body").default_value(false),
            ])
            .outputs(vec![text_out("messageId", "Sent message id")]),
        NodeTemplate::new("email.read", Email, "Read Emails", "Fetch emails from a mailbox")
            .config(vec![
                Field::text("mailbox", "Mailbox").default_value("INBOX"),
                Field::number("limit", "Limit").default_value(10),
                Field::boolean("unreadOnly", "Unread Only").default_value(true),
            ])
            .outputs(vec![
                Out::new("emails", OutputType::Array, "Fetched messages"),
                Out::new("count", OutputType::Number, "Number of messages"),
            ]),
        NodeTemplate::new("email.reply", Email, "Reply", "Reply to a message")
            .config(vec![
                message_id(),
                Field::textarea("body", "Body").required().expressions(),
                Field::boolean("replyAll", "Reply All").default_value(false),
            ])
            .outputs(vec![text_out("messageId", "Sent reply id")]),
        NodeTemplate::new("email.forward", Email, "Forward", "Forward a message")
            .config(vec![
                message_id(),
                Field::text("to", "To").required().expressions(),
                Field::textarea("note", "Note").expressions(),
            ])
            .outputs(vec![text_out("messageId", "Forwarded message id")]),
        NodeTemplate::new(
            "email.download_attachment",
            Email,
            "Download Attachments",
            "Save a message's attachments",
        )
        .config(vec![
            message_id(),
            Field::text("folder", "Save To").required().expressions(),
            Field::text("pattern", "File Pattern").default_value("*"),
        ])
        .outputs(vec![Out::new("files", OutputType::Array, "Saved attachment paths")]),
        NodeTemplate::new("email.move", Email, "Move Email", "Move a message to another folder")
            .config(vec![
                message_id(),
                Field::text("folder", "Target Folder").required(),
            ]),
        NodeTemplate::new("email.delete", Email, "Delete Email", "Delete a message")
            .config(vec![message_id()]),
        NodeTemplate::new("email.mark_read", Email, "Mark As Read", "Flag a message as read")
            .config(vec![
                message_id(),
                Field::boolean("read", "Read").default_value(true),
            ]),
        NodeTemplate::new("email.search", Email, "Search Emails", "Find messages by criteria")
            .config(vec![
                Field::text("mailbox", "Mailbox").default_value("INBOX"),
                Field::text("query", "Criteria").required().expressions(),
                Field::number("limit", "Limit").default_value(50),
            ])
            .outputs(vec![
                Out::new("emails", OutputType::Array, "Matching messages"),
                Out::new("count", OutputType::Number, "Number of matches"),
            ]),
    ]
}

pub(super) fn api_templates() -> Vec<NodeTemplate> {
    let response = || {
        vec![
            Out::new("status", OutputType::Number, "HTTP status code").example(200),
            Out::new("body", OutputType::Any, "Response body"),
            Out::new("headers", OutputType::Object, "Response headers"),
        ]
    };
    vec![
        NodeTemplate::new("api.http_request", Api, "HTTP Request", "Call an HTTP endpoint")
            .config(vec![
                Field::select("method", "Method", &["GET", "POST", "PUT", "PATCH", "DELETE"])
                    .default_value("GET"),
                Field::text("url", "URL")
                    .required()
                    .expressions()
                    .placeholder("https://api.example.com"),
                Field::json("headers", "Headers"),
                Field::json("body", "Body")
                    .visible_when("method", json!(["POST", "PUT", "PATCH"])),
                Field::number("timeout", "Timeout (s)").default_value(30),
            ])
            .outputs(response()),
        NodeTemplate::new("api.graphql", Api, "GraphQL", "Run a GraphQL query")
            .config(vec![
                Field::text("url", "Endpoint").required().expressions(),
                Field::textarea("query", "Query").required().expressions(),
                Field::json("variables", "Variables"),
                Field::json("headers", "Headers"),
            ])
            .outputs(vec![
                Out::new("data", OutputType::Object, "The `data` member of the response"),
                Out::new("errors", OutputType::Array, "GraphQL errors, if any"),
            ]),
        NodeTemplate::new("api.rest_get", Api, "REST GET", "Fetch a REST resource")
            .config(vec![
                Field::text("url", "URL").required().expressions(),
                Field::json("params", "Query Parameters"),
                Field::json("headers", "Headers"),
            ])
            .outputs(response()),
        NodeTemplate::new("api.rest_post", Api, "REST POST", "Create a REST resource")
            .config(vec![
                Field::text("url", "URL").required().expressions(),
                Field::json("body", "Body").required(),
                Field::json("headers", "Headers"),
            ])
            .outputs(response()),
        NodeTemplate::new("api.soap", Api, "SOAP Call", "Call a SOAP operation")
            .config(vec![
                Field::text("wsdl", "WSDL URL").required().expressions(),
                Field::text("operation", "Operation").required(),
                Field::json("arguments", "Arguments"),
            ])
            .outputs(vec![Out::new("result", OutputType::Any, "Operation result")]),
        NodeTemplate::new("api.oauth_token", Api, "OAuth Token", "Fetch an OAuth2 access token")
            .config(vec![
                Field::text("tokenUrl", "Token URL").required().expressions(),
                Field::text("clientId", "Client Id").required().expressions(),
                Field::password("clientSecret", "Client Secret").required().expressions(),
                Field::text("scope", "Scope"),
            ])
            .outputs(vec![
                text_out("accessToken", "Access token"),
                Out::new("expiresIn", OutputType::Number, "Lifetime in seconds"),
            ]),
        NodeTemplate::new("api.parse_json", Api, "Parse JSON", "Parse a JSON string")
            .config(vec![Field::textarea("json", "JSON").required().expressions()])
            .outputs(vec![Out::new("data", OutputType::Any, "Parsed value")]),
        NodeTemplate::new("api.json_path", Api, "JSON Path", "Select values with a JSONPath")
            .config(vec![
                Field::text("data", "Data").required().expressions(),
                Field::text("path", "Expression").required().placeholder("$.items[*].id"),
            ])
            .outputs(vec![Out::new("matches", OutputType::Array, "Selected values")]),
        NodeTemplate::new("api.ftp_upload", Api, "FTP Upload", "Upload a file over FTP")
            .config(vec![
                Field::text("host", "Host").required(),
                Field::text("username", "Username"),
                Field::password("password", "Password").expressions(),
                Field::text("localPath", "Local File").required().expressions(),
                Field::text("remotePath", "Remote Path").required().expressions(),
            ]),
    ]
}

pub(super) fn database_templates() -> Vec<NodeTemplate> {
    let connection = || Field::password("connectionString", "Connection String").required();
    let rows_affected = || Out::new("rowCount", OutputType::Number, "Rows affected");
    vec![
        NodeTemplate::new("database.query", Database, "SQL Query", "Run a SQL query")
            .config(vec![
                Field::select("driver", "Driver", &["postgres", "mysql", "sqlite", "mssql"])
                    .default_value("postgres"),
                connection(),
                Field::textarea("query", "Query").required().expressions(),
            ])
            .outputs(vec![
                Out::new("rows", OutputType::Array, "Result rows"),
                Out::new("rowCount", OutputType::Number, "Rows returned or affected"),
            ]),
        NodeTemplate::new("database.insert", Database, "Insert Rows", "Insert rows into a table")
            .config(vec![
                connection(),
                Field::text("table", "Table").required(),
                Field::text("rows", "Rows").required().expressions(),
            ])
            .outputs(vec![rows_affected()]),
        NodeTemplate::new("database.update", Database, "Update Rows", "Update matching rows")
            .config(vec![
                connection(),
                Field::text("table", "Table").required(),
                Field::json("values", "Values").required(),
                Field::text("where", "Where").expressions(),
            ])
            .outputs(vec![rows_affected()]),
    ]
}

pub(super) fn document_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("document.pdf_read", Document, "Read PDF", "Extract text from a PDF")
            .config(vec![
                path("Path"),
                Field::text("pages", "Pages").placeholder("1-3"),
            ])
            .outputs(vec![
                text_out("text", "Extracted text"),
                Out::new("pageCount", OutputType::Number, "Number of pages"),
            ]),
        NodeTemplate::new("document.pdf_merge", Document, "Merge PDFs", "Join PDFs into one")
            .config(vec![
                Field::text("files", "Files").required().expressions(),
                Field::text("output", "Output").required().expressions(),
            ])
            .outputs(vec![text_out("path", "Merged file path")]),
        NodeTemplate::new("document.ocr", Document, "OCR", "Recognise text in an image")
            .config(vec![
                path("Image"),
                Field::text("language", "Language").default_value("eng"),
            ])
            .outputs(vec![
                text_out("text", "Recognised text"),
                Out::new("confidence", OutputType::Number, "Mean confidence, 0-100"),
            ]),
        NodeTemplate::new("document.word_read", Document, "Read Word", "Extract text from a docx")
            .config(vec![path("Path")])
            .outputs(vec![
                text_out("text", "Document text"),
                Out::new("paragraphs", OutputType::Array, "Paragraph texts"),
            ]),
    ]
}
