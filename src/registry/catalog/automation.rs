use super::{Field, NodeTemplate, Out, OutputType, selector, text_out};
use crate::registry::NodeCategory::{Desktop, Web};

pub(super) fn web_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("web.open_browser", Web, "Open Browser", "Launch a browser session")
            .config(vec![
                Field::text("url", "URL").required().expressions().placeholder("https://"),
                Field::select("browser", "Browser", &["chromium", "firefox", "webkit"])
                    .default_value("chromium"),
                Field::boolean("headless", "Headless").default_value(false),
            ])
            .outputs(vec![text_out("sessionId", "Browser session id")]),
        NodeTemplate::new("web.navigate", Web, "Navigate", "Go to a URL")
            .config(vec![Field::text("url", "URL").required().expressions()])
            .outputs(vec![
                text_out("url", "Final URL"),
                text_out("title", "Page title"),
            ]),
        NodeTemplate::new("web.click", Web, "Click", "Click an element").config(vec![
            selector("selector", "Selector"),
            Field::number("timeout", "Timeout (s)").default_value(10),
        ]),
        NodeTemplate::new("web.type", Web, "Type Text", "Type into an input").config(vec![
            selector("selector", "Selector"),
            Field::text("text", "Text").required().expressions(),
            Field::boolean("clear", "Clear First").default_value(true),
        ]),
        NodeTemplate::new("web.select_option", Web, "Select Option", "Pick a dropdown option")
            .config(vec![
                selector("selector", "Selector"),
                Field::select("by", "Match By", &["value", "label", "index"])
                    .default_value("value"),
                Field::text("option", "Option").required().expressions(),
            ]),
        NodeTemplate::new("web.get_text", Web, "Get Text", "Read the text of an element")
            .config(vec![selector("selector", "Selector")])
            .outputs(vec![text_out("text", "Element text")]),
        NodeTemplate::new("web.get_attribute", Web, "Get Attribute", "Read an element attribute")
            .config(vec![
                selector("selector", "Selector"),
                Field::text("attribute", "Attribute").required().placeholder("href"),
            ])
            .outputs(vec![text_out("value", "Attribute value")]),
        NodeTemplate::new("web.screenshot", Web, "Screenshot", "Capture the current page")
            .config(vec![
                Field::text("path", "Save To").expressions(),
                Field::boolean("fullPage", "Full Page").default_value(false),
            ])
            .outputs(vec![text_out("path", "Saved image path")]),
        NodeTemplate::new("web.wait_element", Web, "Wait For Element", "Wait until an element")
            .config(vec![
                selector("selector", "Selector"),
                Field::select("state", "State", &["visible", "hidden", "attached", "detached"])
                    .default_value("visible"),
                Field::number("timeout", "Timeout (s)").default_value(30),
            ]),
        NodeTemplate::new("web.execute_js", Web, "Execute JavaScript", "Run a script in the page")
            .config(vec![Field::textarea("script", "Script").required().expressions()])
            .outputs(vec![Out::new("result", OutputType::Any, "Value returned by the script")]),
        NodeTemplate::new("web.scroll", Web, "Scroll", "Scroll the page or an element").config(
            vec![
                Field::select("direction", "Direction", &["down", "up", "to_element"])
                    .default_value("down"),
                Field::text("selector", "Selector")
                    .expressions()
                    .visible_when("direction", "to_element"),
                Field::number("amount", "Pixels").default_value(500),
            ],
        ),
        NodeTemplate::new("web.handle_alert", Web, "Handle Alert", "Accept or dismiss a dialog")
            .config(vec![
                Field::select("action", "Action", &["accept", "dismiss"]).default_value("accept"),
                Field::text("promptText", "Prompt Text").expressions(),
            ])
            .outputs(vec![text_out("message", "Dialog message")]),
        NodeTemplate::new("web.switch_tab", Web, "Switch Tab", "Activate another browser tab")
            .config(vec![
                Field::select("by", "Find By", &["index", "title", "url"]).default_value("index"),
                Field::text("value", "Value").required().expressions(),
            ]),
        NodeTemplate::new("web.close_browser", Web, "Close Browser", "End the browser session"),
        NodeTemplate::new("web.download_file", Web, "Download File", "Download through the page")
            .config(vec![
                selector("selector", "Download Link"),
                Field::text("saveTo", "Save To").expressions(),
            ])
            .outputs(vec![text_out("path", "Downloaded file path")]),
    ]
}

pub(super) fn desktop_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new("desktop.open_app", Desktop, "Open Application", "Launch an application")
            .config(vec![
                Field::text("path", "Application").required().expressions(),
                Field::text("args", "Arguments").expressions(),
            ])
            .outputs(vec![Out::new("pid", OutputType::Number, "Process id")]),
        NodeTemplate::new("desktop.click", Desktop, "Desktop Click", "Click on screen")
            .config(vec![
                Field::text("locator", "Locator").expressions(),
                Field::number("x", "X"),
                Field::number("y", "Y"),
                Field::select("button", "Button", &["left", "right", "double"])
                    .default_value("left"),
            ]),
        NodeTemplate::new("desktop.type_text", Desktop, "Type Text", "Type with the keyboard")
            .config(vec![
                Field::text("text", "Text").required().expressions(),
                Field::number("interval", "Key Interval (s)").default_value(0.05),
            ]),
        NodeTemplate::new("desktop.hotkey", Desktop, "Hotkey", "Press a keyboard shortcut")
            .config(vec![Field::text("keys", "Keys").required().placeholder("ctrl+s")]),
        NodeTemplate::new("desktop.get_window", Desktop, "Find Window", "Find and focus a window")
            .config(vec![Field::text("title", "Window Title").required().expressions()])
            .outputs(vec![
                text_out("title", "Matched window title"),
                Out::new("windows", OutputType::Array, "All matching windows"),
            ]),
        NodeTemplate::new("desktop.minimize", Desktop, "Minimize", "Minimize the active window"),
        NodeTemplate::new("desktop.maximize", Desktop, "Maximize", "Maximize the active window"),
        NodeTemplate::new("desktop.close_window", Desktop, "Close Window", "Close the window"),
        NodeTemplate::new("desktop.screenshot", Desktop, "Screenshot", "Capture the screen")
            .config(vec![
                Field::text("path", "Save To").expressions(),
                Field::text("region", "Region").placeholder("x,y,width,height"),
            ])
            .outputs(vec![text_out("path", "Saved image path")]),
        NodeTemplate::new("desktop.image_click", Desktop, "Click Image", "Click where an image is")
            .config(vec![
                Field::text("imagePath", "Image").required().expressions(),
                Field::number("confidence", "Confidence").default_value(0.9),
            ]),
        NodeTemplate::new("desktop.wait_image", Desktop, "Wait For Image", "Wait for an image")
            .config(vec![
                Field::text("imagePath", "Image").required().expressions(),
                Field::number("timeout", "Timeout (s)").default_value(30),
            ])
            .outputs(vec![Out::new("found", OutputType::Boolean, "Whether the image appeared")]),
        NodeTemplate::new(
            "desktop.clipboard_copy",
            Desktop,
            "Copy To Clipboard",
            "Put text on the clipboard",
        )
        .config(vec![Field::text("text", "Text").required().expressions()]),
    ]
}
