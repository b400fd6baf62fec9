//! HTML rendering seam.
//!
//! Handlers never build markup themselves: they hand a template name and a
//! JSON context to whatever [`ViewRenderer`] the application state carries.

use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> AppResult<String>;
}

/// A page about to be rendered: template name plus the data it receives.
#[derive(Debug, Clone)]
pub struct Page {
    pub template: &'static str,
    pub context: Map<String, Value>,
}

impl Page {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            context: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl serde::Serialize) -> AppResult<Self> {
        let value = serde_json::to_value(value).map_err(|e| AppError::Render(e.to_string()))?;
        self.context.insert(key.to_string(), value);
        Ok(self)
    }

    /// Merge every top-level field of `value`, which must serialize to an object.
    pub fn with_fields(mut self, value: impl serde::Serialize) -> AppResult<Self> {
        match serde_json::to_value(value).map_err(|e| AppError::Render(e.to_string()))? {
            Value::Object(fields) => {
                self.context.extend(fields);
                Ok(self)
            }
            other => Err(AppError::Render(format!(
                "page fields must be an object, got {other}"
            ))),
        }
    }
}

/// Minimal document that embeds the page context as JSON.
///
/// Stands in for a real template engine; a front end (or a test) reads the
/// `#page-data` element to get exactly what the page was given.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRenderer;

impl ViewRenderer for ShellRenderer {
    fn render(&self, template: &str, context: &Value) -> AppResult<String> {
        let data = serde_json::to_string(context).map_err(|e| AppError::Render(e.to_string()))?;
        // keep the payload from closing the script element early
        let data = data.replace("</", "<\\/");
        Ok(format!(
            "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{template}</title></head>\n\
             <body data-template=\"{template}\">\n\
             <script type=\"application/json\" id=\"page-data\">{data}</script>\n\
             </body>\n</html>\n"
        ))
    }
}

/// Pull the JSON context back out of a [`ShellRenderer`] document.
pub fn extract_page_data(html: &str) -> Option<Value> {
    let start_tag = "<script type=\"application/json\" id=\"page-data\">";
    let start = html.find(start_tag)? + start_tag.len();
    let end = html[start..].find("</script>")? + start;
    serde_json::from_str(&html[start..end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shell_renderer_embeds_context() {
        let html = ShellRenderer
            .render("index.html", &json!({ "title": "</script>blanket" }))
            .unwrap();
        assert!(html.contains("data-template=\"index.html\""));
        assert!(!html.contains("</script>blanket"));

        let data = extract_page_data(&html).unwrap();
        assert_eq!(data["title"], "</script>blanket");
    }

    #[test]
    fn page_collects_context() {
        let page = Page::new("about.html").with("qty", 3).unwrap();
        assert_eq!(page.context["qty"], json!(3));
    }

    #[test]
    fn with_fields_merges_objects_only() {
        let page = Page::new("admin_invoice.html")
            .with_fields(json!({ "total_amount": 10.0, "is_paid": false }))
            .unwrap();
        assert_eq!(page.context["total_amount"], json!(10.0));
        assert_eq!(page.context["is_paid"], json!(false));

        assert!(Page::new("x.html").with_fields(5).is_err());
    }
}
