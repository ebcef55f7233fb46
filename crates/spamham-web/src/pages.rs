//! Server-rendered HTML pages

use minijinja::Environment;
use serde::Serialize;
use spamham_core::{Label, ModelName};

/// Shown when the form is submitted without a message
pub const EMPTY_MESSAGE_WARNING: &str = "Please enter a message to predict.";

const INDEX_TEMPLATE: &str = include_str!("../web/templates/index.html");

/// What to show under the form
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Result { label: &'static str },
    Warning { text: String },
    Error { text: String },
}

impl Outcome {
    pub fn label(label: Label) -> Self {
        Self::Result {
            label: label.as_str(),
        }
    }
}

/// Template context for the single page
#[derive(Debug, Serialize)]
pub struct IndexPage<'a> {
    pub models: Vec<&'static str>,
    pub selected: &'a str,
    pub message: &'a str,
    pub outcome: Option<Outcome>,
}

impl<'a> IndexPage<'a> {
    /// Blank form with the first model preselected
    pub fn empty(models: &[ModelName]) -> Self {
        Self {
            models: models.iter().map(|m| m.display_name()).collect(),
            selected: models.first().map(|m| m.display_name()).unwrap_or_default(),
            message: "",
            outcome: None,
        }
    }

    /// Form echoing the submitted values
    pub fn submitted(models: &[ModelName], message: &'a str, selected: &'a str) -> Self {
        Self {
            models: models.iter().map(|m| m.display_name()).collect(),
            selected,
            message,
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

/// Compiled templates
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        // `.html` names get HTML auto-escaping
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(&self, page: &IndexPage<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_lists_models() {
        let pages = Pages::new().unwrap();
        let html = pages
            .render_index(&IndexPage::empty(&ModelName::ALL))
            .unwrap();

        for name in ModelName::ALL {
            assert!(html.contains(&format!(">{}</option>", name.display_name())));
        }
        assert!(html.contains("selected>Logistic Regression</option>"));
        assert!(!html.contains("result-card"));
    }

    #[test]
    fn test_result_card() {
        let pages = Pages::new().unwrap();
        let page = IndexPage::submitted(&ModelName::ALL, "free money", "Naive Bayes")
            .with_outcome(Outcome::label(Label::Spam));
        let html = pages.render_index(&page).unwrap();

        assert!(html.contains("The message is: <strong>Spam</strong>"));
        assert!(html.contains("selected>Naive Bayes</option>"));
        assert!(html.contains(r#"value="free money""#));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let pages = Pages::new().unwrap();
        let page = IndexPage::submitted(&ModelName::ALL, "<script>alert(1)</script>", "Naive Bayes")
            .with_outcome(Outcome::Warning {
                text: EMPTY_MESSAGE_WARNING.to_string(),
            });
        let html = pages.render_index(&page).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(EMPTY_MESSAGE_WARNING));
    }
}
