use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ExtractionError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Internal,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "LinkType")]
    pub link_type: LinkType,
    #[serde(rename = "LinkUrl")]
    pub url: String,
    #[serde(rename = "Accessible")]
    pub accessible: bool,
}

impl Link {
    /// A collected link that has not been probed yet.
    pub fn unprobed(link_type: LinkType, url: String) -> Self {
        Self {
            link_type,
            url,
            accessible: false,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.link_type == LinkType::Internal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSummary {
    #[serde(rename = "Links")]
    pub links: Vec<Link>,
    #[serde(rename = "InternalLinks")]
    pub internal: usize,
    #[serde(rename = "ExternalLinks")]
    pub external: usize,
    #[serde(rename = "AccessibleLinks")]
    pub accessible: usize,
    #[serde(rename = "InaccessibleLinks")]
    pub inaccessible: usize,
}

impl LinkSummary {
    /// Builds the summary and derives every count from `links`.
    pub fn from_links(links: Vec<Link>) -> Self {
        let total = links.len();
        let internal = links.iter().filter(|l| l.is_internal()).count();
        let accessible = links.iter().filter(|l| l.accessible).count();

        Self {
            links,
            internal,
            external: total - internal,
            accessible,
            inaccessible: total - accessible,
        }
    }
}

/// One extractor's contribution. Each variant owns exactly one field of
/// [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partial {
    HtmlVersion(String),
    Title(String),
    Headings(BTreeMap<String, usize>),
    Links(LinkSummary),
    LoginForm(bool),
}

/// The message every extractor task sends exactly once.
pub type TaskMessage = std::result::Result<Partial, ExtractionError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "HtmlVersion")]
    pub html_version: String,
    #[serde(rename = "PageTitle")]
    pub title: String,
    #[serde(rename = "Headings")]
    pub headings: BTreeMap<String, usize>,
    #[serde(rename = "LinkSummary")]
    pub link_summary: Option<LinkSummary>,
    #[serde(rename = "HasLoginForm")]
    pub has_login_form: bool,
    #[serde(rename = "Errors")]
    pub errors: Vec<String>,
}

impl AnalysisResult {
    /// Folds one task message into the aggregate.
    pub fn apply(&mut self, message: TaskMessage) {
        match message {
            Ok(Partial::HtmlVersion(version)) => self.html_version = version,
            Ok(Partial::Title(title)) => self.title = title,
            Ok(Partial::Headings(headings)) => self.headings = headings,
            Ok(Partial::Links(summary)) => self.link_summary = Some(summary),
            Ok(Partial::LoginForm(found)) => self.has_login_form = found,
            Err(e) => self.errors.push(e.to_string()),
        }
    }

    pub fn from_messages(messages: impl IntoIterator<Item = TaskMessage>) -> Self {
        let mut result = Self::default();
        for message in messages {
            result.apply(message);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(link_type: LinkType, accessible: bool) -> Link {
        Link {
            link_type,
            url: "https://example.com/".to_string(),
            accessible,
        }
    }

    #[test]
    fn test_summary_counts_are_derived() {
        let summary = LinkSummary::from_links(vec![
            link(LinkType::Internal, true),
            link(LinkType::Internal, false),
            link(LinkType::External, true),
        ]);

        assert_eq!(summary.internal, 2);
        assert_eq!(summary.external, 1);
        assert_eq!(summary.accessible, 2);
        assert_eq!(summary.inaccessible, 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = LinkSummary::from_links(Vec::new());
        assert_eq!(summary.internal + summary.external, 0);
        assert_eq!(summary.accessible + summary.inaccessible, 0);
    }

    #[test]
    fn test_apply_appends_errors_in_arrival_order() {
        let result = AnalysisResult::from_messages(vec![
            Err(ExtractionError::NoLinks),
            Ok(Partial::Title("Home".to_string())),
            Err(ExtractionError::EmptyInput),
        ]);

        assert_eq!(result.title, "Home");
        assert_eq!(result.errors, vec!["no links available", "empty HTML snippet"]);
    }

    #[test]
    fn test_json_shape() {
        let mut headings = BTreeMap::new();
        headings.insert("h1".to_string(), 2);

        let result = AnalysisResult {
            html_version: "HTML5".to_string(),
            title: "Example".to_string(),
            headings,
            link_summary: Some(LinkSummary::from_links(vec![link(LinkType::External, false)])),
            has_login_form: true,
            errors: vec![],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["HtmlVersion"], "HTML5");
        assert_eq!(json["PageTitle"], "Example");
        assert_eq!(json["Headings"]["h1"], 2);
        assert_eq!(json["HasLoginForm"], true);
        assert_eq!(json["Errors"], serde_json::json!([]));
        assert_eq!(json["LinkSummary"]["ExternalLinks"], 1);
        assert_eq!(json["LinkSummary"]["InaccessibleLinks"], 1);
        assert_eq!(json["LinkSummary"]["Links"][0]["LinkType"], "external");
        assert_eq!(json["LinkSummary"]["Links"][0]["LinkUrl"], "https://example.com/");
        assert_eq!(json["LinkSummary"]["Links"][0]["Accessible"], false);
    }

    #[test]
    fn test_missing_link_summary_serializes_as_null() {
        let json = serde_json::to_value(AnalysisResult::default()).unwrap();
        assert!(json["LinkSummary"].is_null());
    }
}
