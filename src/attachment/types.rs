use serde::Serialize;

/// Rich message payload handed to the chat framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub title: String,
    pub title_link: String,
    pub text: String,
    /// `#RRGGBB`
    pub color: String,
    /// Plain-text stand-in for clients that cannot render attachments.
    pub fallback: String,
    pub author_name: String,
    pub author_link: String,
    pub author_icon: String,
    /// Attachment parts the chat client should render as markdown.
    pub mrkdwn_in: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    /// Short fields may be laid out side by side.
    pub short: bool,
}
