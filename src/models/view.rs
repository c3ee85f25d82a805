use serde::{Deserialize, Serialize};

/// A control drawn on the page. Inert controls render but have no handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlView {
    pub label: String,
    pub inert: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBarView {
    pub placeholder: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryCardView {
    pub id: String,
    pub description: String,
    pub display_date: String,
    pub time: String,
    pub query_count_label: String,
    pub action_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyStateView {
    pub title: String,
    pub hint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyIcon {
    Copy,
    Check,
}

/// The "Generated SQL" dialog for the selected record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailDialogView {
    pub title: String,
    pub entry_id: String,
    pub prompt: String,
    /// Stored response, separators and newlines untouched
    pub response: String,
    pub copy_icon: CopyIcon,
    pub close_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub title: String,
    pub subtitle: String,
    pub search: SearchBarView,
    pub filter_button: ControlView,
    pub entries: Vec<EntryCardView>,
    pub empty_state: Option<EmptyStateView>,
    pub load_more: Option<ControlView>,
    pub dialog: Option<DetailDialogView>,
}
