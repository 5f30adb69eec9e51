//! Catalog entry describing one dashboard tool.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, ToolId, ValidationError};

pub const KEY_MAX: usize = 64;
pub const TITLE_MAX: usize = 120;

/// A tool exposed (or hidden) on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub id: ToolId,
    pub key: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub href: String,
    pub keywords: Vec<String>,
    pub active: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for a tool that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTool {
    pub key: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub href: String,
    pub keywords: Vec<String>,
    pub active: bool,
    /// `None` appends to the end of the catalog.
    pub display_order: Option<i32>,
}

impl NewTool {
    /// Normalizes and validates a tool definition.
    ///
    /// An empty `href` defaults to `/dashboard/tools/<key>`.
    pub fn new(
        key: &str,
        title: &str,
        description: &str,
        icon: Option<String>,
        href: Option<&str>,
        keywords: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let key = normalize_key(key)?;
        let href = match href.map(str::trim).filter(|h| !h.is_empty()) {
            Some(h) => h.to_string(),
            None => default_href(&key),
        };
        Ok(Self {
            title: normalize_title(title)?,
            description: description.trim().to_string(),
            icon: normalize_optional(icon),
            href,
            keywords: normalize_keywords(keywords),
            active: true,
            display_order: None,
            key,
        })
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn at_position(mut self, display_order: i32) -> Self {
        self.display_order = Some(display_order);
        self
    }

    /// Materializes the entry once storage has assigned an id.
    pub fn into_tool(self, id: ToolId, display_order: i32) -> Tool {
        let now = Timestamp::now();
        Tool {
            id,
            key: self.key,
            title: self.title,
            description: self.description,
            icon: self.icon,
            href: self.href,
            keywords: self.keywords,
            active: self.active,
            display_order,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolChanges {
    pub key: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub href: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub active: Option<bool>,
    pub display_order: Option<i32>,
}

impl Tool {
    /// Applies a partial update atomically: nothing changes if any field is invalid.
    pub fn apply(&mut self, changes: ToolChanges) -> Result<(), ValidationError> {
        let key = changes.key.as_deref().map(normalize_key).transpose()?;
        let title = changes.title.as_deref().map(normalize_title).transpose()?;

        if let Some(key) = key {
            self.key = key;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description.trim().to_string();
        }
        if let Some(icon) = changes.icon {
            self.icon = normalize_optional(Some(icon));
        }
        if let Some(href) = changes.href {
            let href = href.trim();
            self.href = if href.is_empty() {
                default_href(&self.key)
            } else {
                href.to_string()
            };
        }
        if let Some(keywords) = changes.keywords {
            self.keywords = normalize_keywords(keywords);
        }
        if let Some(active) = changes.active {
            self.active = active;
        }
        if let Some(order) = changes.display_order {
            self.display_order = order;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Timestamp::now();
    }

    pub fn move_to(&mut self, display_order: i32) {
        self.display_order = display_order;
        self.updated_at = Timestamp::now();
    }
}

/// Public ordering: display order, then title.
pub fn sort_for_display(tools: &mut [Tool]) {
    tools.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.title.cmp(&b.title))
    });
}

fn normalize_key(raw: &str) -> Result<String, ValidationError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(ValidationError::empty_field("key"));
    }
    if key.len() > KEY_MAX {
        return Err(ValidationError::out_of_range("key", 1, KEY_MAX as i64, key.len() as i64));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::invalid_format(
            "key",
            "only lowercase letters, digits and '-' are allowed",
        ));
    }
    Ok(key.to_string())
}

fn normalize_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    let len = title.chars().count();
    if len > TITLE_MAX {
        return Err(ValidationError::out_of_range("title", 1, TITLE_MAX as i64, len as i64));
    }
    Ok(title.to_string())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !out.contains(&keyword) {
            out.push(keyword);
        }
    }
    out
}

fn default_href(key: &str) -> String {
    format!("/dashboard/tools/{}", key)
}

/// Renumbers `tools` 0, 1, 2... with `ids` first, in the given order, and the
/// remaining tools after them in their current display order.
///
/// Returns the tools whose position changed, plus the full new ordering.
pub fn reorder(mut tools: Vec<Tool>, ids: &[ToolId]) -> Result<(Vec<Tool>, Vec<ToolId>), DomainError> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.contains(id) {
            return Err(DomainError::validation("toolIds", format!("tool {} listed twice", id)));
        }
        if !tools.iter().any(|t| t.id == *id) {
            return Err(DomainError::new(ErrorCode::ToolNotFound, format!("Tool {} not found", id))
                .with_detail("id", id.to_string()));
        }
        seen.push(*id);
    }

    sort_for_display(&mut tools);
    let mut ordered: Vec<Tool> = Vec::with_capacity(tools.len());
    for id in ids {
        if let Some(pos) = tools.iter().position(|t| t.id == *id) {
            ordered.push(tools.remove(pos));
        }
    }
    ordered.extend(tools);

    let mut changed = Vec::new();
    for (position, tool) in ordered.iter_mut().enumerate() {
        let position = position as i32;
        if tool.display_order != position {
            tool.move_to(position);
            changed.push(tool.id);
        }
    }
    Ok((ordered, changed))
}
