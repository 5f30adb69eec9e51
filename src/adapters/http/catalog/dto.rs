//! Request and response bodies for the tool catalog.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{NewTool, Tool, ToolChanges};
use crate::domain::foundation::{Timestamp, ToolId, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
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

impl From<Tool> for ToolResponse {
    fn from(tool: Tool) -> Self {
        Self {
            id: tool.id,
            key: tool.key,
            title: tool.title,
            description: tool.description,
            icon: tool.icon,
            href: tool.href,
            keywords: tool.keywords,
            active: tool.active,
            display_order: tool.display_order,
            created_at: tool.created_at,
            updated_at: tool.updated_at,
        }
    }
}

/// Body of `POST /admin/tools`. The dashboard's field names are accepted as aliases.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateToolRequest {
    pub key: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, alias = "path")]
    pub href: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, alias = "enabled")]
    pub active: Option<bool>,
    #[serde(default, alias = "order")]
    pub display_order: Option<i32>,
}

impl CreateToolRequest {
    pub fn into_new_tool(self) -> Result<NewTool, ValidationError> {
        let mut tool = NewTool::new(
            &self.key,
            &self.title,
            &self.description,
            self.icon,
            self.href.as_deref(),
            self.keywords,
        )?;
        if self.active == Some(false) {
            tool = tool.inactive();
        }
        if let Some(order) = self.display_order {
            tool = tool.at_position(order);
        }
        Ok(tool)
    }
}

/// Body of `PUT /admin/tools/{id}`; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateToolRequest {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, alias = "path")]
    pub href: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default, alias = "enabled")]
    pub active: Option<bool>,
    #[serde(default, alias = "order")]
    pub display_order: Option<i32>,
}

impl From<UpdateToolRequest> for ToolChanges {
    fn from(req: UpdateToolRequest) -> Self {
        Self {
            key: req.key,
            title: req.title,
            description: req.description,
            icon: req.icon,
            href: req.href,
            keywords: req.keywords,
            active: req.active,
            display_order: req.display_order,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    #[serde(alias = "enabled", alias = "active")]
    pub status: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub tool_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_dashboard_aliases() {
        let req: CreateToolRequest = serde_json::from_str(
            r#"{"key":"hash","name":"Hash","path":"/h","enabled":false,"order":3}"#,
        )
        .unwrap();

        let tool = req.into_new_tool().unwrap();
        assert_eq!(tool.title, "Hash");
        assert_eq!(tool.href, "/h");
        assert!(!tool.active);
        assert_eq!(tool.display_order, Some(3));
    }

    #[test]
    fn create_request_defaults_to_active_at_end() {
        let req: CreateToolRequest =
            serde_json::from_str(r#"{"key":"dns","title":"DNS"}"#).unwrap();

        let tool = req.into_new_tool().unwrap();
        assert!(tool.active);
        assert_eq!(tool.display_order, None);
    }

    #[test]
    fn status_accepts_enabled_alias() {
        let req: StatusRequest = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
        assert!(req.status);
    }

    #[test]
    fn update_request_maps_to_changes() {
        let req: UpdateToolRequest = serde_json::from_str(r#"{"order":7}"#).unwrap();
        let changes = ToolChanges::from(req);
        assert_eq!(changes.display_order, Some(7));
        assert_eq!(changes.title, None);
    }
}
