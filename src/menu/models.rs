use crate::api::models::common::{deserialize_flexible_string, null_as_default};
use serde::{Deserialize, Serialize};

/// Flat menu record as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    pub mnu_no: String,
    pub mnu_parent: Option<String>,
    pub mnu_type: String,
    pub mnu_nm: String,
    pub mnu_msg_cd: String,
    pub mnu_desc: String,
    /// Route, without the leading slash
    pub mnu_target: String,
    pub mnu_filenm: String,
    /// Icon key such as `fa-calendar`
    pub mnu_imgpath: String,
    pub mnu_custom: String,
    pub mnu_desktop: String,
    pub mnu_mobile: String,
    /// Numeric sort key, kept as the backend sends it
    pub mnu_order: String,
    pub mnu_cert_type: String,
    pub mnu_extn_conn_yn: String,
    pub mnu_start_hour: String,
    pub mnu_end_hour: String,
    pub deleteflag: String,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, parent: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            mnu_no: id.into(),
            mnu_parent: parent.map(str::to_string),
            mnu_nm: name.into(),
            mnu_order: "0".to_string(),
            deleteflag: "N".to_string(),
            ..Default::default()
        }
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.mnu_order = order.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.mnu_target = target.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.mnu_imgpath = icon.into();
        self
    }
}

/// Menu record in the tree form served by `/menu/list`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TreeRecord {
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    pub parent: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

impl From<TreeRecord> for MenuItem {
    fn from(record: TreeRecord) -> Self {
        let mut item = MenuItem::new(record.key.unwrap_or_default(), None, record.title);
        item.mnu_parent = record.parent;
        item
    }
}

/// Convert tree records into menu items with empty metadata and order "0"
pub fn convert_tree_records(records: Vec<TreeRecord>) -> Vec<MenuItem> {
    records.into_iter().map(MenuItem::from).collect()
}
