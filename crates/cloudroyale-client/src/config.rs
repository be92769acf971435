//! Server creation parameters
//!
//! The panel's create form takes a flat key/value mapping. The typed fields
//! below carry the defaults the panel UI submits; anything the panel grows
//! that this crate does not know about yet can be passed through `extra`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parameters for [`SessionClient::create_server`](crate::SessionClient::create_server).
///
/// `Default` reproduces the panel's own form defaults. Fields set by the
/// caller replace the default value for that key; `extra` entries are merged
/// last, overriding a typed field in place when the key collides and
/// appending otherwise. `extra` values are sent to the panel unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name shown in the panel.
    pub hostname: String,

    /// OS template. 70 = Ubuntu 14.04.
    pub template_id: u32,

    /// Resource tier.
    pub resources: String,

    /// Memory in GB.
    pub memory: u32,

    /// Number of CPUs.
    pub cpus: u32,

    /// Disk store group. 2 = HDD, 22 = SSD.
    pub data_store_group_primary_id: u32,

    /// Primary disk size in GB.
    pub primary_disk_size: u32,

    /// Additional form fields, passed through as-is.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "server name".to_string(),
            template_id: 70,
            resources: "advanced".to_string(),
            memory: 1,
            cpus: 1,
            data_store_group_primary_id: 2,
            primary_disk_size: 20,
            extra: BTreeMap::new(),
        }
    }
}

impl ServerConfig {
    /// Flatten into the ordered form fields the creation endpoint expects.
    ///
    /// Typed fields come first in the panel's form order. `extra` keys that
    /// shadow a typed field replace its value without moving it; unknown
    /// keys are appended in `extra` iteration order.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("hostname".to_string(), self.hostname.clone()),
            ("template_id".to_string(), self.template_id.to_string()),
            ("resources".to_string(), self.resources.clone()),
            ("memory".to_string(), self.memory.to_string()),
            ("cpus".to_string(), self.cpus.to_string()),
            (
                "data_store_group_primary_id".to_string(),
                self.data_store_group_primary_id.to_string(),
            ),
            (
                "primary_disk_size".to_string(),
                self.primary_disk_size.to_string(),
            ),
        ];

        for (key, value) in &self.extra {
            match fields.iter_mut().find(|(k, _)| k == key) {
                Some(field) => field.1 = value.clone(),
                None => fields.push((key.clone(), value.clone())),
            }
        }

        fields
    }
}
