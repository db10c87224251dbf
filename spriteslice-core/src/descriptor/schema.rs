use serde::{Deserialize, Serialize};

use crate::filter::FilterMode;

/// On-disk form of an [`ImageAsset`](crate::asset::ImageAsset). Absent
/// fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_16bit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_mode: Option<FilterMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_row_order: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_offset_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_offset_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_stride_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_stride_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_count_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_count_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_height: Option<i32>,
    /// Explicit or named cells, depending on the mode.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<CellRecord>,
}

/// One explicit or named cell as it crosses the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRecord {
    pub fn new(name: Option<&str>, offset_x: i32, offset_y: i32, width: i32, height: i32) -> Self {
        Self { name: name.map(str::to_string), offset_x, offset_y, width, height }
    }
}
