//! Frame metadata export (JSON sidecar for engines and tooling).

use serde::Serialize;

use crate::asset::ImageAsset;
use crate::table::FrameTable;

#[derive(Debug, Clone, Serialize)]
pub struct AtlasMeta {
    pub image_file: String,
    pub image_size: (u32, u32),
    pub filter_mode: String,
    pub mode: String,
    pub frames: Vec<FrameMeta>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameMeta {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `[x, y, width, height]` in pixels.
    pub pixel: [i64; 4],
    /// `[lower_u, lower_v, upper_u, upper_v]`.
    pub texel: [f32; 4],
}

impl FrameMeta {
    fn collect(table: &FrameTable) -> Vec<Self> {
        table
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                let p = frame.pixel();
                let t = frame.texel();
                FrameMeta {
                    index,
                    name: table.frame_name(index).map(str::to_string),
                    pixel: [p.offset_x() as i64, p.offset_y() as i64, p.width as i64, p.height as i64],
                    texel: [t.lower.x, t.lower.y, t.upper.x, t.upper.y],
                }
            })
            .collect()
    }
}

impl AtlasMeta {
    pub fn from_asset(asset: &ImageAsset) -> Self {
        Self {
            image_file: asset.image_file().to_string(),
            image_size: (asset.image_width(), asset.image_height()),
            filter_mode: asset.filter_mode().label().to_string(),
            mode: asset.mode().label().to_string(),
            frames: FrameMeta::collect(&asset.frames()),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(self) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageSize;

    #[test]
    fn named_export_carries_names_and_texels() {
        let mut asset = ImageAsset::new();
        asset.set_image_file("hero.png");
        asset.bind_image(ImageSize::new(256, 128));
        asset.set_name_mode(true);
        asset.insert_named_cell("head", 64, 32, 32, 16);

        let meta = AtlasMeta::from_asset(&asset);
        assert_eq!(meta.mode, "named");
        assert_eq!(meta.frames.len(), 1);
        assert_eq!(meta.frames[0].name.as_deref(), Some("head"));
        assert_eq!(meta.frames[0].pixel, [64, 32, 32, 16]);
        assert_eq!(meta.frames[0].texel, [0.25, 0.25, 0.375, 0.375]);

        let json: serde_json::Value = serde_json::from_str(&meta.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["frames"][0]["name"], "head");
        assert_eq!(json["filter_mode"], "BILINEAR");
    }

    #[test]
    fn grid_export_has_no_names() {
        let mut asset = ImageAsset::new();
        asset.bind_image(ImageSize::new(32, 32));
        let json = AtlasMeta::from_asset(&asset).to_json_pretty().unwrap();
        assert!(!json.contains("\"name\""));
    }
}
