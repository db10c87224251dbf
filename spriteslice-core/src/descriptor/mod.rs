pub mod schema;

use anyhow::{bail, Context, Result};
use schema::{AssetDescriptor, CellRecord};

use crate::area::PixelArea;
use crate::asset::{ConfigField, ImageAsset};
use crate::slicing::{ExplicitCells, NamedCells};

pub fn load_from_yaml_str(s: &str) -> Result<AssetDescriptor> {
    let descriptor: AssetDescriptor = serde_yaml::from_str(s)?;
    Ok(descriptor)
}

pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<AssetDescriptor> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading sheet descriptor {}", path.display()))?;
    load_from_yaml_str(&data).with_context(|| format!("parsing sheet descriptor {}", path.display()))
}

pub fn save_to_yaml_string(descriptor: &AssetDescriptor) -> Result<String> {
    Ok(serde_yaml::to_string(descriptor)?)
}

pub fn save_to_path<P: AsRef<std::path::Path>>(descriptor: &AssetDescriptor, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, save_to_yaml_string(descriptor)?)
        .with_context(|| format!("writing sheet descriptor {}", path.display()))
}

impl AssetDescriptor {
    /// Snapshot an asset, leaving out fields at their defaults.
    pub fn from_asset(asset: &ImageAsset) -> Self {
        let keep = |field: ConfigField| asset.should_persist(field);
        let cells = if asset.name_mode() {
            asset.write_named_cells()
        } else if asset.explicit_mode() {
            asset.write_explicit_cells()
        } else {
            Vec::new()
        };
        Self {
            image_file: keep(ConfigField::ImageFile).then(|| asset.image_file().to_string()),
            force_16bit: keep(ConfigField::Force16Bit).then(|| asset.force_16bit()),
            filter_mode: keep(ConfigField::FilterMode).then(|| asset.filter_mode()),
            explicit_mode: keep(ConfigField::ExplicitMode).then_some(true),
            name_mode: keep(ConfigField::NameMode).then_some(true),
            cell_row_order: keep(ConfigField::CellRowOrder).then(|| asset.cell_row_order()),
            cell_offset_x: keep(ConfigField::CellOffsetX).then(|| asset.cell_offset_x()),
            cell_offset_y: keep(ConfigField::CellOffsetY).then(|| asset.cell_offset_y()),
            cell_stride_x: keep(ConfigField::CellStrideX).then(|| asset.cell_stride_x()),
            cell_stride_y: keep(ConfigField::CellStrideY).then(|| asset.cell_stride_y()),
            cell_count_x: keep(ConfigField::CellCountX).then(|| asset.cell_count_x()),
            cell_count_y: keep(ConfigField::CellCountY).then(|| asset.cell_count_y()),
            cell_width: keep(ConfigField::CellWidth).then(|| asset.cell_width()),
            cell_height: keep(ConfigField::CellHeight).then(|| asset.cell_height()),
            cells,
        }
    }

    /// Apply every present field through the asset's setters. Name mode wins
    /// over explicit mode when both are set.
    pub fn apply_to(&self, asset: &mut ImageAsset) -> Result<()> {
        if let Some(file) = &self.image_file { asset.set_image_file(file.as_str()); }
        if let Some(v) = self.force_16bit { asset.set_force_16bit(v); }
        if let Some(mode) = self.filter_mode {
            if !asset.set_filter_mode(mode) {
                bail!("unknown texture filter mode in descriptor");
            }
        }
        if let Some(v) = self.cell_row_order { asset.set_cell_row_order(v); }
        if let Some(v) = self.cell_offset_x { asset.set_cell_offset_x(v); }
        if let Some(v) = self.cell_offset_y { asset.set_cell_offset_y(v); }
        if let Some(v) = self.cell_stride_x { asset.set_cell_stride_x(v); }
        if let Some(v) = self.cell_stride_y { asset.set_cell_stride_y(v); }
        if let Some(v) = self.cell_count_x { asset.set_cell_count_x(v); }
        if let Some(v) = self.cell_count_y { asset.set_cell_count_y(v); }
        if let Some(v) = self.cell_width { asset.set_cell_width(v); }
        if let Some(v) = self.cell_height { asset.set_cell_height(v); }

        if self.name_mode == Some(true) {
            asset.set_name_mode(true);
            if !asset.read_named_cells(&self.cells) {
                bail!("descriptor has invalid or duplicate named cells");
            }
        } else if self.explicit_mode == Some(true) {
            asset.set_explicit_mode(true);
            if !asset.read_explicit_cells(&self.cells) {
                bail!("descriptor has invalid explicit cells");
            }
        } else if !self.cells.is_empty() {
            log::warn!("ignoring {} cells in grid-mode descriptor", self.cells.len());
        }
        Ok(())
    }

    pub fn into_asset(&self) -> Result<ImageAsset> {
        let mut asset = ImageAsset::new();
        self.apply_to(&mut asset)?;
        Ok(asset)
    }
}

fn record_from_area(name: Option<&str>, area: &PixelArea) -> CellRecord {
    let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
    CellRecord::new(name, area.offset_x(), area.offset_y(), clamp(area.width), clamp(area.height))
}

fn area_from_record(record: &CellRecord) -> Option<PixelArea> {
    PixelArea::try_new(record.offset_x, record.offset_y, record.width, record.height)
}

/// Serialization hooks for the explicit and named cell lists.
impl ImageAsset {
    pub fn write_explicit_cells(&self) -> Vec<CellRecord> {
        self.explicit_cells()
            .map(|cells| cells.as_slice().iter().map(|c| record_from_area(None, c)).collect())
            .unwrap_or_default()
    }

    /// Replace the explicit list with `records`. Fails without changes if the
    /// asset is not in explicit mode or any record has a negative size.
    pub fn read_explicit_cells(&mut self, records: &[CellRecord]) -> bool {
        let Some(cells) = records.iter().map(area_from_record).collect::<Option<ExplicitCells>>() else {
            log::warn!("read_explicit_cells: invalid cell dimensions");
            return false;
        };
        self.edit_explicit("read_explicit_cells", |current| {
            *current = cells;
            true
        })
    }

    pub fn write_named_cells(&self) -> Vec<CellRecord> {
        self.named_cells()
            .map(|cells| {
                cells.as_slice().iter().map(|c| record_from_area(Some(&c.name), &c.area)).collect()
            })
            .unwrap_or_default()
    }

    /// Replace the named map with `records`, in order. Records without a name
    /// get a generated one. Fails without changes on a bad size, a duplicate
    /// name or when the asset is not in name mode.
    pub fn read_named_cells(&mut self, records: &[CellRecord]) -> bool {
        let mut cells = NamedCells::new();
        for record in records {
            let Some(area) = area_from_record(record) else {
                log::warn!("read_named_cells: invalid cell dimensions");
                return false;
            };
            match &record.name {
                Some(name) => {
                    if !cells.insert(name, area) {
                        log::warn!("read_named_cells: duplicate cell name '{}'", name);
                        return false;
                    }
                }
                None => { cells.append(area); }
            }
        }
        self.edit_named("read_named_cells", |current| {
            *current = cells;
            true
        })
    }
}
